//! Test fixtures
//!
//! [`load_fixture`] reads Django's JSON fixture format:
//!
//! ```json
//! [
//!   {"model": "contenttypes_tests.author", "pk": 1, "fields": {"name": "Boris"}},
//!   {"model": "contenttypes_tests.article", "pk": 1, "fields": {"title": "Old Article", "author": 1}}
//! ]
//! ```
//!
//! Foreign keys are given by field name (`author`) and stored in their
//! `<field>_id` column.
//!
//! The rstest fixtures open in-memory SQLite databases:
//!
//! ```rust,ignore
//! #[rstest]
//! #[tokio::test]
//! async fn test_something(#[future] memory_databases: Arc<ConnectionHandler>) {
//! 	let handler = memory_databases.await;
//! }
//! ```

use ferrule_conf::Settings;
use ferrule_db::{ConnectionHandler, DatabaseConnection, DatabaseError, ModelRegistry, Value};
use rstest::fixture;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
	#[error("Failed to read fixture {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid fixture JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid model identifier: '{0}'")]
	UnknownModel(String),

	#[error("{model} has no field named '{field}'")]
	UnknownField { model: String, field: String },

	#[error("Unsupported value for {model}.{field}: {value}")]
	UnsupportedValue {
		model: String,
		field: String,
		value: serde_json::Value,
	},

	#[error(transparent)]
	Database(#[from] DatabaseError),
}

#[derive(Debug, Deserialize)]
struct FixtureObject {
	model: String,
	#[serde(default)]
	pk: Option<i64>,
	#[serde(default)]
	fields: serde_json::Map<String, serde_json::Value>,
}

/// Insert every object of a JSON fixture into `conn`, returning how many were loaded
pub async fn load_fixture(
	registry: &ModelRegistry,
	conn: &DatabaseConnection,
	json: &str,
) -> Result<usize, FixtureError> {
	let objects: Vec<FixtureObject> = serde_json::from_str(json)?;
	let count = objects.len();

	for object in objects {
		let (app_label, model_name) = object
			.model
			.split_once('.')
			.ok_or_else(|| FixtureError::UnknownModel(object.model.clone()))?;
		let model = registry
			.get_model(app_label, model_name)
			.ok_or_else(|| FixtureError::UnknownModel(object.model.clone()))?;
		let meta = model.meta();

		let mut values: Vec<(String, Value)> = Vec::with_capacity(object.fields.len() + 1);
		if let Some(pk) = object.pk {
			values.push(("id".to_string(), pk.into()));
		}
		for (field, value) in object.fields {
			let column = meta
				.column_for_field(&field)
				.ok_or_else(|| FixtureError::UnknownField {
					model: object.model.clone(),
					field: field.clone(),
				})?;
			let value = json_to_value(&value).ok_or_else(|| FixtureError::UnsupportedValue {
				model: object.model.clone(),
				field: field.clone(),
				value: value.clone(),
			})?;
			values.push((column.name.clone(), value));
		}

		model.create(conn, values).await?;
	}

	tracing::debug!(db = %conn.alias(), count, "Loaded fixture");
	Ok(count)
}

/// [`load_fixture`] for a file on disk
pub async fn load_fixture_file(
	registry: &ModelRegistry,
	conn: &DatabaseConnection,
	path: impl AsRef<Path>,
) -> Result<usize, FixtureError> {
	let path = path.as_ref();
	let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
		path: path.display().to_string(),
		source,
	})?;
	load_fixture(registry, conn, &json).await
}

fn json_to_value(value: &serde_json::Value) -> Option<Value> {
	match value {
		serde_json::Value::Null => Some(Value::Int(None)),
		serde_json::Value::Bool(b) => Some((*b).into()),
		serde_json::Value::Number(n) => match n.as_i64() {
			Some(i) => Some(i.into()),
			None => n.as_f64().map(Into::into),
		},
		serde_json::Value::String(s) => Some(s.clone().into()),
		serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
	}
}

/// Settings with two in-memory SQLite databases, `default` and `other`
#[fixture]
pub fn memory_settings() -> Settings {
	Settings::in_memory(&["default", "other"])
}

/// Connections for [`memory_settings`]
#[fixture]
pub async fn memory_databases(memory_settings: Settings) -> Arc<ConnectionHandler> {
	let handler = ConnectionHandler::from_settings(&memory_settings)
		.await
		.expect("Failed to open in-memory databases");
	Arc::new(handler)
}

/// An empty model registry
#[fixture]
pub fn model_registry() -> Arc<ModelRegistry> {
	Arc::new(ModelRegistry::new())
}
