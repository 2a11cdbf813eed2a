//! Registry of installed models
//!
//! Maps `(app_label, model_name)` to the model's metadata and a type-erased
//! loader, so code that only knows a model by name (content types, fixtures)
//! can still fetch its rows.

use super::meta::{Model, ModelMeta, ModelObject};
use super::objects::{insert_row, objects};
use crate::connection::DatabaseConnection;
use crate::error::{DatabaseError, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use sea_query::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

#[async_trait]
trait ObjectLoader: Send + Sync {
	async fn load(
		&self,
		conn: &DatabaseConnection,
		pk: i64,
	) -> Result<Option<Box<dyn ModelObject>>>;
}

struct TypedLoader<M>(PhantomData<fn() -> M>);

#[async_trait]
impl<M: Model> ObjectLoader for TypedLoader<M> {
	async fn load(
		&self,
		conn: &DatabaseConnection,
		pk: i64,
	) -> Result<Option<Box<dyn ModelObject>>> {
		let object = objects::<M>(conn).get(pk).await?;
		Ok(object.map(|o| Box::new(o) as Box<dyn ModelObject>))
	}
}

/// A model known to the registry
#[derive(Clone)]
pub struct RegisteredModel {
	meta: ModelMeta,
	loader: Arc<dyn ObjectLoader>,
}

impl RegisteredModel {
	fn of<M: Model>() -> Self {
		Self {
			meta: M::meta(),
			loader: Arc::new(TypedLoader::<M>(PhantomData)),
		}
	}

	pub fn meta(&self) -> &ModelMeta {
		&self.meta
	}

	/// Load the instance whose primary key is `raw_pk`
	///
	/// Returns [`DatabaseError::InvalidPrimaryKey`] when `raw_pk` is not an
	/// integer and `Ok(None)` when no such row exists.
	pub async fn get_object(
		&self,
		conn: &DatabaseConnection,
		raw_pk: &str,
	) -> Result<Option<Box<dyn ModelObject>>> {
		let pk = raw_pk
			.parse::<i64>()
			.map_err(|_| DatabaseError::InvalidPrimaryKey {
				model: self.meta.label(),
				value: raw_pk.to_string(),
			})?;
		self.loader.load(conn, pk).await
	}

	/// Insert a row into this model's table and return its primary key
	pub async fn create<K>(
		&self,
		conn: &DatabaseConnection,
		values: impl IntoIterator<Item = (K, Value)>,
	) -> Result<i64>
	where
		K: AsRef<str>,
	{
		insert_row(conn, &self.meta, values).await
	}
}

impl fmt::Debug for RegisteredModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RegisteredModel")
			.field("meta", &self.meta)
			.finish_non_exhaustive()
	}
}

/// Installed models, in registration order
#[derive(Default)]
pub struct ModelRegistry {
	models: RwLock<IndexMap<(String, String), RegisteredModel>>,
}

impl ModelRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Install model `M`, replacing any model registered under the same name
	pub fn register<M: Model>(&self) {
		let model = RegisteredModel::of::<M>();
		let key = (model.meta.app_label.clone(), model.meta.model_name());
		tracing::debug!(model = %model.meta, "Registering model");
		self.models.write().insert(key, model);
	}

	/// Look a model up by app label and model name (case-insensitive)
	pub fn get_model(&self, app_label: &str, model_name: &str) -> Option<RegisteredModel> {
		self.models
			.read()
			.get(&(app_label.to_string(), model_name.to_lowercase()))
			.cloned()
	}

	pub fn get_models(&self) -> Vec<RegisteredModel> {
		self.models.read().values().cloned().collect()
	}

	pub fn get_app_models(&self, app_label: &str) -> Vec<RegisteredModel> {
		self.models
			.read()
			.values()
			.filter(|m| m.meta.app_label == app_label)
			.cloned()
			.collect()
	}

	pub fn is_installed(&self, app_label: &str) -> bool {
		self.models
			.read()
			.keys()
			.any(|(label, _)| label == app_label)
	}
}

impl fmt::Debug for ModelRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let labels: Vec<String> = self.models.read().values().map(|m| m.meta.label()).collect();
		f.debug_struct("ModelRegistry").field("models", &labels).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::{Column, create_table};
	use ferrule_conf::DatabaseConfig;
	use rstest::{fixture, rstest};
	use sqlx::Row;
	use sqlx::sqlite::SqliteRow;

	#[derive(Debug, Clone, PartialEq)]
	struct Widget {
		id: i64,
		label: String,
	}

	impl Model for Widget {
		fn meta() -> ModelMeta {
			ModelMeta::new("inventory", "Widget").with_column(Column::text("label"))
		}

		fn pk(&self) -> i64 {
			self.id
		}

		fn from_row(row: &SqliteRow) -> std::result::Result<Self, sqlx::Error> {
			Ok(Self {
				id: row.try_get("id")?,
				label: row.try_get("label")?,
			})
		}

		fn get_absolute_url(&self) -> Option<String> {
			Some(format!("/widgets/{}/", self.id))
		}
	}

	#[fixture]
	fn registry() -> ModelRegistry {
		let registry = ModelRegistry::new();
		registry.register::<Widget>();
		registry
	}

	async fn widget_db() -> DatabaseConnection {
		let conn = DatabaseConnection::connect("default", &DatabaseConfig::sqlite(":memory:"))
			.await
			.unwrap();
		create_table(&conn, &Widget::meta()).await.unwrap();
		conn
	}

	#[rstest]
	fn test_lookup_is_case_insensitive_on_model_name(registry: ModelRegistry) {
		assert!(registry.get_model("inventory", "Widget").is_some());
		assert!(registry.get_model("inventory", "widget").is_some());
		assert!(registry.get_model("other_app", "widget").is_none());
		assert!(registry.get_model("Inventory", "widget").is_none());
		assert!(registry.is_installed("inventory"));
		assert!(!registry.is_installed("other_app"));
		assert_eq!(registry.get_app_models("inventory").len(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_get_object_loads_instance(registry: ModelRegistry) {
		// Arrange
		let conn = widget_db().await;
		let model = registry.get_model("inventory", "widget").unwrap();
		let pk = model
			.create(&conn, [("label", Value::from("sprocket"))])
			.await
			.unwrap();

		// Act
		let object = model.get_object(&conn, &pk.to_string()).await.unwrap();

		// Assert
		let object = object.expect("widget should exist");
		assert_eq!(object.pk_value(), pk);
		assert_eq!(object.absolute_url(), Some(format!("/widgets/{}/", pk)));
		assert_eq!(object.model_meta().label(), "inventory.Widget");
	}

	#[rstest]
	#[tokio::test]
	async fn test_get_object_missing_row(registry: ModelRegistry) {
		let conn = widget_db().await;
		let model = registry.get_model("inventory", "widget").unwrap();

		let object = model.get_object(&conn, "42424242").await.unwrap();

		assert!(object.is_none());
	}

	#[rstest]
	#[case("nobody/expects")]
	#[case("")]
	#[case("1.5")]
	#[tokio::test]
	async fn test_get_object_invalid_pk(registry: ModelRegistry, #[case] raw_pk: &str) {
		let conn = widget_db().await;
		let model = registry.get_model("inventory", "widget").unwrap();

		let result = model.get_object(&conn, raw_pk).await;

		assert!(matches!(
			result,
			Err(DatabaseError::InvalidPrimaryKey { ref value, .. }) if value == raw_pk
		));
	}

	#[rstest]
	#[tokio::test]
	async fn test_typed_objects() {
		let conn = widget_db().await;
		objects::<Widget>(&conn)
			.create([("label", Value::from("a"))])
			.await
			.unwrap();
		objects::<Widget>(&conn)
			.create([("id", Value::from(10i64)), ("label", Value::from("b"))])
			.await
			.unwrap();

		let all = objects::<Widget>(&conn).all().await.unwrap();
		let count = objects::<Widget>(&conn).count().await.unwrap();

		assert_eq!(count, 2);
		assert_eq!(
			all,
			vec![
				Widget { id: 1, label: "a".to_string() },
				Widget { id: 10, label: "b".to_string() },
			]
		);
	}
}
