//! The content type record

use crate::error::{ContentTypeError, Result};
use ferrule_db::{
	Column, ConnectionHandler, Hints, Model, ModelMeta, ModelObject, ModelRegistry,
	RegisteredModel, SqliteRow,
};
use sqlx::Row;
use std::fmt;

pub const CONTENT_TYPE_TABLE: &str = "contenttypes_contenttype";

/// Identifies an installed model by `(app_label, model)`
///
/// A content type remembers the database it was loaded from, which is used
/// as the routing hint when fetching objects of its model.
#[derive(Debug, Clone)]
pub struct ContentType {
	pub id: i64,
	pub name: String,
	pub app_label: String,
	pub model: String,
	db: Option<String>,
}

impl ContentType {
	pub fn new(
		id: i64,
		name: impl Into<String>,
		app_label: impl Into<String>,
		model: impl Into<String>,
	) -> Self {
		Self {
			id,
			name: name.into(),
			app_label: app_label.into(),
			model: model.into(),
			db: None,
		}
	}

	pub(crate) fn with_db(mut self, db: impl Into<String>) -> Self {
		self.db = Some(db.into());
		self
	}

	/// Alias of the database this record was loaded from
	pub fn db(&self) -> Option<&str> {
		self.db.as_deref()
	}

	pub fn natural_key(&self) -> (&str, &str) {
		(&self.app_label, &self.model)
	}

	/// Installed model this content type stands for
	pub fn model_class(&self, registry: &ModelRegistry) -> Option<RegisteredModel> {
		registry.get_model(&self.app_label, &self.model)
	}

	/// Load the object of this type whose primary key is `raw_pk`
	///
	/// The object is read from the database the router picks for its model,
	/// with this content type's own database as hint.
	pub async fn get_object_for_this_type(
		&self,
		registry: &ModelRegistry,
		handler: &ConnectionHandler,
		raw_pk: &str,
	) -> Result<Box<dyn ModelObject>> {
		let model = self
			.model_class(registry)
			.ok_or_else(|| ContentTypeError::ModelNotInstalled(self.qualified_name()))?;
		let hints = Hints {
			instance_db: self.db.clone(),
		};
		let alias = handler.db_for_read(model.meta(), &hints);
		let conn = handler.get(&alias)?;

		model
			.get_object(&conn, raw_pk)
			.await?
			.ok_or_else(|| ContentTypeError::ObjectNotFound {
				content_type: self.qualified_name(),
				object_id: raw_pk.to_string(),
			})
	}

	/// `app_label.model`
	pub fn qualified_name(&self) -> String {
		format!("{}.{}", self.app_label, self.model)
	}
}

impl PartialEq for ContentType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
			&& self.name == other.name
			&& self.app_label == other.app_label
			&& self.model == other.model
	}
}

impl Eq for ContentType {}

impl fmt::Display for ContentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}

impl Model for ContentType {
	fn meta() -> ModelMeta {
		ModelMeta::new("contenttypes", "ContentType")
			.with_db_table(CONTENT_TYPE_TABLE)
			.with_columns([
				Column::text("name"),
				Column::text("app_label"),
				Column::text("model"),
			])
	}

	fn pk(&self) -> i64 {
		self.id
	}

	fn from_row(row: &SqliteRow) -> std::result::Result<Self, sqlx::Error> {
		Ok(Self::new(
			row.try_get::<i64, _>("id")?,
			row.try_get::<String, _>("name")?,
			row.try_get::<String, _>("app_label")?,
			row.try_get::<String, _>("model")?,
		))
	}
}

/// Split `"app_label.model"` into its parts
///
/// # Examples
///
/// ```
/// use ferrule_contenttypes::parse_qualified_name;
///
/// assert_eq!(parse_qualified_name("auth.user"), Some(("auth", "user")));
/// assert_eq!(parse_qualified_name("auth"), None);
/// assert_eq!(parse_qualified_name(".user"), None);
/// ```
pub fn parse_qualified_name(name: &str) -> Option<(&str, &str)> {
	let (app_label, model) = name.split_once('.')?;
	if app_label.is_empty() || model.is_empty() || model.contains('.') {
		return None;
	}
	Some((app_label, model))
}
