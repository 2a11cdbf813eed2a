use sqlx::sqlite::SqliteRow;
use std::fmt;

/// Storage kind of a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
	Integer,
	Text,
	/// Integer column referencing the `id` of another table
	ForeignKey(String),
}

/// A non-primary-key column of a model table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
	pub name: String,
	pub kind: ColumnKind,
}

impl Column {
	pub fn integer(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: ColumnKind::Integer,
		}
	}

	pub fn text(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: ColumnKind::Text,
		}
	}

	pub fn foreign_key(name: impl Into<String>, table: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: ColumnKind::ForeignKey(table.into()),
		}
	}

	/// Whether this column stores the value of the model field `field`
	///
	/// Foreign keys are stored as `<field>_id`.
	pub fn stores_field(&self, field: &str) -> bool {
		if self.name == field {
			return true;
		}
		matches!(self.kind, ColumnKind::ForeignKey(_))
			&& self.name.strip_suffix("_id") == Some(field)
	}
}

/// Static description of a model
///
/// The primary key is always an integer column named `id` and is not part of
/// [`ModelMeta::columns`].
///
/// # Examples
///
/// ```
/// use ferrule_db::{Column, ModelMeta};
///
/// let meta = ModelMeta::new("blog", "BlogPost").with_column(Column::text("title"));
///
/// assert_eq!(meta.model_name(), "blogpost");
/// assert_eq!(meta.verbose_name(), "blog post");
/// assert_eq!(meta.db_table(), "blog_blogpost");
/// assert_eq!(meta.label(), "blog.BlogPost");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMeta {
	pub app_label: String,
	pub object_name: String,
	verbose_name: Option<String>,
	db_table: Option<String>,
	columns: Vec<Column>,
}

impl ModelMeta {
	pub fn new(app_label: impl Into<String>, object_name: impl Into<String>) -> Self {
		Self {
			app_label: app_label.into(),
			object_name: object_name.into(),
			verbose_name: None,
			db_table: None,
			columns: Vec::new(),
		}
	}

	pub fn with_verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
		self.verbose_name = Some(verbose_name.into());
		self
	}

	pub fn with_db_table(mut self, db_table: impl Into<String>) -> Self {
		self.db_table = Some(db_table.into());
		self
	}

	pub fn with_column(mut self, column: Column) -> Self {
		self.columns.push(column);
		self
	}

	pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
		self.columns.extend(columns);
		self
	}

	/// Lowercased object name
	pub fn model_name(&self) -> String {
		self.object_name.to_lowercase()
	}

	/// Human readable name, derived from the object name unless set explicitly
	pub fn verbose_name(&self) -> String {
		match &self.verbose_name {
			Some(name) => name.clone(),
			None => camel_case_to_spaces(&self.object_name),
		}
	}

	pub fn db_table(&self) -> String {
		match &self.db_table {
			Some(table) => table.clone(),
			None => format!("{}_{}", self.app_label, self.model_name()),
		}
	}

	pub fn columns(&self) -> &[Column] {
		&self.columns
	}

	/// All column names, primary key first
	pub fn column_names(&self) -> Vec<String> {
		std::iter::once("id".to_string())
			.chain(self.columns.iter().map(|c| c.name.clone()))
			.collect()
	}

	/// Column holding the value of model field `field`
	pub fn column_for_field(&self, field: &str) -> Option<&Column> {
		self.columns.iter().find(|c| c.stores_field(field))
	}

	/// `app_label.ObjectName`
	pub fn label(&self) -> String {
		format!("{}.{}", self.app_label, self.object_name)
	}

	/// `app_label.modelname`
	pub fn label_lower(&self) -> String {
		format!("{}.{}", self.app_label, self.model_name())
	}
}

impl fmt::Display for ModelMeta {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.label())
	}
}

/// `ModelCreatedOnTheFly` -> `model created on the fly`, `HTTPResponse` -> `http response`
fn camel_case_to_spaces(value: &str) -> String {
	let chars: Vec<char> = value.chars().collect();
	let mut out = String::with_capacity(value.len() + 4);
	for (i, c) in chars.iter().enumerate() {
		if c.is_uppercase() {
			let after_lower = i > 0 && chars[i - 1].is_lowercase();
			let before_lower = chars.get(i + 1).is_some_and(|next| !next.is_uppercase());
			if after_lower || before_lower {
				out.push(' ');
			}
		}
		out.extend(c.to_lowercase());
	}
	out.trim().to_string()
}

/// A model class: table metadata plus row mapping
pub trait Model: Send + Sync + Sized + 'static {
	fn meta() -> ModelMeta;

	fn pk(&self) -> i64;

	/// Build an instance from a row selected with [`ModelMeta::column_names`]
	fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;

	/// Canonical URL of this object, if it has one
	fn get_absolute_url(&self) -> Option<String> {
		None
	}

	/// Domain of the site this object belongs to, if it is tied to one
	fn site_domain(&self) -> Option<String> {
		None
	}
}

/// Object-safe view of a loaded model instance
pub trait ModelObject: Send + Sync {
	fn pk_value(&self) -> i64;
	fn absolute_url(&self) -> Option<String>;
	fn site_domain(&self) -> Option<String>;
	fn model_meta(&self) -> ModelMeta;
}

impl<M: Model> ModelObject for M {
	fn pk_value(&self) -> i64 {
		Model::pk(self)
	}

	fn absolute_url(&self) -> Option<String> {
		Model::get_absolute_url(self)
	}

	fn site_domain(&self) -> Option<String> {
		Model::site_domain(self)
	}

	fn model_meta(&self) -> ModelMeta {
		M::meta()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("ModelCreatedOnTheFly", "model created on the fly")]
	#[case("Author", "author")]
	#[case("ContentType", "content type")]
	#[case("HTTPResponse", "http response")]
	#[case("lowercase", "lowercase")]
	fn test_camel_case_to_spaces(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(camel_case_to_spaces(input), expected);
	}

	#[rstest]
	fn test_explicit_verbose_name_and_table() {
		let meta = ModelMeta::new("my_great_app", "ModelCreatedOnTheFly")
			.with_verbose_name("a model created on the fly")
			.with_db_table("fly");

		assert_eq!(meta.verbose_name(), "a model created on the fly");
		assert_eq!(meta.db_table(), "fly");
		assert_eq!(meta.label_lower(), "my_great_app.modelcreatedonthefly");
	}

	#[rstest]
	fn test_column_for_field_follows_foreign_keys() {
		let meta = ModelMeta::new("contenttypes_tests", "Article").with_columns([
			Column::text("title"),
			Column::foreign_key("author_id", "contenttypes_tests_author"),
		]);

		assert_eq!(meta.column_for_field("title").unwrap().name, "title");
		assert_eq!(meta.column_for_field("author").unwrap().name, "author_id");
		assert_eq!(meta.column_for_field("author_id").unwrap().name, "author_id");
		assert!(meta.column_for_field("slug").is_none());
		assert_eq!(meta.column_names(), vec!["id", "title", "author_id"]);
	}
}
