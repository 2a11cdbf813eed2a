//! Shared setup for content type integration tests

#![allow(dead_code)]

use ferrule_conf::Settings;
use ferrule_contenttypes::sync::{create_contenttype_table, update_contenttypes};
use ferrule_contenttypes::{ContentType, ContentTypeManager, ShortcutView};
use ferrule_db::{
	Column, ConnectionHandler, Model, ModelMeta, ModelRegistry, SqliteRow, create_tables,
};
use ferrule_test::logging::init_test_logging;
use ferrule_test::fixtures::{memory_databases, memory_settings, model_registry};
use ferrule_test::{Client, load_fixture_file};
use ferrule_urls::{UrlResolver, re_path};
use sqlx::Row;
use std::path::PathBuf;
use std::sync::Arc;

pub const APP_LABEL: &str = "contenttypes_tests";

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
	pub id: i64,
	pub name: String,
}

impl Model for Author {
	fn meta() -> ModelMeta {
		ModelMeta::new(APP_LABEL, "Author").with_column(Column::text("name"))
	}

	fn pk(&self) -> i64 {
		self.id
	}

	fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
		Ok(Self {
			id: row.try_get("id")?,
			name: row.try_get("name")?,
		})
	}

	fn get_absolute_url(&self) -> Option<String> {
		Some(format!("/views/authors/{}/", self.id))
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
	pub id: i64,
	pub title: String,
	pub slug: String,
	pub author_id: i64,
	pub date_created: String,
}

impl Model for Article {
	fn meta() -> ModelMeta {
		ModelMeta::new(APP_LABEL, "Article").with_columns([
			Column::text("title"),
			Column::text("slug"),
			Column::foreign_key("author_id", "contenttypes_tests_author"),
			Column::text("date_created"),
		])
	}

	fn pk(&self) -> i64 {
		self.id
	}

	fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
		Ok(Self {
			id: row.try_get("id")?,
			title: row.try_get("title")?,
			slug: row.try_get("slug")?,
			author_id: row.try_get("author_id")?,
			date_created: row.try_get("date_created")?,
		})
	}
}

/// Everything a content types test needs: databases, models, manager and client
pub struct TestApp {
	pub handler: Arc<ConnectionHandler>,
	pub registry: Arc<ModelRegistry>,
	pub manager: Arc<ContentTypeManager>,
	pub client: Client,
}

pub fn testdata_path() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/testdata.json")
}

/// Two in-memory databases with tables and content types on both, and the
/// `testdata.json` fixture loaded into `default`
pub async fn setup(settings: Settings) -> TestApp {
	init_test_logging();

	let handler = memory_databases(settings).await;
	let registry = model_registry();
	registry.register::<ContentType>();
	registry.register::<Author>();
	registry.register::<Article>();
	let manager = Arc::new(ContentTypeManager::new(handler.clone()));

	create_tables(&registry, &handler)
		.await
		.expect("Failed to create tables");
	for alias in handler.aliases() {
		let conn = handler.get(&alias).unwrap();
		create_contenttype_table(&conn)
			.await
			.expect("Failed to create content type table");
		update_contenttypes(&manager, &registry, &alias)
			.await
			.expect("Failed to create content types");
	}

	let default = handler.get("default").unwrap();
	load_fixture_file(&registry, &default, testdata_path())
		.await
		.expect("Failed to load testdata.json");

	let shortcut = Arc::new(ShortcutView::new(manager.clone(), registry.clone()));
	let urls = UrlResolver::new().with(
		re_path(
			r"^shortcut/(?P<content_type_id>\d+)/(?P<object_id>.*)/$",
			shortcut,
		)
		.expect("Invalid shortcut pattern"),
	);
	let client = Client::new(Arc::new(urls));

	handler.reset_queries();
	TestApp {
		handler,
		registry,
		manager,
		client,
	}
}

pub async fn setup_default() -> TestApp {
	setup(memory_settings()).await
}
