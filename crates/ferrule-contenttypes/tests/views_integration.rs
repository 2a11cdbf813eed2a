//! Shortcut View Integration Tests
//!
//! These tests drive `/shortcut/<content_type_id>/<object_id>/` through the
//! test client against in-memory SQLite databases loaded with
//! `testdata.json`.
//!
//! **Test Coverage:**
//! - Redirects for objects with a canonical URL
//! - 404 for objects without one, bad primary keys and bad content types
//! - Site domain handling and already-absolute URLs
//! - Lazy content type creation for unregistered models
//!
//! **Fixtures Used:**
//! - app: databases, registry, content type manager and test client

mod common;

use common::{APP_LABEL, Article, Author, TestApp, setup, setup_default};
use ferrule_conf::Settings;
use ferrule_contenttypes::{ContentType, ContentTypeError, ShortcutView};
use ferrule_db::{Column, Model, ModelMeta, SqliteRow, objects};
use ferrule_http::Request;
use ferrule_test::{ResponseExt, assert_redirects};
use rstest::*;
use sqlx::Row;
use std::sync::Arc;

#[fixture]
async fn app() -> TestApp {
	setup_default().await
}

// ============================================================================
// Shortcut redirects
// ============================================================================

/// Test shortcut for objects with a canonical URL
///
/// **Test Intent**: Verify every Author redirects (302) to
/// `http://testserver<get_absolute_url>`, whose page is not routed (404)
///
/// **Integration Point**: UrlResolver → ShortcutView → ContentTypeManager → SQLite
///
/// **Not Intent**: Site domains, multi-database routing
#[rstest]
#[tokio::test]
async fn test_shortcut_with_absolute_url(#[future] app: TestApp) {
	let app = app.await;
	let default = app.handler.get("default").unwrap();
	let author_ct = app.manager.get_for_model::<Author>().await.unwrap();
	let authors = objects::<Author>(&default).all().await.unwrap();
	assert_eq!(authors.len(), 2);

	for author in authors {
		let short_url = format!("/shortcut/{}/{}/", author_ct.id, author.id);
		let response = app.client.get(&short_url).await.unwrap();

		let expected = format!("http://testserver{}", author.get_absolute_url().unwrap());
		assert_redirects(&app.client, &response, &expected, 302, 404).await;
	}
}

/// Test shortcut for objects without a canonical URL
///
/// **Test Intent**: Verify every Article (no get_absolute_url) yields 404
///
/// **Integration Point**: ShortcutView → ModelObject::absolute_url
///
/// **Not Intent**: Primary key parsing
#[rstest]
#[tokio::test]
async fn test_shortcut_no_absolute_url(#[future] app: TestApp) {
	let app = app.await;
	let default = app.handler.get("default").unwrap();
	let article_ct = app.manager.get_for_model::<Article>().await.unwrap();
	let articles = objects::<Article>(&default).all().await.unwrap();
	assert_eq!(articles.len(), 3);

	for article in articles {
		let short_url = format!("/shortcut/{}/{}/", article_ct.id, article.id);
		let response = app.client.get(&short_url).await.unwrap();

		response.assert_not_found();
	}
}

/// Test shortcut with a primary key of the wrong type
///
/// **Test Intent**: Verify a non-integer object id (`nobody/expects`) yields 404
///
/// **Integration Point**: ShortcutView → RegisteredModel::get_object
///
/// **Not Intent**: Missing rows
#[rstest]
#[tokio::test]
async fn test_wrong_type_pk(#[future] app: TestApp) {
	let app = app.await;
	let author_ct = app.manager.get_for_model::<Author>().await.unwrap();

	let short_url = format!("/shortcut/{}/{}/", author_ct.id, "nobody/expects");
	let response = app.client.get(&short_url).await.unwrap();

	assert_eq!(response.status_code(), 404);
}

/// Test shortcut with a primary key that matches no row
///
/// **Test Intent**: Verify object id `42424242` yields 404
///
/// **Integration Point**: ShortcutView → SQLite SELECT by id
///
/// **Not Intent**: Primary key parsing
#[rstest]
#[tokio::test]
async fn test_shortcut_bad_pk(#[future] app: TestApp) {
	let app = app.await;
	let author_ct = app.manager.get_for_model::<Author>().await.unwrap();

	let short_url = format!("/shortcut/{}/{}/", author_ct.id, "42424242");
	let response = app.client.get(&short_url).await.unwrap();

	assert_eq!(response.status_code(), 404);
}

/// Test shortcut with a non-integer content type id
///
/// **Test Intent**: Verify `/shortcut/spam/<pk>/` yields 404, and the view
/// itself rejects `spam` as a content type id
///
/// **Integration Point**: UrlResolver pattern → ShortcutView id parsing
///
/// **Not Intent**: Unknown integer ids
#[rstest]
#[tokio::test]
async fn test_nonint_content_type(#[future] app: TestApp) {
	let app = app.await;
	let default = app.handler.get("default").unwrap();
	let an_author = objects::<Author>(&default).all().await.unwrap().remove(0);

	let short_url = format!("/shortcut/{}/{}/", "spam", an_author.id);
	let response = app.client.get(&short_url).await.unwrap();
	assert_eq!(response.status_code(), 404);

	let view = ShortcutView::new(app.manager.clone(), app.registry.clone());
	let request = Request::builder().uri(&short_url).build().unwrap();
	let result = view
		.redirect_target(&request, "spam", &an_author.id.to_string())
		.await;
	assert!(matches!(result, Err(ContentTypeError::InvalidId(id)) if id == "spam"));
}

/// Test shortcut with an unknown content type id
///
/// **Test Intent**: Verify content type id `42424242` yields 404
///
/// **Integration Point**: ShortcutView → ContentTypeManager::get_for_id
///
/// **Not Intent**: Non-integer ids
#[rstest]
#[tokio::test]
async fn test_bad_content_type(#[future] app: TestApp) {
	let app = app.await;
	let default = app.handler.get("default").unwrap();
	let an_author = objects::<Author>(&default).all().await.unwrap().remove(0);

	let short_url = format!("/shortcut/{}/{}/", 42424242, an_author.id);
	let response = app.client.get(&short_url).await.unwrap();

	assert_eq!(response.status_code(), 404);
}

/// Test shortcut for a content type whose model is not installed
///
/// **Test Intent**: Verify a content type record without a registered model
/// yields 404
///
/// **Integration Point**: ShortcutView → ContentType::model_class
///
/// **Not Intent**: Stale content type removal
#[rstest]
#[tokio::test]
async fn test_shortcut_uninstalled_model(#[future] app: TestApp) {
	let app = app.await;
	let ghost = app
		.manager
		.get_for_meta(&ModelMeta::new("ghost_app", "Ghost"))
		.await
		.unwrap();

	let response = app.client.get(&format!("/shortcut/{}/1/", ghost.id)).await.unwrap();

	assert_eq!(response.status_code(), 404);
}

// ============================================================================
// Site domains
// ============================================================================

#[derive(Debug)]
struct Profile {
	id: i64,
	url: String,
	site: Option<String>,
}

impl Model for Profile {
	fn meta() -> ModelMeta {
		ModelMeta::new(APP_LABEL, "Profile")
			.with_columns([Column::text("url"), Column::text("site")])
	}

	fn pk(&self) -> i64 {
		self.id
	}

	fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
		Ok(Self {
			id: row.try_get("id")?,
			url: row.try_get("url")?,
			site: row.try_get("site")?,
		})
	}

	fn get_absolute_url(&self) -> Option<String> {
		Some(self.url.clone())
	}

	fn site_domain(&self) -> Option<String> {
		self.site.clone()
	}
}

async fn create_profile(app: &TestApp, url: &str, site: Option<&str>) -> (ContentType, i64) {
	app.registry.register::<Profile>();
	let default = app.handler.get("default").unwrap();
	ferrule_db::create_table(&default, &Profile::meta()).await.unwrap();
	let id = objects::<Profile>(&default)
		.create([
			("url", ferrule_db::Value::from(url)),
			("site", ferrule_db::Value::from(site.map(str::to_string))),
		])
		.await
		.unwrap();
	let ct = app.manager.get_for_model::<Profile>().await.unwrap();
	(ct, id)
}

/// Test shortcut with a configured site domain
///
/// **Test Intent**: Verify the configured site domain prefixes the redirect
/// using the request scheme
///
/// **Integration Point**: ShortcutView → Settings::site_domain
///
/// **Not Intent**: Object-specific domains
#[rstest]
#[tokio::test]
async fn test_shortcut_with_configured_site_domain() {
	let app = setup(Settings::in_memory(&["default", "other"]).with_site_domain("example.com")).await;
	let author_ct = app.manager.get_for_model::<Author>().await.unwrap();

	let response = app
		.client
		.get(&format!("/shortcut/{}/1/", author_ct.id))
		.await
		.unwrap();
	assert_eq!(response.location(), Some("http://example.com/views/authors/1/"));

	let secure = app.client.clone().secure(true);
	let response = secure.get(&format!("/shortcut/{}/2/", author_ct.id)).await.unwrap();
	assert_eq!(response.location(), Some("https://example.com/views/authors/2/"));
}

/// Test shortcut for an object tied to its own site
///
/// **Test Intent**: Verify the object's site domain wins over the configured one
///
/// **Integration Point**: ShortcutView → ModelObject::site_domain
///
/// **Not Intent**: Absolute canonical URLs
#[rstest]
#[tokio::test]
async fn test_shortcut_uses_object_site_domain() {
	let app = setup(Settings::in_memory(&["default", "other"]).with_site_domain("example.com")).await;
	let (ct, id) = create_profile(&app, "/profiles/boris/", Some("boris.example.org")).await;

	let response = app.client.get(&format!("/shortcut/{}/{}/", ct.id, id)).await.unwrap();

	assert_eq!(response.status_code(), 302);
	assert_eq!(response.location(), Some("http://boris.example.org/profiles/boris/"));
}

/// Test shortcut for an object whose canonical URL is already absolute
///
/// **Test Intent**: Verify http(s) URLs are redirected to unchanged
///
/// **Integration Point**: ShortcutView absolute URL detection
///
/// **Not Intent**: Domain resolution
#[rstest]
#[case("https://elsewhere.example.net/boris/")]
#[case("http://elsewhere.example.net/boris/")]
#[tokio::test]
async fn test_shortcut_absolute_url_passthrough(#[future] app: TestApp, #[case] url: &str) {
	let app = app.await;
	let (ct, id) = create_profile(&app, url, Some("ignored.example.org")).await;

	let response = app.client.get(&format!("/shortcut/{}/{}/", ct.id, id)).await.unwrap();

	assert_eq!(response.status_code(), 302);
	assert_eq!(response.location(), Some(url));
}

// ============================================================================
// Lazy content type creation
// ============================================================================

struct ModelCreatedOnTheFly;

impl Model for ModelCreatedOnTheFly {
	fn meta() -> ModelMeta {
		ModelMeta::new("my_great_app", "ModelCreatedOnTheFly")
			.with_verbose_name("a model created on the fly")
			.with_column(Column::text("name"))
	}

	fn pk(&self) -> i64 {
		0
	}

	fn from_row(_row: &SqliteRow) -> Result<Self, sqlx::Error> {
		Ok(Self)
	}
}

/// Test content type creation on the spot
///
/// **Test Intent**: Verify get_for_model creates the content type of a model
/// that was never registered, with its app label, lowercased class name and
/// verbose name
///
/// **Integration Point**: ContentTypeManager::get_for_model → SQLite INSERT
///
/// **Not Intent**: Synchronisation of registered models
#[rstest]
#[tokio::test]
async fn test_create_contenttype_on_the_spot(#[future] app: TestApp) {
	let app = app.await;

	let ct = app.manager.get_for_model::<ModelCreatedOnTheFly>().await.unwrap();

	assert_eq!(ct.app_label, "my_great_app");
	assert_eq!(ct.model, "modelcreatedonthefly");
	assert_eq!(ct.name, "a model created on the fly");
	assert_eq!(ct.to_string(), "a model created on the fly");
	assert!(app.registry.get_model("my_great_app", "modelcreatedonthefly").is_none());

	let again = app.manager.get_by_natural_key("my_great_app", "modelcreatedonthefly").await.unwrap();
	assert_eq!(again, ct);
}

/// Test loading an object through its content type
///
/// **Test Intent**: Verify get_object_for_this_type returns the Author row
/// and reports missing rows as ObjectNotFound
///
/// **Integration Point**: ContentType → ModelRegistry → SQLite
///
/// **Not Intent**: HTTP handling
#[rstest]
#[tokio::test]
async fn test_get_object_for_this_type(#[future] app: TestApp) {
	let app = app.await;
	let ct = app.manager.get_for_model::<Author>().await.unwrap();

	let boris = ct
		.get_object_for_this_type(&app.registry, &app.handler, "1")
		.await
		.unwrap();
	let missing = ct
		.get_object_for_this_type(&app.registry, &app.handler, "42424242")
		.await;

	assert_eq!(boris.pk_value(), 1);
	assert_eq!(boris.absolute_url().as_deref(), Some("/views/authors/1/"));
	assert_eq!(boris.model_meta().label_lower(), "contenttypes_tests.author");
	assert!(matches!(missing, Err(ContentTypeError::ObjectNotFound { .. })));
	assert_eq!(ct.model_class(&app.registry).unwrap().meta(), &Author::meta());
}

/// Test concurrent redirect lookups through one shared view
///
/// **Test Intent**: Verify two `redirect_target` calls on the same
/// `Arc<ShortcutView>` polled together each resolve their own object
///
/// **Not Intent**: Domain handling, covered above
#[rstest]
#[tokio::test]
async fn test_shortcut_view_is_shareable(#[future] app: TestApp) {
	let app = app.await;
	let view = Arc::new(ShortcutView::new(app.manager.clone(), app.registry.clone()));
	let ct = app.manager.get_for_model::<Author>().await.unwrap();
	let ct_id = ct.id.to_string();
	let request = Request::builder().uri("/").build().unwrap();

	let first = view.redirect_target(&request, &ct_id, "1");
	let second = view.redirect_target(&request, &ct_id, "2");
	let (first, second) = tokio::join!(first, second);

	assert_eq!(first.unwrap(), "/views/authors/1/");
	assert_eq!(second.unwrap(), "/views/authors/2/");
}
