//! Keeping content type records in line with the installed models
//!
//! Run [`create_contenttype_table`] and [`update_contenttypes`] for each
//! database after its tables are created.

use crate::error::Result;
use crate::manager::{ContentTypeManager, insert_content_type};
use crate::models::{CONTENT_TYPE_TABLE, ContentType};
use ferrule_db::{DatabaseConnection, Model, ModelRegistry, create_table, objects};
use sea_query::{Alias, Expr, ExprTrait, Index, Query, SqliteQueryBuilder};
use std::collections::HashSet;

/// Create the content type table and its `(app_label, model)` unique index
pub async fn create_contenttype_table(conn: &DatabaseConnection) -> Result<()> {
	create_table(conn, &ContentType::meta()).await?;

	let index = Index::create()
		.if_not_exists()
		.name("contenttypes_contenttype_app_label_model_uniq")
		.table(Alias::new(CONTENT_TYPE_TABLE))
		.col(Alias::new("app_label"))
		.col(Alias::new("model"))
		.unique()
		.to_owned();
	conn.execute(&index.to_string(SqliteQueryBuilder)).await?;
	Ok(())
}

/// Create missing content types for every registered model on `alias`
///
/// Returns the stale records: content types on `alias` whose model is no
/// longer registered. Nothing happens when the router does not allow
/// migrating [`ContentType`] on `alias`.
pub async fn update_contenttypes(
	manager: &ContentTypeManager,
	registry: &ModelRegistry,
	alias: &str,
) -> Result<Vec<ContentType>> {
	let handler = manager.handler();
	if !handler.router().allow_migrate(alias, &ContentType::meta()) {
		tracing::debug!(db = %alias, "ContentType is not migrated on this database");
		return Ok(Vec::new());
	}

	manager.clear_cache();
	let conn = handler.get(alias)?;
	let existing = objects::<ContentType>(&conn).all().await?;
	let known: HashSet<(String, String)> = existing
		.iter()
		.map(|ct| (ct.app_label.clone(), ct.model.clone()))
		.collect();

	let models = registry.get_models();
	for model in &models {
		let meta = model.meta();
		if !known.contains(&(meta.app_label.clone(), meta.model_name())) {
			insert_content_type(&conn, meta).await?;
		}
	}

	let stale: Vec<ContentType> = existing
		.into_iter()
		.filter(|ct| registry.get_model(&ct.app_label, &ct.model).is_none())
		.map(|ct| ct.with_db(alias))
		.collect();
	for ct in &stale {
		tracing::warn!(db = %alias, content_type = %ct.qualified_name(), "Stale content type");
	}
	Ok(stale)
}

/// Delete `stale` content types from `alias`, returning the number of rows removed
pub async fn remove_stale_contenttypes(
	manager: &ContentTypeManager,
	alias: &str,
	stale: &[ContentType],
) -> Result<u64> {
	if stale.is_empty() {
		return Ok(0);
	}

	let conn = manager.handler().get(alias)?;
	let stmt = Query::delete()
		.from_table(Alias::new(CONTENT_TYPE_TABLE))
		.and_where(Expr::col(Alias::new("id")).is_in(stale.iter().map(|ct| ct.id)))
		.to_owned();
	let removed = conn.execute(&stmt.to_string(SqliteQueryBuilder)).await?;
	manager.clear_cache();
	tracing::info!(db = %alias, removed, "Removed stale content types");
	Ok(removed)
}
