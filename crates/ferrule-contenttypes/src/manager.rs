//! Cached access to content type records
//!
//! Lookups go to the database the router picks for reading
//! [`ContentType`]; missing records are created on the database it picks for
//! writing. Results are cached per read alias until
//! [`ContentTypeManager::clear_cache`].

use crate::error::{ContentTypeError, Result};
use crate::models::{CONTENT_TYPE_TABLE, ContentType};
use ferrule_db::{
	ConnectionHandler, DatabaseConnection, DatabaseError, Hints, Model, ModelMeta, objects,
};
use indexmap::IndexMap;
use parking_lot::RwLock;
use sea_query::{
	Alias, Condition, Expr, ExprTrait, OnConflict, Query, SelectStatement, SqliteQueryBuilder,
};
use std::collections::HashMap;
use std::sync::Arc;

type NaturalKey = (String, String);

#[derive(Debug, Default)]
struct AliasCache {
	by_key: HashMap<NaturalKey, ContentType>,
	by_id: HashMap<i64, ContentType>,
}

/// Manager for [`ContentType`] records across all configured databases
pub struct ContentTypeManager {
	handler: Arc<ConnectionHandler>,
	cache: RwLock<HashMap<String, AliasCache>>,
}

impl ContentTypeManager {
	pub fn new(handler: Arc<ConnectionHandler>) -> Self {
		Self {
			handler,
			cache: RwLock::new(HashMap::new()),
		}
	}

	pub fn handler(&self) -> &Arc<ConnectionHandler> {
		&self.handler
	}

	/// Content type for model `M`, created if it does not exist yet
	pub async fn get_for_model<M: Model>(&self) -> Result<ContentType> {
		self.get_for_meta(&M::meta()).await
	}

	/// Content type for the model described by `meta`
	///
	/// Models need not be registered anywhere: a record is created the first
	/// time an unknown model is looked up.
	pub async fn get_for_meta(&self, meta: &ModelMeta) -> Result<ContentType> {
		let read_db = self.read_db();
		let key = natural_key(meta);
		if let Some(ct) = self.cached_by_key(&read_db, &key) {
			return Ok(ct);
		}

		tracing::debug!(db = %read_db, model = %meta.label_lower(), "ContentType cache miss");
		let conn = self.handler.get(&read_db)?;
		let ct = match fetch_by_natural_key(&conn, &key).await? {
			Some(ct) => ct.with_db(read_db.as_str()),
			None => {
				let write_db = self.write_db();
				self.get_or_create(&write_db, meta).await?
			}
		};
		self.add_to_cache(&read_db, ct.clone());
		Ok(ct)
	}

	/// Content types for several models, keyed by `app_label.modelname`
	///
	/// Everything missing from the cache is fetched with a single query.
	pub async fn get_for_models(&self, metas: &[ModelMeta]) -> Result<IndexMap<String, ContentType>> {
		let read_db = self.read_db();
		let mut results = IndexMap::new();
		let mut needed: Vec<&ModelMeta> = Vec::new();

		for meta in metas {
			match self.cached_by_key(&read_db, &natural_key(meta)) {
				Some(ct) => {
					results.insert(meta.label_lower(), ct);
				}
				None => needed.push(meta),
			}
		}
		if needed.is_empty() {
			return Ok(results);
		}

		let conn = self.handler.get(&read_db)?;
		let mut condition = Condition::any();
		for meta in &needed {
			condition = condition.add(
				Condition::all()
					.add(Expr::col(Alias::new("app_label")).eq(meta.app_label.as_str()))
					.add(Expr::col(Alias::new("model")).eq(meta.model_name())),
			);
		}
		let sql = select_content_types().cond_where(condition).to_owned().to_string(SqliteQueryBuilder);
		let mut found: HashMap<NaturalKey, ContentType> = HashMap::new();
		for row in conn.fetch_all(&sql).await? {
			let ct = ContentType::from_row(&row)
				.map_err(DatabaseError::from)?
				.with_db(read_db.as_str());
			self.add_to_cache(&read_db, ct.clone());
			found.insert((ct.app_label.clone(), ct.model.clone()), ct);
		}

		for meta in needed {
			let ct = match found.remove(&natural_key(meta)) {
				Some(ct) => ct,
				None => {
					let write_db = self.write_db();
					let ct = self.get_or_create(&write_db, meta).await?;
					self.add_to_cache(&read_db, ct.clone());
					ct
				}
			};
			results.insert(meta.label_lower(), ct);
		}
		Ok(results)
	}

	/// Content type with primary key `id`
	pub async fn get_for_id(&self, id: i64) -> Result<ContentType> {
		let read_db = self.read_db();
		if let Some(ct) = self.cache.read().get(&read_db).and_then(|c| c.by_id.get(&id)).cloned() {
			return Ok(ct);
		}

		let conn = self.handler.get(&read_db)?;
		let ct = objects::<ContentType>(&conn)
			.get(id)
			.await?
			.ok_or_else(|| ContentTypeError::DoesNotExist(format!("id={}", id)))?
			.with_db(read_db.as_str());
		self.add_to_cache(&read_db, ct.clone());
		Ok(ct)
	}

	pub async fn get_by_natural_key(&self, app_label: &str, model: &str) -> Result<ContentType> {
		let read_db = self.read_db();
		let key = (app_label.to_string(), model.to_string());
		if let Some(ct) = self.cached_by_key(&read_db, &key) {
			return Ok(ct);
		}

		let conn = self.handler.get(&read_db)?;
		let ct = fetch_by_natural_key(&conn, &key)
			.await?
			.ok_or_else(|| ContentTypeError::DoesNotExist(format!("{}.{}", app_label, model)))?
			.with_db(read_db.as_str());
		self.add_to_cache(&read_db, ct.clone());
		Ok(ct)
	}

	/// Forget every cached content type on every database
	pub fn clear_cache(&self) {
		self.cache.write().clear();
	}

	/// Fetch the record for `meta` on `db`, inserting it if absent
	pub(crate) async fn get_or_create(&self, db: &str, meta: &ModelMeta) -> Result<ContentType> {
		let conn = self.handler.get(db)?;
		let key = natural_key(meta);
		if let Some(ct) = fetch_by_natural_key(&conn, &key).await? {
			return Ok(ct.with_db(db));
		}

		insert_content_type(&conn, meta).await?;
		fetch_by_natural_key(&conn, &key)
			.await?
			.map(|ct| ct.with_db(db))
			.ok_or_else(|| ContentTypeError::DoesNotExist(meta.label_lower()))
	}

	fn read_db(&self) -> String {
		self.handler.db_for_read(&ContentType::meta(), &Hints::default())
	}

	fn write_db(&self) -> String {
		self.handler.db_for_write(&ContentType::meta(), &Hints::default())
	}

	fn cached_by_key(&self, db: &str, key: &NaturalKey) -> Option<ContentType> {
		self.cache.read().get(db).and_then(|c| c.by_key.get(key)).cloned()
	}

	fn add_to_cache(&self, db: &str, ct: ContentType) {
		let mut cache = self.cache.write();
		let entry = cache.entry(db.to_string()).or_default();
		entry
			.by_key
			.insert((ct.app_label.clone(), ct.model.clone()), ct.clone());
		entry.by_id.insert(ct.id, ct);
	}
}

impl std::fmt::Debug for ContentTypeManager {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ContentTypeManager")
			.field("cache", &*self.cache.read())
			.finish_non_exhaustive()
	}
}

fn natural_key(meta: &ModelMeta) -> NaturalKey {
	(meta.app_label.clone(), meta.model_name())
}

fn select_content_types() -> SelectStatement {
	Query::select()
		.columns(ContentType::meta().column_names().into_iter().map(Alias::new))
		.from(Alias::new(CONTENT_TYPE_TABLE))
		.to_owned()
}

pub(crate) async fn fetch_by_natural_key(
	conn: &DatabaseConnection,
	key: &NaturalKey,
) -> Result<Option<ContentType>> {
	let sql = select_content_types()
		.and_where(Expr::col(Alias::new("app_label")).eq(key.0.as_str()))
		.and_where(Expr::col(Alias::new("model")).eq(key.1.as_str()))
		.to_owned()
		.to_string(SqliteQueryBuilder);
	match conn.fetch_optional(&sql).await? {
		Some(row) => Ok(Some(ContentType::from_row(&row).map_err(DatabaseError::from)?)),
		None => Ok(None),
	}
}

/// Insert the record for `meta`; a concurrent insert of the same key is not an error
pub(crate) async fn insert_content_type(conn: &DatabaseConnection, meta: &ModelMeta) -> Result<()> {
	let stmt = Query::insert()
		.into_table(Alias::new(CONTENT_TYPE_TABLE))
		.columns([Alias::new("name"), Alias::new("app_label"), Alias::new("model")])
		.values([
			Expr::val(meta.verbose_name()),
			Expr::val(meta.app_label.as_str()),
			Expr::val(meta.model_name()),
		])
		.map_err(|e| DatabaseError::Query(e.to_string()))?
		.on_conflict(
			OnConflict::columns([Alias::new("app_label"), Alias::new("model")])
				.do_nothing()
				.to_owned(),
		)
		.to_owned();
	let sql = stmt.to_string(SqliteQueryBuilder);
	conn.execute(&sql).await?;
	tracing::info!(
		db = %conn.alias(),
		model = %meta.label_lower(),
		name = %meta.verbose_name(),
		"Created content type"
	);
	Ok(())
}
