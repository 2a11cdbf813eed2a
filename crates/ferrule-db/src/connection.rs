//! Database connections with query capture
//!
//! Each configured alias owns one [`DatabaseConnection`]. Every statement
//! that goes through it is counted and recorded, which is what query-count
//! assertions in tests observe.

use crate::error::{DatabaseError, Result};
use ferrule_conf::DatabaseConfig;
use parking_lot::Mutex;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

const FILE_POOL_SIZE: u32 = 5;

/// A statement executed on a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedQuery {
	pub sql: String,
	pub duration: Duration,
}

/// A named database connection backed by a SQLite pool
pub struct DatabaseConnection {
	alias: String,
	pool: Arc<SqlitePool>,
	queries: Mutex<Vec<CapturedQuery>>,
	query_count: AtomicUsize,
}

impl DatabaseConnection {
	/// Open the connection described by `config` under `alias`
	///
	/// In-memory databases keep exactly one pooled connection alive for the
	/// lifetime of the pool, otherwise their contents would vanish with it.
	pub async fn connect(alias: impl Into<String>, config: &DatabaseConfig) -> Result<Self> {
		let alias = alias.into();
		if !config.is_sqlite() {
			return Err(DatabaseError::Configuration(format!(
				"engine '{}' for database '{}' is not supported, only SQLite is available",
				config.engine, alias
			)));
		}

		let options = SqliteConnectOptions::from_str(&config.to_url())?.create_if_missing(true);
		let pool = if config.is_in_memory() {
			SqlitePoolOptions::new()
				.max_connections(1)
				.min_connections(1)
				.idle_timeout(None)
				.max_lifetime(None)
				.connect_with(options)
				.await?
		} else {
			SqlitePoolOptions::new()
				.max_connections(FILE_POOL_SIZE)
				.connect_with(options)
				.await?
		};

		tracing::debug!(alias = %alias, url = %config.to_url(), "Opened database connection");
		Ok(Self::from_pool(alias, Arc::new(pool)))
	}

	/// Wrap an existing pool
	pub fn from_pool(alias: impl Into<String>, pool: Arc<SqlitePool>) -> Self {
		Self {
			alias: alias.into(),
			pool,
			queries: Mutex::new(Vec::new()),
			query_count: AtomicUsize::new(0),
		}
	}

	pub fn alias(&self) -> &str {
		&self.alias
	}

	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	/// Run a statement that returns rows
	pub async fn fetch_all(&self, sql: &str) -> Result<Vec<SqliteRow>> {
		let started = Instant::now();
		let result = sqlx::query(sql).fetch_all(&*self.pool).await;
		self.record(sql, started.elapsed());
		Ok(result?)
	}

	/// Run a statement that returns at most one row
	pub async fn fetch_optional(&self, sql: &str) -> Result<Option<SqliteRow>> {
		let started = Instant::now();
		let result = sqlx::query(sql).fetch_optional(&*self.pool).await;
		self.record(sql, started.elapsed());
		Ok(result?)
	}

	/// Run a statement and return the number of affected rows
	pub async fn execute(&self, sql: &str) -> Result<u64> {
		let started = Instant::now();
		let result = sqlx::query(sql).execute(&*self.pool).await;
		self.record(sql, started.elapsed());
		Ok(result?.rows_affected())
	}

	/// Run an `INSERT` and return the id of the new row
	pub async fn insert(&self, sql: &str) -> Result<i64> {
		let started = Instant::now();
		let result = sqlx::query(sql).execute(&*self.pool).await;
		self.record(sql, started.elapsed());
		Ok(result?.last_insert_rowid())
	}

	/// Number of statements executed since creation or the last reset
	pub fn query_count(&self) -> usize {
		self.query_count.load(Ordering::SeqCst)
	}

	pub fn captured_queries(&self) -> Vec<CapturedQuery> {
		self.queries.lock().clone()
	}

	pub fn reset_queries(&self) {
		let mut queries = self.queries.lock();
		queries.clear();
		self.query_count.store(0, Ordering::SeqCst);
	}

	fn record(&self, sql: &str, duration: Duration) {
		tracing::debug!(alias = %self.alias, ?duration, "{}", sql);
		self.queries.lock().push(CapturedQuery {
			sql: sql.to_string(),
			duration,
		});
		self.query_count.fetch_add(1, Ordering::SeqCst);
	}
}

impl std::fmt::Debug for DatabaseConnection {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DatabaseConnection")
			.field("alias", &self.alias)
			.field("query_count", &self.query_count())
			.finish()
	}
}
