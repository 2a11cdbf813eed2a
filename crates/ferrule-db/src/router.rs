//! Multi-database routing
//!
//! A [`ConnectionRouter`] asks each configured [`DatabaseRouter`] in turn
//! which database to use for a model; the first router with an opinion wins.
//!
//! ```
//! use ferrule_db::{ConnectionRouter, DatabaseRouter, Hints, ModelMeta};
//! use std::sync::Arc;
//!
//! struct ReplicaRouter;
//!
//! impl DatabaseRouter for ReplicaRouter {
//! 	fn db_for_read(&self, _model: &ModelMeta, _hints: &Hints) -> Option<String> {
//! 		Some("replica".to_string())
//! 	}
//! }
//!
//! let router = ConnectionRouter::new(vec![Arc::new(ReplicaRouter)]);
//! let meta = ModelMeta::new("blog", "Post");
//!
//! assert_eq!(router.db_for_read(&meta, &Hints::default()), "replica");
//! assert_eq!(router.db_for_write(&meta, &Hints::default()), "default");
//! ```

use crate::models::ModelMeta;
use ferrule_conf::DEFAULT_DB_ALIAS;
use std::fmt;
use std::sync::Arc;

/// Extra information passed to routers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hints {
	/// Database the instance involved in the operation was loaded from
	pub instance_db: Option<String>,
}

impl Hints {
	pub fn instance(db: impl Into<String>) -> Self {
		Self {
			instance_db: Some(db.into()),
		}
	}
}

/// An instance taking part in a relation check
#[derive(Debug, Clone, Copy)]
pub struct BoundInstance<'a> {
	pub model: &'a ModelMeta,
	/// Database the instance was loaded from
	pub db: &'a str,
}

/// Routing policy; every method returns `None` when the router has no opinion
pub trait DatabaseRouter: Send + Sync {
	fn db_for_read(&self, _model: &ModelMeta, _hints: &Hints) -> Option<String> {
		None
	}

	fn db_for_write(&self, _model: &ModelMeta, _hints: &Hints) -> Option<String> {
		None
	}

	fn allow_relation(&self, _first: BoundInstance<'_>, _second: BoundInstance<'_>) -> Option<bool> {
		None
	}

	fn allow_migrate(&self, _db: &str, _model: &ModelMeta) -> Option<bool> {
		None
	}
}

/// An ordered list of routers with the framework defaults as fallback
#[derive(Clone, Default)]
pub struct ConnectionRouter {
	routers: Vec<Arc<dyn DatabaseRouter>>,
}

impl ConnectionRouter {
	pub fn new(routers: Vec<Arc<dyn DatabaseRouter>>) -> Self {
		Self { routers }
	}

	pub fn routers(&self) -> &[Arc<dyn DatabaseRouter>] {
		&self.routers
	}

	pub fn db_for_read(&self, model: &ModelMeta, hints: &Hints) -> String {
		self.routers
			.iter()
			.find_map(|r| r.db_for_read(model, hints))
			.unwrap_or_else(|| Self::fallback(hints))
	}

	pub fn db_for_write(&self, model: &ModelMeta, hints: &Hints) -> String {
		self.routers
			.iter()
			.find_map(|r| r.db_for_write(model, hints))
			.unwrap_or_else(|| Self::fallback(hints))
	}

	/// Without an opinion, instances may only be related on the same database
	pub fn allow_relation(&self, first: BoundInstance<'_>, second: BoundInstance<'_>) -> bool {
		self.routers
			.iter()
			.find_map(|r| r.allow_relation(first, second))
			.unwrap_or(first.db == second.db)
	}

	pub fn allow_migrate(&self, db: &str, model: &ModelMeta) -> bool {
		self.routers
			.iter()
			.find_map(|r| r.allow_migrate(db, model))
			.unwrap_or(true)
	}

	fn fallback(hints: &Hints) -> String {
		hints
			.instance_db
			.clone()
			.unwrap_or_else(|| DEFAULT_DB_ALIAS.to_string())
	}
}

impl fmt::Debug for ConnectionRouter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConnectionRouter")
			.field("routers", &self.routers.len())
			.finish()
	}
}
