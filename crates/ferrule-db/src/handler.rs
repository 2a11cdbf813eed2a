//! All configured connections plus the active router

use crate::connection::DatabaseConnection;
use crate::error::{DatabaseError, Result};
use crate::models::ModelMeta;
use crate::router::{ConnectionRouter, DatabaseRouter, Hints};
use ferrule_conf::Settings;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// One [`DatabaseConnection`] per alias in `Settings::databases`
pub struct ConnectionHandler {
	connections: IndexMap<String, Arc<DatabaseConnection>>,
	router: RwLock<Arc<ConnectionRouter>>,
	settings: Settings,
}

impl ConnectionHandler {
	/// Open a connection for every configured alias
	pub async fn from_settings(settings: &Settings) -> Result<Self> {
		settings
			.validate()
			.map_err(|e| DatabaseError::Configuration(e.to_string()))?;

		let mut connections = IndexMap::new();
		for (alias, config) in &settings.databases {
			let conn = DatabaseConnection::connect(alias.clone(), config).await?;
			connections.insert(alias.clone(), Arc::new(conn));
		}
		tracing::info!(aliases = ?connections.keys().collect::<Vec<_>>(), "Database connections ready");

		Ok(Self {
			connections,
			router: RwLock::new(Arc::new(ConnectionRouter::default())),
			settings: settings.clone(),
		})
	}

	/// Same as [`ConnectionHandler::from_settings`] with a router list installed
	pub async fn with_routers(
		settings: &Settings,
		routers: Vec<Arc<dyn DatabaseRouter>>,
	) -> Result<Self> {
		let handler = Self::from_settings(settings).await?;
		*handler.router.write() = Arc::new(ConnectionRouter::new(routers));
		Ok(handler)
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn get(&self, alias: &str) -> Result<Arc<DatabaseConnection>> {
		self.connections
			.get(alias)
			.cloned()
			.ok_or_else(|| DatabaseError::UnknownAlias(alias.to_string()))
	}

	/// Configured aliases in declaration order
	pub fn aliases(&self) -> Vec<String> {
		self.connections.keys().cloned().collect()
	}

	pub fn all(&self) -> Vec<Arc<DatabaseConnection>> {
		self.connections.values().cloned().collect()
	}

	/// Snapshot of the active router
	pub fn router(&self) -> Arc<ConnectionRouter> {
		self.router.read().clone()
	}

	pub fn db_for_read(&self, model: &ModelMeta, hints: &Hints) -> String {
		self.router().db_for_read(model, hints)
	}

	pub fn db_for_write(&self, model: &ModelMeta, hints: &Hints) -> String {
		self.router().db_for_write(model, hints)
	}

	/// Install `routers` until the returned guard is dropped
	///
	/// ```rust,ignore
	/// {
	/// 	let _routers = handler.override_routers(vec![Arc::new(MasterSlaveRouter)]);
	/// 	// reads and writes follow MasterSlaveRouter here
	/// }
	/// // previous routers are back
	/// ```
	#[must_use = "the previous routers are restored as soon as the guard is dropped"]
	pub fn override_routers(&self, routers: Vec<Arc<dyn DatabaseRouter>>) -> RouterOverride<'_> {
		let replacement = Arc::new(ConnectionRouter::new(routers));
		let previous = std::mem::replace(&mut *self.router.write(), replacement);
		tracing::info!(
			routers = self.router.read().routers().len(),
			"Database routers overridden"
		);
		RouterOverride {
			handler: self,
			previous: Some(previous),
		}
	}

	/// Reset the query log of every connection
	pub fn reset_queries(&self) {
		for conn in self.connections.values() {
			conn.reset_queries();
		}
	}
}

impl std::fmt::Debug for ConnectionHandler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ConnectionHandler")
			.field("aliases", &self.aliases())
			.field("router", &self.router())
			.finish()
	}
}

/// Restores the routers that were active before
/// [`ConnectionHandler::override_routers`] when dropped
pub struct RouterOverride<'a> {
	handler: &'a ConnectionHandler,
	previous: Option<Arc<ConnectionRouter>>,
}

impl Drop for RouterOverride<'_> {
	fn drop(&mut self) {
		if let Some(previous) = self.previous.take() {
			*self.handler.router.write() = previous;
			tracing::info!("Database routers restored");
		}
	}
}
