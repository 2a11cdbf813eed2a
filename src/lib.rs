//! # Ferrule
//!
//! A Django-style content types framework for Rust.
//!
//! Ferrule keeps one database record per installed model (a *content type*),
//! redirects `/shortcut/<content_type_id>/<object_id>/` to an object's
//! canonical URL, and routes reads and writes across several databases.
//!
//! ## Feature Flags
//!
//! - `core` - settings, HTTP types and URL dispatch
//! - `database` - connections, routers, models and content types
//! - `test` - test client, fixtures and assertions
//! - `full` (default) - everything
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use ferrule::prelude::*;
//! use std::sync::Arc;
//!
//! let settings = Settings::from_file("settings.toml")?;
//! let handler = Arc::new(ConnectionHandler::from_settings(&settings).await?);
//!
//! let registry = Arc::new(ModelRegistry::new());
//! registry.register::<ContentType>();
//! registry.register::<Author>();
//! create_tables(&registry, &handler).await?;
//!
//! let manager = Arc::new(ContentTypeManager::new(handler.clone()));
//! for alias in handler.aliases() {
//! 	create_contenttype_table(&*handler.get(&alias)?).await?;
//! 	update_contenttypes(&manager, &registry, &alias).await?;
//! }
//!
//! let urls = UrlResolver::new().with(re_path(
//! 	r"^shortcut/(?P<content_type_id>\d+)/(?P<object_id>.*)/$",
//! 	Arc::new(ShortcutView::new(manager, registry)),
//! )?);
//! let response = BaseHandler::new(Arc::new(urls)).get_response(request).await;
//! ```

#[cfg(feature = "core")]
pub mod conf;
#[cfg(feature = "database")]
pub mod contenttypes;
#[cfg(feature = "database")]
pub mod db;
#[cfg(feature = "core")]
pub mod http;
#[cfg(feature = "test")]
pub mod test;
#[cfg(feature = "core")]
pub mod urls;

#[cfg(feature = "core")]
pub use ferrule_conf::{DatabaseConfig, Settings, SettingsError};

#[cfg(feature = "core")]
pub use ferrule_http::{Error, Handler, Request, Response, StatusCode};

#[cfg(feature = "core")]
pub use ferrule_urls::{BaseHandler, UrlPattern, UrlResolver, re_path};

#[cfg(feature = "database")]
pub use ferrule_db::{
	ConnectionHandler, DatabaseConnection, DatabaseError, DatabaseRouter, Hints, Model, ModelMeta,
	ModelRegistry, RouterOverride,
};

#[cfg(feature = "database")]
pub use ferrule_contenttypes::{ContentType, ContentTypeError, ContentTypeManager, ShortcutView};

/// Prelude module for convenient imports
pub mod prelude {
	#[cfg(feature = "core")]
	pub use crate::{
		BaseHandler, DatabaseConfig, Error, Handler, Request, Response, Settings, StatusCode,
		UrlPattern, UrlResolver, re_path,
	};

	#[cfg(feature = "database")]
	pub use crate::{
		ConnectionHandler, ContentType, ContentTypeError, ContentTypeManager, DatabaseConnection,
		DatabaseError, DatabaseRouter, Hints, Model, ModelMeta, ModelRegistry, ShortcutView,
	};

	#[cfg(feature = "database")]
	pub use ferrule_db::{Column, ModelObject, create_tables, objects};

	#[cfg(feature = "database")]
	pub use ferrule_contenttypes::sync::{
		create_contenttype_table, remove_stale_contenttypes, update_contenttypes,
	};
}
