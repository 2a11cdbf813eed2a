//! # Ferrule ContentTypes
//!
//! Django-style content types: one database record per installed model,
//! looked up lazily and cached per database alias.
//!
//! ## Features
//!
//! - **Lazy registration**: [`ContentTypeManager::get_for_model`] creates the
//!   record the first time a model is seen
//! - **Multi-database support**: reads and writes follow the configured
//!   [`DatabaseRouter`](ferrule_db::DatabaseRouter)s, and each alias keeps
//!   its own cache
//! - **Synchronisation**: [`sync::update_contenttypes`] creates missing
//!   records and reports stale ones
//! - **Shortcut view**: [`ShortcutView`] redirects
//!   `/<content_type_id>/<object_id>/` to the object's canonical URL
//!
//! ## Example
//!
//! ```rust,ignore
//! use ferrule_contenttypes::ContentTypeManager;
//!
//! let manager = ContentTypeManager::new(handler.clone());
//! let ct = manager.get_for_model::<Author>().await?;
//! assert_eq!(ct.natural_key(), ("contenttypes_tests", "author"));
//! ```

pub mod error;
pub mod manager;
pub mod models;
pub mod sync;
pub mod views;

pub use error::{ContentTypeError, Result};
pub use manager::ContentTypeManager;
pub use models::{CONTENT_TYPE_TABLE, ContentType, parse_qualified_name};
pub use views::ShortcutView;
