//! # Ferrule DB
//!
//! The database layer used by Ferrule's content types:
//!
//! - [`DatabaseConnection`]: a SQLite pool per alias that records every
//!   statement it runs, so tests can count queries per database
//! - [`ConnectionHandler`]: all configured connections plus the active
//!   [`ConnectionRouter`]
//! - [`DatabaseRouter`]: pluggable policy choosing the database for reads,
//!   writes, relations and table creation
//! - [`models`]: model metadata, the installed-model registry, typed object
//!   access and table creation
//!
//! ## Example
//!
//! ```rust,no_run
//! use ferrule_conf::Settings;
//! use ferrule_db::ConnectionHandler;
//!
//! # async fn example() -> Result<(), ferrule_db::DatabaseError> {
//! let handler = ConnectionHandler::from_settings(&Settings::in_memory(&["default", "other"])).await?;
//! let default = handler.get("default")?;
//! default.execute("CREATE TABLE t (id INTEGER PRIMARY KEY)").await?;
//! assert_eq!(default.query_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod handler;
pub mod models;
pub mod router;

pub use connection::{CapturedQuery, DatabaseConnection};
pub use error::{DatabaseError, Result};
pub use ferrule_conf::DEFAULT_DB_ALIAS;
pub use handler::{ConnectionHandler, RouterOverride};
pub use models::{
	Column, ColumnKind, Model, ModelMeta, ModelObject, ModelRegistry, Objects, RegisteredModel,
	create_table, create_tables, objects,
};
pub use router::{BoundInstance, ConnectionRouter, DatabaseRouter, Hints};

pub use sea_query::Value;
pub use sqlx::sqlite::SqliteRow;
