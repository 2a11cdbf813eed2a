//! # Ferrule Configuration
//!
//! Django-inspired settings for Ferrule applications.
//!
//! Settings are plain data: a map of database aliases to connection
//! configurations, plus a handful of framework-wide options. They can be
//! built in code or loaded from a TOML file.
//!
//! ## Example
//!
//! ```
//! use ferrule_conf::Settings;
//!
//! let settings = Settings::from_toml_str(
//!     r#"
//!     site_domain = "example.com"
//!
//!     [databases.default]
//!     engine = "ferrule.db.backends.sqlite3"
//!     name = ":memory:"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.site_domain.as_deref(), Some("example.com"));
//! assert!(settings.database("default").is_some());
//! ```

pub mod settings;

pub use settings::{DEFAULT_DB_ALIAS, DatabaseConfig, Settings, SettingsError};
