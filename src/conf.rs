//! Settings module.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ferrule::conf::Settings;
//!
//! let settings = Settings::in_memory(&["default", "other"]).with_site_domain("example.com");
//! assert!(settings.validate().is_ok());
//! ```

pub use ferrule_conf::*;
