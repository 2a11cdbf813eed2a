//! Core settings types
//!
//! [`Settings`] mirrors the subset of a Django settings module that Ferrule
//! consumes: `DATABASES` (keyed by alias) and the site domain used when
//! building absolute redirect URLs.

mod database_config;

pub use database_config::DatabaseConfig;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Alias of the database used when no router expresses an opinion
pub const DEFAULT_DB_ALIAS: &str = "default";

/// Errors raised while loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to read settings file {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("DATABASES must define a 'default' alias")]
	MissingDefaultDatabase,

	#[error("Invalid setting '{key}': {message}")]
	Invalid { key: String, message: String },
}

/// Framework settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
	/// Database connections, keyed by alias. Order is preserved.
	#[serde(default)]
	pub databases: IndexMap<String, DatabaseConfig>,

	/// Domain of the current site, used by the content type shortcut view
	/// when an object does not name its own domain
	#[serde(default)]
	pub site_domain: Option<String>,

	/// Debug mode
	#[serde(default)]
	pub debug: bool,
}

impl Settings {
	/// Parse settings from a TOML document and validate them
	///
	/// # Examples
	///
	/// ```
	/// use ferrule_conf::Settings;
	///
	/// let settings = Settings::from_toml_str(
	///     r#"
	///     [databases.default]
	///     engine = "ferrule.db.backends.sqlite3"
	///     name = "app.db"
	///     "#,
	/// )
	/// .unwrap();
	/// assert_eq!(settings.databases["default"].name, "app.db");
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Settings = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Load settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.display().to_string(),
			source,
		})?;
		tracing::debug!(path = %path.display(), "loading settings");
		Self::from_toml_str(&source)
	}

	/// Settings with one in-memory SQLite database per alias
	///
	/// # Examples
	///
	/// ```
	/// use ferrule_conf::Settings;
	///
	/// let settings = Settings::in_memory(&["default", "other"]);
	/// assert_eq!(settings.databases.len(), 2);
	/// assert_eq!(settings.databases["other"].to_url(), "sqlite::memory:");
	/// ```
	pub fn in_memory(aliases: &[&str]) -> Self {
		let databases = aliases
			.iter()
			.map(|alias| (alias.to_string(), DatabaseConfig::sqlite(":memory:")))
			.collect();
		Self {
			databases,
			site_domain: None,
			debug: false,
		}
	}

	/// Set the site domain
	pub fn with_site_domain(mut self, domain: impl Into<String>) -> Self {
		self.site_domain = Some(domain.into());
		self
	}

	/// Check invariants that deserialization cannot express
	pub fn validate(&self) -> Result<(), SettingsError> {
		if !self.databases.contains_key(DEFAULT_DB_ALIAS) {
			return Err(SettingsError::MissingDefaultDatabase);
		}
		if let Some(domain) = &self.site_domain
			&& (domain.is_empty() || domain.contains('/'))
		{
			return Err(SettingsError::Invalid {
				key: "site_domain".to_string(),
				message: format!("'{}' is not a bare domain", domain),
			});
		}
		Ok(())
	}

	/// Get the configuration of a database alias
	pub fn database(&self, alias: &str) -> Option<&DatabaseConfig> {
		self.databases.get(alias)
	}
}

impl Default for Settings {
	fn default() -> Self {
		let mut databases = IndexMap::new();
		databases.insert(DEFAULT_DB_ALIAS.to_string(), DatabaseConfig::default());
		Self {
			databases,
			site_domain: None,
			debug: false,
		}
	}
}
