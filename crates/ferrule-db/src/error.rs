//! Database error types

/// Errors raised by the database layer
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
	/// Driver-level failure
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	/// A statement could not be built
	#[error("Query build error: {0}")]
	Query(String),

	/// No connection is configured under this alias
	#[error("The connection '{0}' doesn't exist")]
	UnknownAlias(String),

	/// A primary key value could not be parsed for the model
	#[error("Invalid primary key {value:?} for {model}")]
	InvalidPrimaryKey { model: String, value: String },

	/// Invalid or unsupported configuration
	#[error("Configuration error: {0}")]
	Configuration(String),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
