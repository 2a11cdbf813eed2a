use ferrule_db::DatabaseError;

/// Errors raised while resolving content types and their objects
#[derive(Debug, thiserror::Error)]
pub enum ContentTypeError {
	#[error("ContentType matching query does not exist: {0}")]
	DoesNotExist(String),

	#[error("Invalid content type id: {0:?}")]
	InvalidId(String),

	#[error("Content type {0} has no installed model")]
	ModelNotInstalled(String),

	#[error("{content_type} object with primary key {object_id:?} does not exist")]
	ObjectNotFound {
		content_type: String,
		object_id: String,
	},

	#[error("{content_type} objects don't have a get_absolute_url() method")]
	NoAbsoluteUrl { content_type: String },

	#[error(transparent)]
	Database(#[from] DatabaseError),
}

impl ContentTypeError {
	/// Whether this error means the requested thing does not exist
	pub fn is_not_found(&self) -> bool {
		match self {
			ContentTypeError::Database(DatabaseError::InvalidPrimaryKey { .. }) => true,
			ContentTypeError::Database(_) => false,
			_ => true,
		}
	}
}

impl From<ContentTypeError> for ferrule_http::Error {
	fn from(error: ContentTypeError) -> Self {
		if error.is_not_found() {
			ferrule_http::Error::NotFound(error.to_string())
		} else {
			ferrule_http::Error::Database(error.to_string())
		}
	}
}

pub type Result<T> = std::result::Result<T, ContentTypeError>;
