use hyper::StatusCode;

/// Errors a handler can return instead of a response
///
/// Each variant maps to an HTTP status; [`crate::Response`] implements
/// `From<Error>` so the request handler can turn any failure into a reply.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The requested resource does not exist (404)
	#[error("Not found: {0}")]
	NotFound(String),

	/// The request could not be built or understood (400)
	#[error("Bad request: {0}")]
	BadRequest(String),

	/// A database operation failed (500)
	#[error("Database error: {0}")]
	Database(String),

	/// Any other server-side failure (500)
	#[error("Internal server error: {0}")]
	Internal(String),
}

impl Error {
	/// HTTP status code for this error
	///
	/// # Examples
	///
	/// ```
	/// use ferrule_http::Error;
	///
	/// assert_eq!(Error::NotFound("gone".into()).status_code(), 404);
	/// assert_eq!(Error::Database("locked".into()).status_code(), 500);
	/// ```
	pub fn status_code(&self) -> u16 {
		self.status().as_u16()
	}

	/// HTTP status for this error
	pub fn status(&self) -> StatusCode {
		match self {
			Error::NotFound(_) => StatusCode::NOT_FOUND,
			Error::BadRequest(_) => StatusCode::BAD_REQUEST,
			Error::Database(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Shorthand for a 404 error
	pub fn not_found(message: impl Into<String>) -> Self {
		Error::NotFound(message.into())
	}
}

impl From<http::Error> for Error {
	fn from(error: http::Error) -> Self {
		Error::BadRequest(error.to_string())
	}
}

pub type Result<T> = std::result::Result<T, Error>;
