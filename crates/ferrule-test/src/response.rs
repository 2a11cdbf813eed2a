//! Test response wrapper with assertion helpers

use bytes::Bytes;
use ferrule_http::{HeaderMap, Response, StatusCode};
use serde_json::Value;

/// A response captured by the test [`Client`](crate::Client)
#[derive(Debug, Clone)]
pub struct TestResponse {
	status: StatusCode,
	headers: HeaderMap,
	body: Bytes,
}

impl TestResponse {
	pub fn status(&self) -> StatusCode {
		self.status
	}

	pub fn status_code(&self) -> u16 {
		self.status.as_u16()
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	pub fn body(&self) -> &Bytes {
		&self.body
	}

	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).to_string()
	}

	pub fn json_value(&self) -> Result<Value, serde_json::Error> {
		serde_json::from_slice(&self.body)
	}

	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}

	/// Target of a redirect
	pub fn location(&self) -> Option<&str> {
		self.header("location")
	}

	pub fn is_redirect(&self) -> bool {
		self.status.is_redirection()
	}
}

impl From<Response> for TestResponse {
	fn from(response: Response) -> Self {
		Self {
			status: response.status,
			headers: response.headers,
			body: response.body,
		}
	}
}

/// Extension trait for response assertions
pub trait ResponseExt {
	fn assert_status(&self, expected: StatusCode) -> &Self;
	fn assert_ok(&self) -> &Self;
	fn assert_not_found(&self) -> &Self;
	/// Assert a redirect status and return the target
	fn assert_redirect(&self) -> &str;
}

impl ResponseExt for TestResponse {
	fn assert_status(&self, expected: StatusCode) -> &Self {
		assert_eq!(
			self.status,
			expected,
			"Expected status {}, got {}. Body: {}",
			expected,
			self.status,
			self.text()
		);
		self
	}

	fn assert_ok(&self) -> &Self {
		self.assert_status(StatusCode::OK)
	}

	fn assert_not_found(&self) -> &Self {
		self.assert_status(StatusCode::NOT_FOUND)
	}

	fn assert_redirect(&self) -> &str {
		assert!(
			self.is_redirect(),
			"Expected a redirect, got {}. Body: {}",
			self.status,
			self.text()
		);
		self.location()
			.expect("redirect response is missing its Location header")
	}
}
