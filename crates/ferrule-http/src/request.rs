//! HTTP request representation
//!
//! Requests are built with [`Request::builder`]; routers attach the values
//! captured from the URL as path parameters before calling a view.

mod methods;
mod params;

use bytes::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, Uri};
use std::collections::HashMap;

use crate::{Error, Result};

/// HTTP Request representation
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub headers: HeaderMap,
	pub body: Bytes,
	/// Values captured from the URL pattern, keyed by group name
	pub path_params: HashMap<String, String>,
	/// Raw (undecoded) query string parameters
	pub query_params: HashMap<String, String>,
	is_secure: bool,
}

impl Request {
	/// Start building a request
	///
	/// # Examples
	///
	/// ```
	/// use ferrule_http::{Method, Request};
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/shortcut/1/2/?next=home")
	///     .header("host", "testserver")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.path(), "/shortcut/1/2/");
	/// assert_eq!(request.query_params.get("next"), Some(&"home".to_string()));
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}
}

/// Builder for [`Request`]
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Method,
	uri: Option<String>,
	headers: HeaderMap,
	body: Bytes,
	secure: bool,
	invalid_header: Option<String>,
}

impl RequestBuilder {
	/// Set the HTTP method (defaults to GET)
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	/// Set the request URI (path plus optional query string)
	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	/// Add a header; an invalid name or value makes `build` fail
	pub fn header(mut self, name: &str, value: &str) -> Self {
		match (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			(Ok(name), Ok(value)) => {
				self.headers.insert(name, value);
			}
			_ => self.invalid_header = Some(name.to_string()),
		}
		self
	}

	/// Replace all headers
	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	/// Set the request body
	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Mark the request as received over TLS
	pub fn secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	/// Build the request
	///
	/// # Errors
	///
	/// Returns [`Error::BadRequest`] when the URI is missing or malformed,
	/// or when a header could not be encoded.
	pub fn build(self) -> Result<Request> {
		if let Some(name) = self.invalid_header {
			return Err(Error::BadRequest(format!("invalid header '{}'", name)));
		}
		let raw = self
			.uri
			.ok_or_else(|| Error::BadRequest("request URI is required".to_string()))?;
		let uri: Uri = raw
			.parse()
			.map_err(|e| Error::BadRequest(format!("invalid URI '{}': {}", raw, e)))?;
		let query_params = Request::parse_query_params(&uri);

		Ok(Request {
			method: self.method,
			uri,
			headers: self.headers,
			body: self.body,
			path_params: HashMap::new(),
			query_params,
			is_secure: self.secure,
		})
	}
}
