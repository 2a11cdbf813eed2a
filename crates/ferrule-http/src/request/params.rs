use super::Request;
use hyper::Uri;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;

impl Request {
	/// Parse query parameters from URI
	pub(super) fn parse_query_params(uri: &Uri) -> HashMap<String, String> {
		uri.query()
			.map(|q| {
				q.split('&')
					.filter(|pair| !pair.is_empty())
					.filter_map(|pair| {
						// Split on first '=' only to preserve '=' in values
						let mut parts = pair.splitn(2, '=');
						Some((
							parts.next()?.to_string(),
							parts.next().unwrap_or("").to_string(),
						))
					})
					.collect()
			})
			.unwrap_or_default()
	}

	/// Get the request path
	///
	/// # Examples
	///
	/// ```
	/// use ferrule_http::Request;
	///
	/// let request = Request::builder().uri("/api/users?page=2").build().unwrap();
	/// assert_eq!(request.path(), "/api/users");
	/// ```
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Get the percent-decoded request path, as URL patterns see it
	///
	/// # Examples
	///
	/// ```
	/// use ferrule_http::Request;
	///
	/// let request = Request::builder().uri("/files/a%20b/").build().unwrap();
	/// assert_eq!(request.decoded_path(), "/files/a b/");
	/// ```
	pub fn decoded_path(&self) -> String {
		percent_decode_str(self.uri.path())
			.decode_utf8_lossy()
			.to_string()
	}

	/// Set a path parameter (used by routers for path variable extraction)
	///
	/// # Examples
	///
	/// ```
	/// use ferrule_http::Request;
	///
	/// let mut request = Request::builder().uri("/users/123/").build().unwrap();
	/// request.set_path_param("id", "123");
	/// assert_eq!(request.path_param("id"), Some("123"));
	/// ```
	pub fn set_path_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.path_params.insert(key.into(), value.into());
	}

	/// Get a path parameter captured by the router
	pub fn path_param(&self, key: &str) -> Option<&str> {
		self.path_params.get(key).map(String::as_str)
	}
}
