use super::Request;

impl Request {
	/// Returns true if the request was made over HTTPS
	///
	/// # Examples
	///
	/// ```
	/// use ferrule_http::Request;
	///
	/// let request = Request::builder().uri("/").secure(true).build().unwrap();
	/// assert!(request.is_secure());
	/// assert_eq!(request.scheme(), "https");
	/// ```
	pub fn is_secure(&self) -> bool {
		self.is_secure
	}

	/// Returns the scheme of the request (http or https)
	pub fn scheme(&self) -> &str {
		if self.is_secure() { "https" } else { "http" }
	}

	/// Build an absolute URI for `path`, or for the request path itself
	///
	/// # Examples
	///
	/// ```
	/// use ferrule_http::Request;
	///
	/// let request = Request::builder()
	///     .uri("/shortcut/1/1/")
	///     .header("host", "testserver")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(
	///     request.build_absolute_uri(Some("/views/authors/1/")),
	///     "http://testserver/views/authors/1/"
	/// );
	/// assert_eq!(request.build_absolute_uri(None), "http://testserver/shortcut/1/1/");
	/// ```
	pub fn build_absolute_uri(&self, path: Option<&str>) -> String {
		let scheme = self.scheme();
		let host = self.get_host().unwrap_or_else(|| "localhost".to_string());
		let path = path.unwrap_or_else(|| self.path());

		format!("{}://{}{}", scheme, host, path)
	}

	/// Get the host from the request headers, falling back to the URI authority
	pub fn get_host(&self) -> Option<String> {
		self.headers
			.get(hyper::header::HOST)
			.and_then(|h| h.to_str().ok())
			.map(|s| s.to_string())
			.or_else(|| self.uri.authority().map(|a| a.to_string()))
	}
}
