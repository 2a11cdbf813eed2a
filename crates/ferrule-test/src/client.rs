//! In-process test client
//!
//! Similar to Django's test `Client`: requests never touch the network, they
//! go straight through a [`BaseHandler`] with `Host: testserver`.

use crate::response::TestResponse;
use ferrule_http::{Handler, Method, Request};
use ferrule_urls::BaseHandler;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Host name test requests are addressed to
pub const TEST_HOST: &str = "testserver";

#[derive(Debug, Error)]
pub enum ClientError {
	#[error("HTTP error: {0}")]
	Http(#[from] ferrule_http::Error),

	#[error("Invalid URL: {0}")]
	InvalidUrl(#[from] url::ParseError),

	#[error("Request failed: {0}")]
	RequestFailed(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Test client bound to a URL configuration
///
/// # Examples
///
/// ```rust,ignore
/// let client = Client::new(Arc::new(urls));
/// let response = client.get("/shortcut/1/1/").await?;
/// assert_eq!(response.location(), Some("http://testserver/views/authors/1/"));
/// ```
#[derive(Clone)]
pub struct Client {
	handler: BaseHandler,
	host: String,
	secure: bool,
}

impl Client {
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			handler: BaseHandler::new(handler),
			host: TEST_HOST.to_string(),
			secure: false,
		}
	}

	/// Address requests to `host` instead of `testserver`
	pub fn with_host(mut self, host: impl Into<String>) -> Self {
		self.host = host.into();
		self
	}

	/// Send requests as if received over HTTPS
	pub fn secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	pub fn host(&self) -> &str {
		&self.host
	}

	/// Make a GET request for `path`
	pub async fn get(&self, path: &str) -> ClientResult<TestResponse> {
		self.request(Method::GET, path, &self.host, self.secure).await
	}

	/// Make a GET request for an absolute URL, using its host and scheme
	pub async fn get_url(&self, url: &str) -> ClientResult<TestResponse> {
		let parsed = Url::parse(url)?;
		let host = match (parsed.host_str(), parsed.port()) {
			(Some(host), Some(port)) => format!("{}:{}", host, port),
			(Some(host), None) => host.to_string(),
			(None, _) => {
				return Err(ClientError::RequestFailed(format!("URL '{}' has no host", url)));
			}
		};
		let mut path = parsed.path().to_string();
		if let Some(query) = parsed.query() {
			path.push('?');
			path.push_str(query);
		}
		self.request(Method::GET, &path, &host, parsed.scheme() == "https")
			.await
	}

	async fn request(
		&self,
		method: Method,
		path: &str,
		host: &str,
		secure: bool,
	) -> ClientResult<TestResponse> {
		let request = Request::builder()
			.method(method.clone())
			.uri(path)
			.header("host", host)
			.secure(secure)
			.build()?;
		let response = self.handler.get_response(request).await;
		tracing::debug!(%method, %path, status = %response.status, "Test client request");
		Ok(response.into())
	}
}
