use ferrule_http::{Handler, Request, Response};
use std::sync::Arc;
use url::Url;

/// Entry point that turns any handler outcome into a response
///
/// Errors are converted with `From<Error> for Response` and logged, and a
/// relative `Location` header is rewritten into an absolute URI built from
/// the request's scheme and host.
#[derive(Clone)]
pub struct BaseHandler {
	handler: Arc<dyn Handler>,
}

impl BaseHandler {
	/// Wrap a handler, usually a [`UrlResolver`](crate::UrlResolver)
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self { handler }
	}

	/// Process a request to completion
	pub async fn get_response(&self, request: Request) -> Response {
		let method = request.method.clone();
		let path = request.path().to_string();
		let base_uri = request.build_absolute_uri(None);

		let response = match self.handler.handle(request).await {
			Ok(response) => response,
			Err(error) => {
				if error.status().is_server_error() {
					tracing::error!(%method, %path, %error, "request failed");
				} else {
					tracing::warn!(%method, %path, status = error.status_code(), "{}", error);
				}
				Response::from(error)
			}
		};

		fix_location_header(response, &base_uri)
	}
}

fn fix_location_header(response: Response, base_uri: &str) -> Response {
	let Some(location) = response.location() else {
		return response;
	};
	if Url::parse(location).is_ok() {
		return response;
	}
	match Url::parse(base_uri).and_then(|base| base.join(location)) {
		Ok(absolute) => {
			let absolute = absolute.to_string();
			response.with_location(&absolute)
		}
		Err(error) => {
			tracing::warn!(%location, %error, "could not make redirect location absolute");
			response
		}
	}
}
