//! The shortcut view
//!
//! Mounted under a pattern with the named groups `content_type_id` and
//! `object_id`, it redirects to the canonical URL of the identified object:
//!
//! ```rust,ignore
//! let shortcut = Arc::new(ShortcutView::new(manager, registry));
//! let urls = UrlResolver::new().with(re_path(
//! 	r"^shortcut/(?P<content_type_id>\d+)/(?P<object_id>.*)/$",
//! 	shortcut,
//! )?);
//! ```

use crate::error::{ContentTypeError, Result};
use crate::manager::ContentTypeManager;
use async_trait::async_trait;
use ferrule_db::{ModelObject, ModelRegistry};
use ferrule_http::{Handler, Request, Response};
use std::sync::Arc;

/// Redirects `(content_type_id, object_id)` to the object's canonical URL
#[derive(Clone)]
pub struct ShortcutView {
	manager: Arc<ContentTypeManager>,
	registry: Arc<ModelRegistry>,
}

impl ShortcutView {
	pub fn new(manager: Arc<ContentTypeManager>, registry: Arc<ModelRegistry>) -> Self {
		Self { manager, registry }
	}

	/// Where `request` for the given identifiers should be redirected
	///
	/// Absolute canonical URLs are returned unchanged. Otherwise the URL is
	/// prefixed with the object's own site domain, or the configured site
	/// domain, using the request's scheme; without either it stays relative.
	pub async fn redirect_target(
		&self,
		request: &Request,
		content_type_id: &str,
		object_id: &str,
	) -> Result<String> {
		let id = content_type_id
			.parse::<i64>()
			.map_err(|_| ContentTypeError::InvalidId(content_type_id.to_string()))?;
		let content_type = self.manager.get_for_id(id).await?;
		let object = content_type
			.get_object_for_this_type(&self.registry, self.manager.handler(), object_id)
			.await?;

		let url = object
			.absolute_url()
			.ok_or_else(|| ContentTypeError::NoAbsoluteUrl {
				content_type: content_type.qualified_name(),
			})?;
		if is_absolute(&url) {
			return Ok(url);
		}

		match self.object_domain(object.as_ref()) {
			Some(domain) => Ok(format!("{}://{}{}", request.scheme(), domain, url)),
			None => Ok(url),
		}
	}

	fn object_domain(&self, object: &dyn ModelObject) -> Option<String> {
		object
			.site_domain()
			.or_else(|| self.manager.handler().settings().site_domain.clone())
	}
}

fn is_absolute(url: &str) -> bool {
	url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}

#[async_trait]
impl Handler for ShortcutView {
	async fn handle(&self, request: Request) -> ferrule_http::Result<Response> {
		let (Some(content_type_id), Some(object_id)) = (
			request.path_param("content_type_id"),
			request.path_param("object_id"),
		) else {
			return Err(ferrule_http::Error::not_found(
				"shortcut requires content_type_id and object_id",
			));
		};

		let location = self
			.redirect_target(&request, content_type_id, object_id)
			.await?;
		tracing::debug!(%content_type_id, %object_id, %location, "Shortcut redirect");
		Ok(Response::temporary_redirect(location))
	}
}
