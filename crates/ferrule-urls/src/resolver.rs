use async_trait::async_trait;
use ferrule_http::{Error, Handler, Request, Response, Result};
use std::collections::HashMap;
use std::sync::Arc;

use crate::UrlPattern;

/// Result of resolving a path against a [`UrlResolver`]
#[derive(Clone)]
pub struct ResolverMatch {
	pub handler: Arc<dyn Handler>,
	pub params: HashMap<String, String>,
	pub url_name: Option<String>,
	pub route: String,
}

/// Ordered list of URL patterns; the first match wins
#[derive(Clone, Default, Debug)]
pub struct UrlResolver {
	patterns: Vec<UrlPattern>,
}

impl UrlResolver {
	/// Create an empty resolver
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a pattern
	pub fn add(&mut self, pattern: UrlPattern) {
		self.patterns.push(pattern);
	}

	/// Append a pattern, builder style
	pub fn with(mut self, pattern: UrlPattern) -> Self {
		self.add(pattern);
		self
	}

	/// Registered patterns in match order
	pub fn patterns(&self) -> &[UrlPattern] {
		&self.patterns
	}

	/// Resolve a request path
	///
	/// The leading `/` is stripped before matching.
	pub fn resolve(&self, path: &str) -> Option<ResolverMatch> {
		let path = path.strip_prefix('/').unwrap_or(path);
		self.patterns.iter().find_map(|pattern| {
			pattern.matches(path).map(|params| ResolverMatch {
				handler: pattern.handler(),
				params,
				url_name: pattern.name().map(str::to_string),
				route: pattern.pattern().to_string(),
			})
		})
	}
}

#[async_trait]
impl Handler for UrlResolver {
	async fn handle(&self, mut request: Request) -> Result<Response> {
		let path = request.decoded_path();
		let resolved = self
			.resolve(&path)
			.ok_or_else(|| Error::not_found(format!("No URL pattern matches '{}'", path)))?;

		tracing::debug!(path = %path, route = %resolved.route, "resolved request");
		for (key, value) in resolved.params {
			request.set_path_param(key, value);
		}
		resolved.handler.handle(request).await
	}
}
