use ferrule_http::Handler;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Errors raised while building URL patterns
#[derive(Debug, thiserror::Error)]
pub enum UrlError {
	#[error("Invalid URL pattern '{pattern}': {source}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},
}

/// A single URL pattern bound to a handler
#[derive(Clone)]
pub struct UrlPattern {
	pattern: String,
	regex: Regex,
	handler: Arc<dyn Handler>,
	name: Option<String>,
}

impl UrlPattern {
	/// Compile a pattern
	///
	/// # Errors
	///
	/// Returns [`UrlError::InvalidPattern`] when the regular expression does
	/// not compile.
	pub fn new(pattern: impl Into<String>, handler: Arc<dyn Handler>) -> Result<Self, UrlError> {
		let pattern = pattern.into();
		let regex = Regex::new(&pattern).map_err(|source| UrlError::InvalidPattern {
			pattern: pattern.clone(),
			source,
		})?;
		Ok(Self {
			pattern,
			regex,
			handler,
			name: None,
		})
	}

	/// Set the name of the pattern
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// The source regular expression
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// The pattern name, if any
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub(crate) fn handler(&self) -> Arc<dyn Handler> {
		Arc::clone(&self.handler)
	}

	/// Match `path` (without leading slash) and return the captured parameters
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let captures = self.regex.captures(path)?;
		let has_named = self.regex.capture_names().flatten().next().is_some();

		let mut params = HashMap::new();
		let mut position = 0;
		for (index, name) in self.regex.capture_names().enumerate().skip(1) {
			match name {
				Some(name) => {
					if let Some(value) = captures.get(index) {
						params.insert(name.to_string(), value.as_str().to_string());
					}
				}
				None if !has_named => {
					if let Some(value) = captures.get(index) {
						params.insert(position.to_string(), value.as_str().to_string());
					}
					position += 1;
				}
				None => {}
			}
		}
		Some(params)
	}
}

impl fmt::Debug for UrlPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("UrlPattern")
			.field("pattern", &self.pattern)
			.field("name", &self.name)
			.finish()
	}
}

/// Build a [`UrlPattern`] from a regular expression, Django's `re_path`
///
/// # Examples
///
/// ```
/// use ferrule_http::{Handler, Request, Response, Result};
/// use ferrule_urls::re_path;
/// use std::sync::Arc;
/// # use async_trait::async_trait;
/// # struct Detail;
/// # #[async_trait]
/// # impl Handler for Detail {
/// #     async fn handle(&self, _req: Request) -> Result<Response> { Ok(Response::ok()) }
/// # }
///
/// let pattern = re_path(r"^authors/(?P<pk>\d+)/$", Arc::new(Detail)).unwrap();
/// let params = pattern.matches("authors/42/").unwrap();
/// assert_eq!(params.get("pk"), Some(&"42".to_string()));
/// assert!(pattern.matches("authors/spam/").is_none());
/// ```
pub fn re_path(pattern: &str, handler: Arc<dyn Handler>) -> Result<UrlPattern, UrlError> {
	UrlPattern::new(pattern, handler)
}
