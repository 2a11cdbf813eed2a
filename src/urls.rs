//! URL patterns, resolution and the base request handler.
//!
//! # Examples
//!
//! ```rust,ignore
//! use ferrule::urls::{UrlResolver, re_path};
//!
//! let urls = UrlResolver::new().with(re_path(r"^authors/(?P<id>\d+)/$", author_view)?);
//! ```

pub use ferrule_urls::*;
