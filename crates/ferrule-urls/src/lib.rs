//! # Ferrule URLs
//!
//! URL configuration in the Django style: an ordered list of regular
//! expression patterns, each bound to a [`Handler`](ferrule_http::Handler).
//!
//! Patterns match the request path without its leading slash, so
//! `^shortcut/(?P<content_type_id>\d+)/(?P<object_id>.*)/$` matches
//! `/shortcut/12/7/`. Named groups become path parameters; when a pattern
//! has no named groups its unnamed groups are exposed as `"0"`, `"1"`, ….
//!
//! [`BaseHandler`] sits in front of a resolver and turns every outcome into
//! a [`Response`](ferrule_http::Response): errors become their status code,
//! and relative `Location` headers are made absolute from the request host.

mod base;
mod pattern;
mod resolver;

pub use base::BaseHandler;
pub use pattern::{UrlError, UrlPattern, re_path};
pub use resolver::{ResolverMatch, UrlResolver};
