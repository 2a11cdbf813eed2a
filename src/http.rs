//! HTTP request, response and handler types.

pub use ferrule_http::*;
