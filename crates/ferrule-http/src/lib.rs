//! # Ferrule HTTP
//!
//! Request and response types shared by the URL resolver, views and the
//! test client, plus the [`Handler`] trait every view implements.
//!
//! ## Example
//!
//! ```
//! use ferrule_http::{Handler, Request, Response, Result};
//! use async_trait::async_trait;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Handler for Hello {
//!     async fn handle(&self, _request: Request) -> Result<Response> {
//!         Ok(Response::ok().with_body("Hello!"))
//!     }
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;

pub use error::{Error, Result};
pub use handler::Handler;
pub use request::{Request, RequestBuilder};
pub use response::Response;

pub use hyper::{HeaderMap, Method, StatusCode, Uri};
