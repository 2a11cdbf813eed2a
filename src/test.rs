//! Testing utilities module.
//!
//! # Examples
//!
//! ```rust,ignore
//! use ferrule::test::{Client, assert_redirects};
//!
//! let response = client.get("/shortcut/2/1/").await?;
//! assert_redirects(&client, &response, "/views/authors/1/", 302, 404).await;
//! ```

pub use ferrule_test::*;
