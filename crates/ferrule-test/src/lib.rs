//! # Ferrule Test
//!
//! Testing utilities modelled on Django's test framework:
//!
//! - [`Client`]: drives a URL configuration in-process, as host `testserver`
//! - [`TestResponse`] and [`ResponseExt`]: status and header assertions
//! - [`assert_redirects`]: checks a redirect and the page it points to
//! - [`CaptureQueries`]: counts statements run on a connection
//! - [`fixtures`]: Django-format JSON fixtures and rstest fixtures
//! - [`logging::init_test_logging`]: routes `tracing` output to `env_logger`

pub mod assertions;
pub mod client;
pub mod fixtures;
pub mod logging;
pub mod response;

pub use assertions::{CaptureQueries, assert_num_queries, assert_redirects};
pub use client::{Client, ClientError, ClientResult, TEST_HOST};
pub use fixtures::{FixtureError, load_fixture, load_fixture_file};
pub use response::{ResponseExt, TestResponse};
