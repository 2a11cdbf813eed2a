//! Test logging utilities

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (call once)
///
/// Library code logs through `tracing`, whose `log` feature forwards events
/// to `env_logger`. Set `RUST_LOG=debug` to see executed SQL.
///
/// # Examples
///
/// ```
/// use ferrule_test::logging::init_test_logging;
///
/// init_test_logging();
/// init_test_logging();
/// ```
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = env_logger::builder().is_test(true).try_init();
	});
}
