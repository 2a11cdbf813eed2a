//! Assertions for redirects and database query counts

use crate::client::Client;
use crate::response::TestResponse;
use ferrule_db::{CapturedQuery, DatabaseConnection};
use std::future::Future;
use std::sync::Arc;

/// Assert that `response` redirects to `expected_url` with `status_code`, and
/// that fetching the target yields `target_status_code`
///
/// A relative `expected_url` is resolved against the client's host, so
/// `"/views/authors/1/"` matches `http://testserver/views/authors/1/`.
pub async fn assert_redirects(
	client: &Client,
	response: &TestResponse,
	expected_url: &str,
	status_code: u16,
	target_status_code: u16,
) {
	assert_eq!(
		response.status_code(),
		status_code,
		"Response didn't redirect as expected: response code was {} (expected {})",
		response.status_code(),
		status_code
	);
	let location = response
		.location()
		.expect("redirect response is missing its Location header");

	let expected = if expected_url.starts_with('/') {
		format!("http://{}{}", client.host(), expected_url)
	} else {
		expected_url.to_string()
	};
	assert_eq!(
		location, expected,
		"Response redirected to '{}', expected '{}'",
		location, expected
	);

	let target = client
		.get_url(location)
		.await
		.unwrap_or_else(|e| panic!("Couldn't retrieve redirection page '{}': {}", location, e));
	assert_eq!(
		target.status_code(),
		target_status_code,
		"Couldn't retrieve redirection page '{}': response code was {} (expected {})",
		location,
		target.status_code(),
		target_status_code
	);
}

/// Records the statements run on one connection from the moment it is created
///
/// # Examples
///
/// ```rust,ignore
/// let on_default = CaptureQueries::new(handler.get("default")?);
/// let on_other = CaptureQueries::new(handler.get("other")?);
/// manager.get_for_model::<Author>().await?;
/// on_default.assert_num_queries(0);
/// on_other.assert_num_queries(1);
/// ```
pub struct CaptureQueries {
	conn: Arc<DatabaseConnection>,
	start: usize,
}

impl CaptureQueries {
	pub fn new(conn: Arc<DatabaseConnection>) -> Self {
		let start = conn.captured_queries().len();
		Self { conn, start }
	}

	/// Statements executed since this capture started
	pub fn captured_queries(&self) -> Vec<CapturedQuery> {
		self.conn
			.captured_queries()
			.into_iter()
			.skip(self.start)
			.collect()
	}

	pub fn len(&self) -> usize {
		self.captured_queries().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	#[track_caller]
	pub fn assert_num_queries(&self, expected: usize) {
		let queries = self.captured_queries();
		let listing: Vec<String> = queries
			.iter()
			.enumerate()
			.map(|(i, q)| format!("{}. {}", i + 1, q.sql))
			.collect();
		assert_eq!(
			queries.len(),
			expected,
			"{} queries executed on '{}', {} expected\nCaptured queries were:\n{}",
			queries.len(),
			self.conn.alias(),
			expected,
			listing.join("\n")
		);
	}
}

/// Await `future` and assert it ran exactly `expected` statements on `conn`
pub async fn assert_num_queries<F, T>(conn: Arc<DatabaseConnection>, expected: usize, future: F) -> T
where
	F: Future<Output = T>,
{
	let capture = CaptureQueries::new(conn);
	let output = future.await;
	capture.assert_num_queries(expected);
	output
}

#[cfg(test)]
mod tests {
	use super::*;
	use ferrule_conf::DatabaseConfig;
	use rstest::rstest;

	async fn connection() -> Arc<DatabaseConnection> {
		Arc::new(
			DatabaseConnection::connect("default", &DatabaseConfig::sqlite(":memory:"))
				.await
				.unwrap(),
		)
	}

	#[rstest]
	#[tokio::test]
	async fn test_capture_starts_empty() {
		let conn = connection().await;
		conn.execute("CREATE TABLE t (id INTEGER PRIMARY KEY)").await.unwrap();

		let capture = CaptureQueries::new(conn.clone());
		conn.fetch_all("SELECT id FROM t").await.unwrap();

		capture.assert_num_queries(1);
		assert_eq!(capture.captured_queries()[0].sql, "SELECT id FROM t");
	}

	#[rstest]
	#[tokio::test]
	async fn test_assert_num_queries_returns_output() {
		let conn = connection().await;

		let affected = assert_num_queries(conn.clone(), 1, async {
			conn.execute("CREATE TABLE t (id INTEGER PRIMARY KEY)").await.unwrap()
		})
		.await;

		assert_eq!(affected, 0);
	}

	#[tokio::test]
	#[should_panic(expected = "1 queries executed on 'default', 0 expected")]
	async fn test_assert_num_queries_failure_lists_queries() {
		let conn = connection().await;

		assert_num_queries(conn.clone(), 0, async {
			conn.execute("CREATE TABLE t (id INTEGER PRIMARY KEY)").await.unwrap();
		})
		.await;
	}
}
