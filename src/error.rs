//! Errors surfaced while loading the edge list.

use thiserror::Error;

/// Failure to turn the configured resource into raw records.
///
/// Messages from the underlying HTTP and CSV errors are captured as strings so
/// the error can be cloned into a signal and rendered by an `ErrorBoundary`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
	/// The request never produced a response body.
	#[error("failed to fetch {url}: {message}")]
	Fetch {
		/// Resource that was requested.
		url: String,
		/// Transport error description.
		message: String,
	},
	/// The server answered with a non-success status.
	#[error("fetching {url} returned HTTP {status}")]
	Status {
		/// Resource that was requested.
		url: String,
		/// HTTP status code.
		status: u16,
	},
	/// The header or a data row could not be decoded.
	#[error("malformed CSV: {0}")]
	Csv(String),
	/// A required column is absent from the header row.
	#[error("CSV header is missing the required `{0}` column")]
	MissingColumn(&'static str),
}

impl From<csv::Error> for LoadError {
	fn from(err: csv::Error) -> Self {
		LoadError::Csv(err.to_string())
	}
}
