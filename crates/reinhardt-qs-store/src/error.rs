//! Error types for navigation hosts and stores.

use reinhardt_qs_codec::CodecError;
use thiserror::Error;

/// Result type for store operations.
pub type QsResult<T> = Result<T, QsError>;

/// Failures of the platform navigation API.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
	/// No `window` global (not running in a browser main thread)
	#[error("No browser window available")]
	NoWindow,

	/// `window.history` is not accessible
	#[error("History API is not available")]
	NoHistory,

	/// A JavaScript call threw
	#[error("JavaScript error: {0}")]
	Js(String),

	/// A navigation target could not be resolved against the current URL
	#[error("Invalid URL: {0}")]
	InvalidUrl(String),
}

/// Errors surfaced by [`QsUtils`](crate::QsUtils) and its stores.
///
/// Per-key decode and encode failures never appear here; they fall back to defaults
/// or omission and are only logged.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QsError {
	#[error(transparent)]
	Codec(#[from] CodecError),

	#[error(transparent)]
	Navigation(#[from] NavigationError),

	/// `update` was called with a key the store does not declare
	#[error("Unknown search param: {0}")]
	UnknownKey(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(NavigationError::NoWindow.into(), "No browser window available")]
	#[case(
		NavigationError::InvalidUrl("http://[::1".to_string()).into(),
		"Invalid URL: http://[::1"
	)]
	#[case(CodecError::Stringify("cycle".to_string()).into(), "Failed to stringify record: cycle")]
	#[case(QsError::UnknownKey("page".to_string()), "Unknown search param: page")]
	fn test_error_display(#[case] error: QsError, #[case] expected: &str) {
		assert_eq!(error.to_string(), expected);
	}
}
