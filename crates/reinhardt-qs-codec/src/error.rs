//! Error types for query-string codecs and param definitions.

use thiserror::Error;

/// Result type for param decode/encode callbacks.
pub type ParamResult<T> = Result<T, ParamError>;

/// Errors raised by a param's `decode` or `encode` function.
///
/// A failing decode makes the store fall back to the param's default (or to absence),
/// a failing encode drops the key from the next query string. Neither aborts the
/// surrounding read or update.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
	/// The raw query-string value could not be turned into a typed value
	#[error("Failed to decode {raw:?}: {reason}")]
	Decode { raw: String, reason: String },

	/// The typed value could not be turned into a query-string value
	#[error("Failed to encode value: {0}")]
	Encode(String),

	/// The value handed to an encoder has the wrong kind
	#[error("Expected a {expected} value, got {found}")]
	UnexpectedValue {
		expected: &'static str,
		found: &'static str,
	},
}

impl ParamError {
	/// Builds a [`ParamError::Decode`].
	pub fn decode(raw: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::Decode {
			raw: raw.into(),
			reason: reason.into(),
		}
	}

	/// Builds a [`ParamError::Encode`].
	pub fn encode(reason: impl Into<String>) -> Self {
		Self::Encode(reason.into())
	}
}

/// Errors raised by a [`QsCodec`](crate::QsCodec).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
	/// The search string could not be parsed
	#[error("Failed to parse query string {input:?}: {reason}")]
	Parse { input: String, reason: String },

	/// The record could not be serialized
	#[error("Failed to stringify record: {0}")]
	Stringify(String),
}
