//! Per-call navigation options.

use serde::{Deserialize, Serialize};

/// Options of `update` / `update_all` and their dry-run variants.
///
/// Deserializable so applications can keep navigation defaults in their own settings:
///
/// ```ignore
/// let options: UpdateOptions = serde_json::from_str(r#"{"replace": true, "keepHash": true}"#)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateOptions {
	/// Replace the current history entry instead of pushing a new one
	pub replace: bool,
	/// Keep the current `#fragment` in the target URL
	pub keep_hash: bool,
	/// Navigate even when the requested values equal the current ones
	pub force: bool,
	/// History state; `{}` when unset
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<serde_json::Value>,
	/// Second argument of `pushState`/`replaceState`; `""` when unset
	#[serde(skip_serializing_if = "Option::is_none")]
	pub unused: Option<String>,
}

impl UpdateOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn replace(mut self) -> Self {
		self.replace = true;
		self
	}

	pub fn keep_hash(mut self) -> Self {
		self.keep_hash = true;
		self
	}

	pub fn force(mut self) -> Self {
		self.force = true;
		self
	}

	pub fn with_state(mut self, state: serde_json::Value) -> Self {
		self.state = Some(state);
		self
	}

	pub fn with_unused(mut self, unused: impl Into<String>) -> Self {
		self.unused = Some(unused.into());
		self
	}

	pub(crate) fn history_state(&self) -> serde_json::Value {
		self.state
			.clone()
			.unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
	}

	pub(crate) fn unused_arg(&self) -> &str {
		self.unused.as_deref().unwrap_or("")
	}
}
