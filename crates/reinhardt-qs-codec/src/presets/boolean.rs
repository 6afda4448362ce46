//! Boolean presets.

use crate::param::ScalarParam;
use crate::value::Value;

/// A flag: any non-empty value is `true`, and only `true` is written (`?flag=true`).
///
/// Note the asymmetry: `?flag=false` decodes to `true` (non-empty), but `false`
/// itself is never written, so it never comes back from an update.
pub fn boolean() -> ScalarParam {
	ScalarParam::new()
		.with_decode(|raw| Ok(Some(Value::Bool(raw.is_some_and(|s| !s.is_empty())))))
		.with_encode(|value| Ok(value.filter(|v| v.is_truthy()).map(|_| "true".to_string())))
		.with_default(false)
}

/// A tri-state flag: `"true"`, `"false"`, or absent.
pub fn boolean_optional() -> ScalarParam {
	ScalarParam::new()
		.with_decode(|raw| {
			Ok(match raw {
				Some("true") => Some(Value::Bool(true)),
				Some("false") => Some(Value::Bool(false)),
				_ => None,
			})
		})
		.with_encode(|value| {
			Ok(match value {
				Some(Value::Bool(true)) => Some("true".to_string()),
				Some(Value::Bool(false)) => Some("false".to_string()),
				_ => None,
			})
		})
}
