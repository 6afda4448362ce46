//! String presets.

use crate::param::{ArrayParam, ScalarParam};

/// A string that defaults to `""`, so an empty value never appears in the URL.
pub fn string() -> ScalarParam {
	ScalarParam::new().with_default("")
}

/// A string that is absent when the key is missing.
pub fn string_optional() -> ScalarParam {
	ScalarParam::new()
}

/// Every occurrence of the key, as strings.
pub fn string_array() -> ArrayParam {
	ArrayParam::new()
}
