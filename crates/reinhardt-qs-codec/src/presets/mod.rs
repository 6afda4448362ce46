//! Ready-made param definitions for common value types.
//!
//! | Preset                  | Shape  | Default       | Missing / invalid input      |
//! |-------------------------|--------|---------------|------------------------------|
//! | [`string`]              | scalar | `""`          | default                      |
//! | [`string_optional`]     | scalar | none          | absent                       |
//! | [`string_array`]        | array  | none          | absent                       |
//! | [`int`] / [`float`]     | scalar | `NaN`         | `NaN`                        |
//! | [`int_optional`] ...    | scalar | none          | absent                       |
//! | [`int_array`] ...       | array  | none          | invalid elements dropped     |
//! | [`boolean`]             | scalar | `false`       | `false`                      |
//! | [`boolean_optional`]    | scalar | none          | absent                       |
//! | [`enumeration`]         | scalar | first option  | first option                 |
//! | [`enumeration_optional`]| scalar | none          | absent                       |
//! | [`enumeration_array`]   | array  | none          | unknown options dropped      |
//! | [`date`]                | scalar | invalid date  | invalid date                 |
//! | [`date_optional`]       | scalar | none          | absent                       |
//! | [`date_array`]          | array  | none          | invalid dates dropped        |
//!
//! [`json`], [`bounded_int`] and [`comma_separated`] cover shapes that need a
//! parameter of their own.
//!
//! Presets return the concrete [`ScalarParam`](crate::ScalarParam) or
//! [`ArrayParam`](crate::ArrayParam), so their encoder can still be replaced:
//!
//! ```ignore
//! let upper = presets::string().with_encode(|v| Ok(v.and_then(Value::as_str).map(str::to_uppercase)));
//! ```

mod boolean;
mod choice;
mod custom;
mod date;
mod number;
mod string;

pub use boolean::{boolean, boolean_optional};
pub use choice::{enumeration, enumeration_array, enumeration_optional};
pub use custom::{bounded_int, comma_separated, json};
pub use date::{date, date_array, date_optional};
pub use number::{float, float_array, float_optional, int, int_array, int_optional};
pub use string::{string, string_array, string_optional};

use crate::error::ParamError;
use crate::value::Value;

fn unexpected(expected: &'static str, found: &Value) -> ParamError {
	ParamError::UnexpectedValue {
		expected,
		found: found.kind(),
	}
}

fn expect_list<'a>(value: &'a Value) -> Result<&'a [Value], ParamError> {
	value.as_list().ok_or_else(|| unexpected("list", value))
}
