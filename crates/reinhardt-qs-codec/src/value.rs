//! Typed param values.
//!
//! Every decoded query-string param is a [`Value`]. Absence (the key is not in the
//! URL, or decoded to nothing) is modelled as `Option::None` one level up, never as a
//! variant, so `Option<Value>` is the type that flows through stores.

use core::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::number::format_number;

/// A decoded param value.
///
/// Equality is structural with two relaxations needed by query-string defaults:
/// `NaN` equals `NaN`, and the invalid [`Date`] equals itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	Bool(bool),
	/// Integers and floats alike; integer presets hold truncated values
	Number(f64),
	String(String),
	Date(Date),
	List(Vec<Value>),
	/// Structured data produced by custom decoders
	Json(serde_json::Value),
}

impl Value {
	/// Short name of the variant, used in error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::Date(_) => "date",
			Self::List(_) => "list",
			Self::Json(_) => "json",
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(value) => Some(*value),
			_ => None,
		}
	}

	/// The number as an integer; `None` for `NaN`, infinities and non-numbers.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Number(value) if value.is_finite() => Some(value.trunc() as i64),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_date(&self) -> Option<&Date> {
		match self {
			Self::Date(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_json(&self) -> Option<&serde_json::Value> {
		match self {
			Self::Json(value) => Some(value),
			_ => None,
		}
	}

	/// Whether this is a list with no elements.
	pub fn is_empty_list(&self) -> bool {
		matches!(self, Self::List(items) if items.is_empty())
	}

	/// Truthiness as used by the boolean presets.
	///
	/// `false`, `0`, `NaN`, the empty string, JSON `null`/`false`/`0`/`""` are falsy;
	/// everything else (including every date and list) is truthy.
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Bool(value) => *value,
			Self::Number(value) => *value != 0.0 && !value.is_nan(),
			Self::String(value) => !value.is_empty(),
			Self::Date(_) | Self::List(_) => true,
			Self::Json(value) => match value {
				serde_json::Value::Null => false,
				serde_json::Value::Bool(flag) => *flag,
				serde_json::Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
				serde_json::Value::String(text) => !text.is_empty(),
				_ => true,
			},
		}
	}

	/// Default stringification used when a param has no custom encoder.
	///
	/// Numbers go through [`format_number`], dates become ISO strings, lists are
	/// comma-joined and JSON strings are written bare. The invalid date has no
	/// query-string form and yields `None`.
	pub fn to_query_string(&self) -> Option<String> {
		match self {
			Self::Bool(value) => Some(value.to_string()),
			Self::Number(value) => Some(format_number(*value)),
			Self::String(value) => Some(value.clone()),
			Self::Date(date) => date.to_iso_string(),
			Self::List(items) => Some(
				items
					.iter()
					.map(|item| item.to_query_string().unwrap_or_default())
					.collect::<Vec<_>>()
					.join(","),
			),
			Self::Json(serde_json::Value::String(text)) => Some(text.clone()),
			Self::Json(value) => Some(value.to_string()),
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
			(Self::String(a), Self::String(b)) => a == b,
			(Self::Date(a), Self::Date(b)) => a == b,
			(Self::List(a), Self::List(b)) => a == b,
			(Self::Json(a), Self::Json(b)) => a == b,
			_ => false,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Date(date) => write!(f, "{date}"),
			other => f.write_str(&other.to_query_string().unwrap_or_default()),
		}
	}
}

macro_rules! impl_from_number {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::Number(value as f64)
				}
			}
		)*
	};
}

impl_from_number!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Date> for Value {
	fn from(value: Date) -> Self {
		Self::Date(value)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(value: DateTime<Utc>) -> Self {
		Self::Date(Date::from(value))
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		Self::Json(value)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(items: Vec<T>) -> Self {
		Self::List(items.into_iter().map(Into::into).collect())
	}
}

/// Conversion from a [`Value`] back into a concrete Rust type.
pub trait FromValue: Sized {
	fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
	fn from_value(value: &Value) -> Option<Self> {
		Some(value.clone())
	}
}

impl FromValue for bool {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_bool()
	}
}

impl FromValue for f64 {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_f64()
	}
}

impl FromValue for i64 {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_i64()
	}
}

impl FromValue for String {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_str().map(str::to_string)
	}
}

impl FromValue for Date {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_date().copied()
	}
}

impl FromValue for serde_json::Value {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_json().cloned()
	}
}

impl<T: FromValue> FromValue for Vec<T> {
	fn from_value(value: &Value) -> Option<Self> {
		value.as_list()?.iter().map(T::from_value).collect()
	}
}

/// Anything that can be written into a param: a value, or `None` to clear it.
///
/// ```ignore
/// store.update("page", 2, &UpdateOptions::default())?;
/// store.update("tag", vec!["a", "b"], &UpdateOptions::default())?;
/// store.update("draft", None::<bool>, &UpdateOptions::default())?;
/// ```
pub trait IntoParamValue {
	fn into_param_value(self) -> Option<Value>;
}

impl<T: Into<Value>> IntoParamValue for Option<T> {
	fn into_param_value(self) -> Option<Value> {
		self.map(Into::into)
	}
}

impl<T: Into<Value>> IntoParamValue for Vec<T> {
	fn into_param_value(self) -> Option<Value> {
		Some(self.into())
	}
}

macro_rules! impl_into_param_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl IntoParamValue for $ty {
				fn into_param_value(self) -> Option<Value> {
					Some(self.into())
				}
			}
		)*
	};
}

impl_into_param_value!(
	Value,
	bool,
	f64,
	f32,
	i8,
	i16,
	i32,
	i64,
	u8,
	u16,
	u32,
	u64,
	usize,
	isize,
	&str,
	String,
	Date,
	DateTime<Utc>,
	serde_json::Value,
);

/// Typed values of a multi-param store, in declaration order.
///
/// Every declared key is present; `None` means the param is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamValues {
	entries: IndexMap<String, Option<Value>>,
}

impl ParamValues {
	pub fn new() -> Self {
		Self::default()
	}

	/// Value of `key`, `None` when absent or undeclared.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key).and_then(Option::as_ref)
	}

	/// Value of `key` converted with [`FromValue`].
	pub fn get_as<T: FromValue>(&self, key: &str) -> Option<T> {
		self.get(key).and_then(T::from_value)
	}

	/// Whether `key` is declared (present or absent).
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Sets `key`; `None` marks it absent.
	pub fn set(&mut self, key: impl Into<String>, value: impl IntoParamValue) -> &mut Self {
		self.entries.insert(key.into(), value.into_param_value());
		self
	}

	/// Builder form of [`set`](Self::set).
	pub fn with(mut self, key: impl Into<String>, value: impl IntoParamValue) -> Self {
		self.set(key, value);
		self
	}

	/// Removes `key` entirely, returning its previous value.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.entries.shift_remove(key).flatten()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
		self.entries
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_ref()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<K: Into<String>> FromIterator<(K, Option<Value>)> for ParamValues {
	fn from_iter<I: IntoIterator<Item = (K, Option<Value>)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().map(|(key, value)| (key.into(), value)).collect(),
		}
	}
}
