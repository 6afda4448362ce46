//! Param definitions: how one query-string key maps to a typed value.
//!
//! A definition is either a [`ScalarParam`] (one raw string in, one value out) or an
//! [`ArrayParam`] (every occurrence of the key in, a list out). Each carries an
//! optional decoder, an optional encoder and an optional default; missing pieces fall
//! back to identity decoding and [`Value::to_query_string`] encoding.
//!
//! ```ignore
//! use reinhardt_qs_codec::{ScalarParam, Value, number::parse_int};
//!
//! let page = ScalarParam::new()
//!     .with_decode(|raw| Ok(raw.map(|s| Value::Number(parse_int(s)))))
//!     .with_default(1);
//! ```

use std::rc::Rc;

use crate::codec::QsValue;
use crate::error::{ParamError, ParamResult};
use crate::value::Value;

/// Scalar decoder: raw value (absent when the key is missing) to typed value.
pub type ScalarDecodeFn = dyn Fn(Option<&str>) -> ParamResult<Option<Value>>;
/// Scalar encoder: typed value to raw value; `None` drops the key.
pub type ScalarEncodeFn = dyn Fn(Option<&Value>) -> ParamResult<Option<String>>;
/// List decoder: every raw occurrence (possibly none) to a typed value.
pub type ArrayDecodeFn = dyn Fn(&[String]) -> ParamResult<Option<Value>>;
/// List encoder: typed value to raw occurrences; an empty list drops the key.
pub type ArrayEncodeFn = dyn Fn(Option<&Value>) -> ParamResult<Vec<String>>;

/// Definition of a single-valued param.
#[derive(Clone, Default)]
pub struct ScalarParam {
	decode: Option<Rc<ScalarDecodeFn>>,
	encode: Option<Rc<ScalarEncodeFn>>,
	default_value: Option<Value>,
}

impl ScalarParam {
	/// A definition that passes raw strings through unchanged.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the decoder.
	pub fn with_decode<F>(mut self, decode: F) -> Self
	where
		F: Fn(Option<&str>) -> ParamResult<Option<Value>> + 'static,
	{
		self.decode = Some(Rc::new(decode));
		self
	}

	/// Sets (or replaces) the encoder.
	pub fn with_encode<F>(mut self, encode: F) -> Self
	where
		F: Fn(Option<&Value>) -> ParamResult<Option<String>> + 'static,
	{
		self.encode = Some(Rc::new(encode));
		self
	}

	/// Sets the default value, returned for a missing key and omitted from URLs.
	pub fn with_default(mut self, value: impl Into<Value>) -> Self {
		self.default_value = Some(value.into());
		self
	}

	pub fn default_value(&self) -> Option<&Value> {
		self.default_value.as_ref()
	}

	/// Decodes one raw value; without a decoder the string itself is the value.
	pub fn decode(&self, raw: Option<&str>) -> ParamResult<Option<Value>> {
		match &self.decode {
			Some(decode) => decode(raw),
			None => Ok(raw.map(Value::from)),
		}
	}

	/// Encodes one value; without an encoder [`Value::to_query_string`] is used.
	pub fn encode(&self, value: Option<&Value>) -> ParamResult<Option<String>> {
		match &self.encode {
			Some(encode) => encode(value),
			None => Ok(value.and_then(Value::to_query_string)),
		}
	}
}

/// Definition of a repeated param (`?tag=a&tag=b`).
#[derive(Clone, Default)]
pub struct ArrayParam {
	decode: Option<Rc<ArrayDecodeFn>>,
	encode: Option<Rc<ArrayEncodeFn>>,
	default_value: Option<Value>,
}

impl ArrayParam {
	/// A definition that yields the raw strings as a list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the decoder.
	pub fn with_decode<F>(mut self, decode: F) -> Self
	where
		F: Fn(&[String]) -> ParamResult<Option<Value>> + 'static,
	{
		self.decode = Some(Rc::new(decode));
		self
	}

	/// Sets (or replaces) the encoder.
	pub fn with_encode<F>(mut self, encode: F) -> Self
	where
		F: Fn(Option<&Value>) -> ParamResult<Vec<String>> + 'static,
	{
		self.encode = Some(Rc::new(encode));
		self
	}

	/// Sets the default value, returned for a missing key and omitted from URLs.
	pub fn with_default(mut self, value: impl Into<Value>) -> Self {
		self.default_value = Some(value.into());
		self
	}

	pub fn default_value(&self) -> Option<&Value> {
		self.default_value.as_ref()
	}

	/// Decodes every occurrence of the key.
	pub fn decode(&self, raw: &[String]) -> ParamResult<Option<Value>> {
		match &self.decode {
			Some(decode) => decode(raw),
			None => Ok(Some(Value::List(
				raw.iter().map(|item| Value::from(item.as_str())).collect(),
			))),
		}
	}

	/// Encodes a list value into one raw string per element.
	pub fn encode(&self, value: Option<&Value>) -> ParamResult<Vec<String>> {
		if let Some(encode) = &self.encode {
			return encode(value);
		}
		match value {
			None => Ok(Vec::new()),
			Some(Value::List(items)) => Ok(items.iter().filter_map(Value::to_query_string).collect()),
			Some(other) => Ok(other.to_query_string().into_iter().collect()),
		}
	}
}

/// A param definition of either shape.
#[derive(Clone)]
pub enum SearchParam {
	Scalar(ScalarParam),
	Array(ArrayParam),
}

impl SearchParam {
	/// Starts a scalar definition.
	pub fn scalar() -> ScalarParam {
		ScalarParam::new()
	}

	/// Starts an array definition.
	pub fn array() -> ArrayParam {
		ArrayParam::new()
	}

	pub fn is_array(&self) -> bool {
		matches!(self, Self::Array(_))
	}

	pub fn default_value(&self) -> Option<&Value> {
		match self {
			Self::Scalar(param) => param.default_value(),
			Self::Array(param) => param.default_value(),
		}
	}

	pub fn has_default(&self) -> bool {
		self.default_value().is_some()
	}

	/// Normalizes the raw record entry to this param's shape and decodes it.
	///
	/// A scalar param reads the first occurrence of a repeated key; an array param
	/// reads a lone value as a one-element list and a missing key as an empty list.
	/// No fallback is applied; see [`read`](Self::read).
	pub fn decode_raw(&self, raw: Option<&QsValue>) -> ParamResult<Option<Value>> {
		match self {
			Self::Scalar(param) => param.decode(raw.and_then(QsValue::first)),
			Self::Array(param) => {
				let items = raw.map(QsValue::to_vec).unwrap_or_default();
				param.decode(&items)
			}
		}
	}

	/// Reads the typed value of this param from its raw record entry.
	///
	/// Without a default, a missing key (or, for arrays, no occurrence at all) reads
	/// as absent without calling the decoder. With a default, a failing decoder or
	/// one that produces nothing yields the default. Returns the decode error, if
	/// any, next to the value so callers can report it.
	pub fn read(&self, raw: Option<&QsValue>) -> (Option<Value>, Option<ParamError>) {
		if !self.has_default() && is_missing(raw) {
			return (None, None);
		}

		match self.decode_raw(raw) {
			Ok(Some(value)) => (Some(value), None),
			Ok(None) => (self.default_value().cloned(), None),
			Err(error) => (self.default_value().cloned(), Some(error)),
		}
	}

	/// Encodes a typed value into a raw record entry; `None` drops the key.
	pub fn encode_raw(&self, value: Option<&Value>) -> ParamResult<Option<QsValue>> {
		match self {
			Self::Scalar(param) => Ok(param.encode(value)?.map(QsValue::Single)),
			Self::Array(param) => Ok(Some(QsValue::Multi(param.encode(value)?))),
		}
	}
}

fn is_missing(raw: Option<&QsValue>) -> bool {
	match raw {
		None => true,
		Some(QsValue::Multi(items)) => items.is_empty(),
		Some(QsValue::Single(_)) => false,
	}
}

impl From<ScalarParam> for SearchParam {
	fn from(param: ScalarParam) -> Self {
		Self::Scalar(param)
	}
}

impl From<ArrayParam> for SearchParam {
	fn from(param: ArrayParam) -> Self {
		Self::Array(param)
	}
}

impl core::fmt::Debug for ScalarParam {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ScalarParam")
			.field("decode", &self.decode.is_some())
			.field("encode", &self.encode.is_some())
			.field("default_value", &self.default_value)
			.finish()
	}
}

impl core::fmt::Debug for ArrayParam {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ArrayParam")
			.field("decode", &self.decode.is_some())
			.field("encode", &self.encode.is_some())
			.field("default_value", &self.default_value)
			.finish()
	}
}

impl core::fmt::Debug for SearchParam {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Scalar(param) => param.fmt(f),
			Self::Array(param) => param.fmt(f),
		}
	}
}

/// Passed to the definition callback of a store factory.
///
/// ```ignore
/// let store = qs.create_search_params_store_with(|def| {
///     [("page", def.scalar().with_default(1).into())]
/// });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamFactory;

impl ParamFactory {
	pub fn scalar(&self) -> ScalarParam {
		ScalarParam::new()
	}

	pub fn array(&self) -> ArrayParam {
		ArrayParam::new()
	}
}
