//! Raw query-string records and the codecs that produce them.
//!
//! A [`QsRecord`] is the untyped view of a search string: keys in first-appearance
//! order, each mapped to one string or, for repeated keys, a list of strings.
//! A [`QsCodec`] converts between search strings and records.

use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::CodecError;

/// Raw value of one query-string key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QsValue {
	/// `?key=value`
	Single(String),
	/// `?key=a&key=b`
	Multi(Vec<String>),
}

impl QsValue {
	/// First value; for a single value, the value itself.
	pub fn first(&self) -> Option<&str> {
		match self {
			Self::Single(value) => Some(value),
			Self::Multi(values) => values.first().map(String::as_str),
		}
	}

	/// All values as a list; a single value becomes a one-element list.
	pub fn to_vec(&self) -> Vec<String> {
		match self {
			Self::Single(value) => vec![value.clone()],
			Self::Multi(values) => values.clone(),
		}
	}

	/// Adds another occurrence of the key.
	pub fn push(&mut self, value: String) {
		match self {
			Self::Single(existing) => {
				let first = core::mem::take(existing);
				*self = Self::Multi(vec![first, value]);
			}
			Self::Multi(values) => values.push(value),
		}
	}
}

impl From<&str> for QsValue {
	fn from(value: &str) -> Self {
		Self::Single(value.to_string())
	}
}

impl From<String> for QsValue {
	fn from(value: String) -> Self {
		Self::Single(value)
	}
}

impl From<Vec<String>> for QsValue {
	fn from(values: Vec<String>) -> Self {
		Self::Multi(values)
	}
}

/// Untyped query-string record, in key order of first appearance.
pub type QsRecord = IndexMap<String, QsValue>;

/// Converts between search strings and [`QsRecord`]s.
///
/// `parse` receives the search string with or without its leading `?`;
/// `stringify` returns the query without a leading `?` (empty for an empty record).
pub trait QsCodec {
	fn parse(&self, search: &str) -> Result<QsRecord, CodecError>;

	fn stringify(&self, record: &QsRecord) -> Result<String, CodecError>;
}

impl<C: QsCodec + ?Sized> QsCodec for Rc<C> {
	fn parse(&self, search: &str) -> Result<QsRecord, CodecError> {
		(**self).parse(search)
	}

	fn stringify(&self, record: &QsRecord) -> Result<String, CodecError> {
		(**self).stringify(record)
	}
}

impl<C: QsCodec + ?Sized> QsCodec for Box<C> {
	fn parse(&self, search: &str) -> Result<QsRecord, CodecError> {
		(**self).parse(search)
	}

	fn stringify(&self, record: &QsRecord) -> Result<String, CodecError> {
		(**self).stringify(record)
	}
}

fn strip_question_mark(search: &str) -> &str {
	search.strip_prefix('?').unwrap_or(search)
}

/// `application/x-www-form-urlencoded`, the format browsers use for `location.search`.
///
/// Repeated keys become [`QsValue::Multi`]; on output every element of a list is
/// written as its own `key=value` pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlEncodedCodec;

impl QsCodec for UrlEncodedCodec {
	fn parse(&self, search: &str) -> Result<QsRecord, CodecError> {
		let mut record = QsRecord::new();
		for (key, value) in form_urlencoded::parse(strip_question_mark(search).as_bytes()) {
			append(&mut record, key.into_owned(), value.into_owned());
		}
		Ok(record)
	}

	fn stringify(&self, record: &QsRecord) -> Result<String, CodecError> {
		let mut serializer = form_urlencoded::Serializer::new(String::new());
		for (key, value) in record {
			match value {
				QsValue::Single(value) => {
					serializer.append_pair(key, value);
				}
				QsValue::Multi(values) => {
					for value in values {
						serializer.append_pair(key, value);
					}
				}
			}
		}
		Ok(serializer.finish())
	}
}

/// Like [`UrlEncodedCodec`], but lists are written as `key[]=a&key[]=b`.
///
/// Keys ending in `[]` always parse to [`QsValue::Multi`], so a one-element list
/// survives a round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketCodec;

impl BracketCodec {
	const SUFFIX: &'static str = "[]";
}

impl QsCodec for BracketCodec {
	fn parse(&self, search: &str) -> Result<QsRecord, CodecError> {
		let mut record = QsRecord::new();
		for (key, value) in form_urlencoded::parse(strip_question_mark(search).as_bytes()) {
			match key.strip_suffix(Self::SUFFIX) {
				Some(base) => match record.get_mut(base) {
					Some(existing) => existing.push(value.into_owned()),
					None => {
						record.insert(base.to_string(), QsValue::Multi(vec![value.into_owned()]));
					}
				},
				None => append(&mut record, key.into_owned(), value.into_owned()),
			}
		}
		Ok(record)
	}

	fn stringify(&self, record: &QsRecord) -> Result<String, CodecError> {
		let mut serializer = form_urlencoded::Serializer::new(String::new());
		for (key, value) in record {
			match value {
				QsValue::Single(value) => {
					serializer.append_pair(key, value);
				}
				QsValue::Multi(values) => {
					let list_key = format!("{key}{}", Self::SUFFIX);
					for value in values {
						serializer.append_pair(&list_key, value);
					}
				}
			}
		}
		Ok(serializer.finish())
	}
}

fn append(record: &mut QsRecord, key: String, value: String) {
	match record.get_mut(&key) {
		Some(existing) => existing.push(value),
		None => {
			record.insert(key, QsValue::Single(value));
		}
	}
}

type ParseFn = dyn Fn(&str) -> Result<QsRecord, CodecError>;
type StringifyFn = dyn Fn(&QsRecord) -> Result<String, CodecError>;

/// A codec assembled from two closures.
///
/// ```ignore
/// let codec = FnCodec::new(
///     |search| UrlEncodedCodec.parse(&search.to_lowercase()),
///     |record| UrlEncodedCodec.stringify(record),
/// );
/// ```
#[derive(Clone)]
pub struct FnCodec {
	parse: Rc<ParseFn>,
	stringify: Rc<StringifyFn>,
}

impl FnCodec {
	pub fn new<P, S>(parse: P, stringify: S) -> Self
	where
		P: Fn(&str) -> Result<QsRecord, CodecError> + 'static,
		S: Fn(&QsRecord) -> Result<String, CodecError> + 'static,
	{
		Self {
			parse: Rc::new(parse),
			stringify: Rc::new(stringify),
		}
	}
}

impl QsCodec for FnCodec {
	fn parse(&self, search: &str) -> Result<QsRecord, CodecError> {
		(self.parse)(search)
	}

	fn stringify(&self, record: &QsRecord) -> Result<String, CodecError> {
		(self.stringify)(record)
	}
}

impl core::fmt::Debug for FnCodec {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("FnCodec").finish_non_exhaustive()
	}
}
