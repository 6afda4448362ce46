//! # Reinhardt QS Codec
//!
//! The data layer of the Reinhardt query-string stores: raw records, typed values,
//! param definitions and the preset library. Nothing here touches the browser.
//!
//! ## Overview
//!
//! - [`QsCodec`] turns `?tag=a&tag=b&page=2` into a [`QsRecord`] and back
//!   ([`UrlEncodedCodec`] by default, [`BracketCodec`] for `tag[]=a` lists)
//! - [`SearchParam`] maps one key of that record to a typed [`Value`]
//! - [`presets`] provides definitions for strings, numbers, booleans, enums and dates
//! - [`Equality`] decides when two values are "the same" ([`DeepEqual`] by default)
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_qs_codec::{QsCodec, SearchParam, UrlEncodedCodec, presets};
//!
//! let record = UrlEncodedCodec.parse("?n=1&n=abc&n=2")?;
//! let numbers = SearchParam::from(presets::int_array());
//! let (value, _) = numbers.read(record.get("n"));
//! assert_eq!(value, Some(vec![1, 2].into()));
//! ```

pub mod codec;
pub mod date;
pub mod equality;
pub mod error;
pub mod number;
pub mod param;
pub mod presets;
pub mod value;

pub use codec::{BracketCodec, FnCodec, QsCodec, QsRecord, QsValue, UrlEncodedCodec};
pub use date::Date;
pub use equality::{DeepEqual, Equality};
pub use error::{CodecError, ParamError, ParamResult};
pub use param::{ArrayParam, ParamFactory, ScalarParam, SearchParam};
pub use value::{FromValue, IntoParamValue, ParamValues, Value};
