//! Query-string codecs, typed values and param definitions
//!
//! This module provides access to reinhardt-qs-codec:
//!
//! - **Codecs**: [`UrlEncodedCodec`] (the browser's format), [`BracketCodec`]
//!   (`key[]=a&key[]=b`) and [`FnCodec`] for anything else
//! - **Values**: [`Value`], the dynamic typed value a param decodes to
//! - **Params**: [`SearchParam`] definitions built with [`ScalarParam`] / [`ArrayParam`]
//! - **Presets**: ready-made params for strings, numbers, booleans, enums, dates and JSON
//!
//! ## Example
//!
//! ```rust,ignore
//! use reinhardt_qs::codec::{SearchParam, Value, presets};
//!
//! let tag = SearchParam::from(presets::string_array());
//! let page = SearchParam::scalar()
//!     .with_decode(|raw| Ok(raw.and_then(|s| s.parse::<i64>().ok()).map(Value::from)))
//!     .with_default(1);
//! ```

// Re-export all reinhardt-qs-codec functionality
pub use reinhardt_qs_codec::*;
