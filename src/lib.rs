//! # Reinhardt QS
//!
//! Typed, reactive state bound to the URL query string.
//!
//! Declare which query keys a page owns and how each one is typed, then read
//! them as reactive values and write them back through the history API. Garbage
//! in the URL never fails a read: it decodes to the key's default or to absence.
//!
//! ## Crates
//!
//! - [`reactive`]: the Signal / Memo / Effect runtime
//! - [`codec`]: query-string codecs, typed values, param definitions and presets
//! - [`store`]: the navigation bridge, hosts and stores
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use reinhardt_qs::prelude::*;
//!
//! let utils = QsUtils::new()?;
//! let filters = utils.create_search_params_store([
//!     ("q", presets::string().into()),
//!     ("page", presets::bounded_int(1, 100).with_default(1).into()),
//!     ("tag", presets::string_array().into()),
//! ])?;
//!
//! let _render = filters.subscribe(|values| {
//!     let page = values.get_as::<i64>("page").unwrap_or(1);
//!     // ...
//! });
//!
//! // `?page=3`, then back to no query at all since 1 is the default
//! filters.update("page", 3, &UpdateOptions::default())?;
//! filters.update("page", 1, &UpdateOptions::new().replace())?;
//! ```
//!
//! ## Feature Flags
//!
//! - `testing` - `override_search` on bridges and utility instances, for driving
//!   stores in tests without navigating

pub mod codec;
pub mod reactive;
pub mod store;

pub use reinhardt_qs_codec::{
	ArrayParam, BracketCodec, CodecError, Date, DeepEqual, Equality, FnCodec, FromValue,
	IntoParamValue, ParamError, ParamFactory, ParamValues, QsCodec, QsRecord, QsValue,
	ScalarParam, SearchParam, UrlEncodedCodec, Value, presets,
};
pub use reinhardt_qs_store::{
	MemoryHost, NavigationBridge, NavigationError, NavigationHost, QsError, QsResult, QsUtils,
	QsUtilsBuilder, SearchParamStore, SearchParamsStore, UpdateOptions,
};
#[cfg(target_arch = "wasm32")]
pub use reinhardt_qs_store::BrowserHost;

/// Everything an application typically needs.
pub mod prelude {
	pub use crate::{
		DeepEqual, Equality, FromValue, IntoParamValue, ParamValues, QsError, QsResult, QsUtils,
		SearchParam, SearchParamStore, SearchParamsStore, UpdateOptions, Value, presets,
	};

	pub use reinhardt_reactive::{Effect, Memo, Signal};
}
