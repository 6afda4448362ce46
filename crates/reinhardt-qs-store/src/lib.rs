//! # Reinhardt QS Store
//!
//! Reactive stores bound to the URL query string.
//!
//! A [`NavigationBridge`] keeps a reactive copy of `location.search` current by
//! listening to popstate and intercepting `pushState`/`replaceState`. Stores created
//! from a [`QsUtils`] decode declared keys from it and write changes back through the
//! history API.
//!
//! ```ignore
//! use reinhardt_qs_codec::presets;
//! use reinhardt_qs_store::{QsUtils, UpdateOptions};
//!
//! let utils = QsUtils::new()?;
//! let store = utils.create_search_params_store([
//!     ("q", presets::string().into()),
//!     ("page", presets::int().into()),
//! ])?;
//!
//! let _effect = store.subscribe(|values| render(values));
//! store.update("page", 2, &UpdateOptions::default())?;
//! ```

#[macro_use]
pub mod logging;

pub mod bridge;
pub mod error;
pub mod history;
pub mod options;
pub mod store;
pub mod utils;

pub use bridge::NavigationBridge;
pub use error::{NavigationError, QsError, QsResult};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHost;
pub use history::{HistoryEntry, Listener, ListenerId, MemoryHost, NavigationHost};
pub use options::UpdateOptions;
pub use store::{SearchParamStore, SearchParamsStore};
pub use utils::{QsUtils, QsUtilsBuilder};
