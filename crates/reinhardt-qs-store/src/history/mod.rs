//! Navigation hosts
//!
//! A [`NavigationHost`] is the platform boundary of the stores: it exposes the
//! current location, the two history primitives and the events needed to keep a
//! cached search string current.
//!
//! - [`BrowserHost`] (wasm32): `window.location` and `window.history`
//! - [`MemoryHost`]: an in-memory history stack for native targets and tests
//!
//! ## Interception
//!
//! [`intercept_navigation`](NavigationHost::intercept_navigation) must observe
//! every `pushState`/`replaceState`, including calls made by code that knows nothing
//! about this crate. Hooks compose: each one runs after the primitive and after every
//! hook installed before it. Hooks are never uninstalled; callers disarm them instead.

use core::sync::atomic::{AtomicU64, Ordering};
use std::rc::Rc;

use crate::error::NavigationError;

#[cfg(target_arch = "wasm32")]
mod browser;
mod memory;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHost;
pub use memory::{HistoryEntry, MemoryHost};

/// Callback invoked on navigation events.
pub type Listener = Rc<dyn Fn()>;

/// Handle of a registered popstate listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
	pub(crate) fn next() -> Self {
		static NEXT_ID: AtomicU64 = AtomicU64::new(0);
		Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
	}
}

/// Location and history access for the query-string bridge.
pub trait NavigationHost {
	/// Path of the current URL, e.g. `/items`.
	fn pathname(&self) -> Result<String, NavigationError>;

	/// Query of the current URL including `?`, or `""` when there is none.
	fn search(&self) -> Result<String, NavigationError>;

	/// Fragment of the current URL including `#`, or `""` when there is none.
	fn hash(&self) -> Result<String, NavigationError>;

	/// Adds a history entry for `url` (resolved against the current URL).
	fn push_state(&self, state: &serde_json::Value, unused: &str, url: &str) -> Result<(), NavigationError>;

	/// Replaces the current history entry with `url`.
	fn replace_state(
		&self,
		state: &serde_json::Value,
		unused: &str,
		url: &str,
	) -> Result<(), NavigationError>;

	/// Registers `listener` for back/forward navigation.
	fn add_popstate_listener(&self, listener: Listener) -> Result<ListenerId, NavigationError>;

	/// Unregisters a popstate listener. Unknown ids are ignored.
	fn remove_popstate_listener(&self, id: ListenerId);

	/// Runs `hook` after every `pushState` and `replaceState`, whoever calls them.
	fn intercept_navigation(&self, hook: Listener) -> Result<(), NavigationError>;
}

/// Location parts of a URL in `window.location` form.
pub(crate) fn location_parts(url: &url::Url) -> (String, String, String) {
	let search = match url.query() {
		Some(query) if !query.is_empty() => format!("?{query}"),
		_ => String::new(),
	};
	let hash = match url.fragment() {
		Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
		_ => String::new(),
	};
	(url.path().to_string(), search, hash)
}
