//! Navigation Bridge
//!
//! Keeps a reactive copy of the current search string in sync with the host:
//!
//! 1. The initial search string is read at construction.
//! 2. A popstate listener re-reads it after back/forward navigation.
//! 3. An interception hook re-reads it after every `pushState`/`replaceState`.
//!
//! The parsed record and the raw key/value pairs are memos over that copy.
//! [`destroy`](NavigationBridge::destroy) removes the popstate listener and disarms the
//! hook; the hook itself stays installed on the host.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use reinhardt_qs_codec::{QsCodec, QsRecord};
use reinhardt_reactive::{Memo, Signal};
use url::form_urlencoded;

use crate::error::{NavigationError, QsError, QsResult};
use crate::history::{ListenerId, NavigationHost};

struct BridgeInner {
	host: Rc<dyn NavigationHost>,
	codec: Rc<dyn QsCodec>,
	search: Signal<String>,
	qs: Memo<QsResult<Rc<QsRecord>>>,
	search_params: Memo<Vec<(String, String)>>,
	destroyed: Cell<bool>,
	popstate: Cell<Option<ListenerId>>,
}

impl BridgeInner {
	fn refresh(&self) -> Result<bool, NavigationError> {
		let next = self.host.search()?;
		if self.search.with_untracked(|current| *current == next) {
			return Ok(false);
		}
		crate::debug_log!("Search changed to {:?}", next);
		self.search.set(next);
		Ok(true)
	}

	fn refresh_logged(&self) {
		if let Err(error) = self.refresh() {
			crate::error_log!("Failed to read the current search string: {}", error);
		}
	}

	fn detach(&self) {
		if let Some(id) = self.popstate.take() {
			self.host.remove_popstate_listener(id);
		}
	}
}

impl Drop for BridgeInner {
	fn drop(&mut self) {
		self.detach();
	}
}

/// Reactive view of the host's search string.
///
/// Clones share state; the popstate listener is removed on [`destroy`](Self::destroy)
/// or when the last clone is dropped.
#[derive(Clone)]
pub struct NavigationBridge {
	inner: Rc<BridgeInner>,
}

impl NavigationBridge {
	/// Reads the current search string and subscribes to navigation on `host`.
	pub fn new(host: Rc<dyn NavigationHost>, codec: Rc<dyn QsCodec>) -> QsResult<Self> {
		let search = Signal::new(host.search()?);

		let source = search.clone();
		let parser = codec.clone();
		let qs = Memo::new(move || {
			parser
				.parse(&source.get())
				.map(Rc::new)
				.map_err(QsError::from)
		});

		let source = search.clone();
		let search_params = Memo::new(move || {
			let search = source.get();
			form_urlencoded::parse(search.strip_prefix('?').unwrap_or(&search).as_bytes())
				.into_owned()
				.collect()
		});

		let inner = Rc::new(BridgeInner {
			host: host.clone(),
			codec,
			search,
			qs,
			search_params,
			destroyed: Cell::new(false),
			popstate: Cell::new(None),
		});

		let weak = Rc::downgrade(&inner);
		let id = host.add_popstate_listener(Rc::new(move || {
			if let Some(inner) = Weak::upgrade(&weak) {
				inner.refresh_logged();
			}
		}))?;
		inner.popstate.set(Some(id));

		let weak = Rc::downgrade(&inner);
		host.intercept_navigation(Rc::new(move || {
			if let Some(inner) = Weak::upgrade(&weak) {
				if !inner.destroyed.get() {
					inner.refresh_logged();
				}
			}
		}))?;

		crate::debug_log!("Navigation bridge created at {:?}", inner.search.get_untracked());
		Ok(Self { inner })
	}

	/// The cached search string (`"?a=1"` or `""`), tracked.
	pub fn search(&self) -> String {
		self.inner.search.get()
	}

	/// The cached search string without subscribing.
	pub fn search_untracked(&self) -> String {
		self.inner.search.get_untracked()
	}

	/// The parsed record of the cached search string, tracked.
	pub fn qs(&self) -> QsResult<Rc<QsRecord>> {
		self.inner.qs.get()
	}

	/// The memo behind [`qs`](Self::qs), for building derived memos.
	pub fn qs_memo(&self) -> &Memo<QsResult<Rc<QsRecord>>> {
		&self.inner.qs
	}

	/// Decoded key/value pairs in URL order, repeated keys included, tracked.
	pub fn search_params(&self) -> Vec<(String, String)> {
		self.inner.search_params.get()
	}

	pub fn host(&self) -> &Rc<dyn NavigationHost> {
		&self.inner.host
	}

	pub fn codec(&self) -> &Rc<dyn QsCodec> {
		&self.inner.codec
	}

	/// Re-reads the host's search string; returns whether it changed.
	pub fn refresh(&self) -> Result<bool, NavigationError> {
		self.inner.refresh()
	}

	/// Stops following navigation. Calling it again does nothing.
	pub fn destroy(&self) {
		if self.inner.destroyed.replace(true) {
			return;
		}
		self.inner.detach();
		crate::debug_log!("Navigation bridge destroyed");
	}

	pub fn is_destroyed(&self) -> bool {
		self.inner.destroyed.get()
	}

	/// Replaces the cached search string without navigating.
	#[cfg(any(test, feature = "testing"))]
	pub fn override_search(&self, search: impl Into<String>) {
		let search = search.into();
		if self.inner.search.with_untracked(|current| *current != search) {
			self.inner.search.set(search);
		}
	}
}

impl core::fmt::Debug for NavigationBridge {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("NavigationBridge")
			.field("search", &self.search_untracked())
			.field("destroyed", &self.is_destroyed())
			.finish()
	}
}
