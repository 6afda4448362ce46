//! In-memory navigation host.
//!
//! Behaves like a browser tab without a page: a stack of entries, a cursor, popstate
//! on `back`/`forward`/`go`, and interception hooks run after every push or replace.
//! Clones share the same history.

use std::cell::RefCell;
use std::rc::Rc;

use url::Url;

use super::{Listener, ListenerId, NavigationHost, location_parts};
use crate::error::NavigationError;

/// One entry of the history stack.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
	pub url: Url,
	pub state: serde_json::Value,
}

struct MemoryHistory {
	entries: Vec<HistoryEntry>,
	index: usize,
	popstate: Vec<(ListenerId, Listener)>,
	interceptors: Vec<Listener>,
}

impl MemoryHistory {
	fn current(&self) -> &HistoryEntry {
		&self.entries[self.index]
	}

	fn resolve(&self, url: &str) -> Result<Url, NavigationError> {
		self.current()
			.url
			.join(url)
			.map_err(|e| NavigationError::InvalidUrl(format!("{url}: {e}")))
	}
}

/// An in-memory history stack.
///
/// ```ignore
/// let host = MemoryHost::new("https://example.com/items")?;
/// host.push_state(&serde_json::json!({}), "", "/items?page=2")?;
/// assert_eq!(host.search()?, "?page=2");
/// assert!(host.back());
/// ```
#[derive(Clone)]
pub struct MemoryHost {
	history: Rc<RefCell<MemoryHistory>>,
}

impl MemoryHost {
	/// Creates a history with a single entry at the absolute `url`.
	pub fn new(url: &str) -> Result<Self, NavigationError> {
		let url = Url::parse(url).map_err(|e| NavigationError::InvalidUrl(format!("{url}: {e}")))?;
		Ok(Self {
			history: Rc::new(RefCell::new(MemoryHistory {
				entries: vec![HistoryEntry {
					url,
					state: serde_json::Value::Null,
				}],
				index: 0,
				popstate: Vec::new(),
				interceptors: Vec::new(),
			})),
		})
	}

	/// URL of the current entry.
	pub fn current_url(&self) -> Url {
		self.history.borrow().current().url.clone()
	}

	/// State of the current entry.
	pub fn current_state(&self) -> serde_json::Value {
		self.history.borrow().current().state.clone()
	}

	/// Every entry, oldest first.
	pub fn entries(&self) -> Vec<HistoryEntry> {
		self.history.borrow().entries.clone()
	}

	/// Position of the current entry in [`entries`](Self::entries).
	pub fn index(&self) -> usize {
		self.history.borrow().index
	}

	pub fn back(&self) -> bool {
		self.go(-1)
	}

	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Moves `delta` entries through the history and fires popstate.
	///
	/// Returns `false` (and fires nothing) when the target is out of range or
	/// `delta` is zero.
	pub fn go(&self, delta: isize) -> bool {
		let listeners = {
			let mut history = self.history.borrow_mut();
			let target = history.index.checked_add_signed(delta);
			match target {
				Some(target) if delta != 0 && target < history.entries.len() => {
					history.index = target;
				}
				_ => return false,
			}
			history
				.popstate
				.iter()
				.map(|(_, listener)| listener.clone())
				.collect::<Vec<_>>()
		};

		for listener in listeners {
			listener();
		}
		true
	}

	/// Rewrites the current entry without firing any event or hook.
	///
	/// Models URL changes the page is not told about.
	pub fn set_location(&self, url: &str) -> Result<(), NavigationError> {
		let mut history = self.history.borrow_mut();
		let resolved = history.resolve(url)?;
		let index = history.index;
		history.entries[index].url = resolved;
		Ok(())
	}

	pub fn popstate_listener_count(&self) -> usize {
		self.history.borrow().popstate.len()
	}

	pub fn interceptor_count(&self) -> usize {
		self.history.borrow().interceptors.len()
	}

	fn navigate(&self, state: &serde_json::Value, url: &str, replace: bool) -> Result<(), NavigationError> {
		let hooks = {
			let mut history = self.history.borrow_mut();
			let entry = HistoryEntry {
				url: history.resolve(url)?,
				state: state.clone(),
			};
			if replace {
				let index = history.index;
				history.entries[index] = entry;
			} else {
				let next = history.index + 1;
				history.entries.truncate(next);
				history.entries.push(entry);
				history.index = next;
			}
			history.interceptors.clone()
		};

		for hook in hooks {
			hook();
		}
		Ok(())
	}
}

impl NavigationHost for MemoryHost {
	fn pathname(&self) -> Result<String, NavigationError> {
		Ok(location_parts(&self.history.borrow().current().url).0)
	}

	fn search(&self) -> Result<String, NavigationError> {
		Ok(location_parts(&self.history.borrow().current().url).1)
	}

	fn hash(&self) -> Result<String, NavigationError> {
		Ok(location_parts(&self.history.borrow().current().url).2)
	}

	fn push_state(&self, state: &serde_json::Value, _unused: &str, url: &str) -> Result<(), NavigationError> {
		self.navigate(state, url, false)
	}

	fn replace_state(
		&self,
		state: &serde_json::Value,
		_unused: &str,
		url: &str,
	) -> Result<(), NavigationError> {
		self.navigate(state, url, true)
	}

	fn add_popstate_listener(&self, listener: Listener) -> Result<ListenerId, NavigationError> {
		let id = ListenerId::next();
		self.history.borrow_mut().popstate.push((id, listener));
		Ok(id)
	}

	fn remove_popstate_listener(&self, id: ListenerId) {
		self.history
			.borrow_mut()
			.popstate
			.retain(|(listener_id, _)| *listener_id != id);
	}

	fn intercept_navigation(&self, hook: Listener) -> Result<(), NavigationError> {
		self.history.borrow_mut().interceptors.push(hook);
		Ok(())
	}
}

impl core::fmt::Debug for MemoryHost {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		let history = self.history.borrow();
		f.debug_struct("MemoryHost")
			.field("entries", &history.entries)
			.field("index", &history.index)
			.field("popstate_listeners", &history.popstate.len())
			.field("interceptors", &history.interceptors.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::cell::Cell;

	#[fixture]
	fn host() -> MemoryHost {
		MemoryHost::new("https://example.com/items").unwrap()
	}

	fn counter() -> (Rc<Cell<usize>>, Listener) {
		let count = Rc::new(Cell::new(0));
		let inner = count.clone();
		(count, Rc::new(move || inner.set(inner.get() + 1)))
	}

	#[rstest]
	fn test_push_state_resolves_relative_urls(host: MemoryHost) {
		host.push_state(&json!({"n": 1}), "", "?page=2#top").unwrap();

		assert_eq!(host.pathname().unwrap(), "/items");
		assert_eq!(host.search().unwrap(), "?page=2");
		assert_eq!(host.hash().unwrap(), "#top");
		assert_eq!(host.current_state(), json!({"n": 1}));
		assert_eq!(host.entries().len(), 2);
	}

	#[rstest]
	fn test_replace_state_keeps_length(host: MemoryHost) {
		host.replace_state(&json!({}), "", "/other?x=1").unwrap();

		assert_eq!(host.entries().len(), 1);
		assert_eq!(host.current_url().as_str(), "https://example.com/other?x=1");
	}

	#[rstest]
	fn test_push_truncates_forward_entries(host: MemoryHost) {
		host.push_state(&json!({}), "", "?a=1").unwrap();
		host.push_state(&json!({}), "", "?a=2").unwrap();
		assert!(host.back());

		host.push_state(&json!({}), "", "?a=3").unwrap();

		let searches: Vec<_> = host
			.entries()
			.iter()
			.map(|entry| entry.url.query().unwrap_or_default().to_string())
			.collect();
		assert_eq!(searches, vec!["", "a=1", "a=3"]);
		assert!(!host.forward());
	}

	#[rstest]
	fn test_go_fires_popstate_only_when_moving(host: MemoryHost) {
		let (fired, listener) = counter();
		host.add_popstate_listener(listener).unwrap();
		host.push_state(&json!({}), "", "?a=1").unwrap();

		assert!(!host.go(0));
		assert!(!host.forward());
		assert_eq!(fired.get(), 0);

		assert!(host.back());
		assert_eq!(fired.get(), 1);
		assert_eq!(host.search().unwrap(), "");
		assert!(!host.go(-5));
	}

	#[rstest]
	fn test_removed_popstate_listener_is_not_called(host: MemoryHost) {
		let (fired, listener) = counter();
		let id = host.add_popstate_listener(listener).unwrap();
		host.push_state(&json!({}), "", "?a=1").unwrap();

		host.remove_popstate_listener(id);
		host.back();

		assert_eq!(fired.get(), 0);
		assert_eq!(host.popstate_listener_count(), 0);
	}

	#[rstest]
	fn test_interceptors_run_after_push_and_replace(host: MemoryHost) {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let (reader, log) = (host.clone(), seen.clone());
		host.intercept_navigation(Rc::new(move || log.borrow_mut().push(reader.search().unwrap())))
			.unwrap();

		host.push_state(&json!({}), "", "?a=1").unwrap();
		host.replace_state(&json!({}), "", "?a=2").unwrap();

		assert_eq!(*seen.borrow(), vec!["?a=1", "?a=2"]);
	}

	#[rstest]
	fn test_set_location_is_silent(host: MemoryHost) {
		let (pops, popstate) = counter();
		let (hooks, hook) = counter();
		host.add_popstate_listener(popstate).unwrap();
		host.intercept_navigation(hook).unwrap();

		host.set_location("?silent=1").unwrap();

		assert_eq!(host.search().unwrap(), "?silent=1");
		assert_eq!((pops.get(), hooks.get()), (0, 0));
	}

	#[test]
	fn test_new_rejects_relative_url() {
		assert!(matches!(
			MemoryHost::new("/relative"),
			Err(NavigationError::InvalidUrl(_))
		));
	}
}
