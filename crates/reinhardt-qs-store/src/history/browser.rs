//! Browser navigation host backed by `window.location` and `window.history`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{Event, History, Window};

use super::{Listener, ListenerId, NavigationHost};
use crate::error::NavigationError;

type PopstateClosure = Closure<dyn FnMut(Event)>;
type HistoryClosure = Closure<dyn FnMut(JsValue, JsValue, JsValue) -> Result<JsValue, JsValue>>;

const INTERCEPTED_METHODS: [&str; 2] = ["pushState", "replaceState"];

fn js_error(value: JsValue) -> NavigationError {
	NavigationError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Navigation host for the current browser window.
///
/// Clones share their popstate listeners.
#[derive(Clone)]
pub struct BrowserHost {
	window: Window,
	listeners: Rc<RefCell<Vec<(ListenerId, PopstateClosure)>>>,
}

impl BrowserHost {
	pub fn new() -> Result<Self, NavigationError> {
		let window = web_sys::window().ok_or(NavigationError::NoWindow)?;
		Ok(Self {
			window,
			listeners: Rc::new(RefCell::new(Vec::new())),
		})
	}

	fn history(&self) -> Result<History, NavigationError> {
		self.window.history().map_err(|_| NavigationError::NoHistory)
	}

	/// Looks up the method on the `history` object itself so that wrappers installed
	/// by anyone (including [`intercept_navigation`](NavigationHost::intercept_navigation))
	/// are honoured.
	fn history_method(history: &History, name: &str) -> Result<Function, NavigationError> {
		Reflect::get(history, &JsValue::from_str(name))
			.map_err(js_error)?
			.dyn_into::<Function>()
			.map_err(|_| NavigationError::Js(format!("history.{name} is not a function")))
	}

	fn call_history(
		&self,
		name: &str,
		state: &serde_json::Value,
		unused: &str,
		url: &str,
	) -> Result<(), NavigationError> {
		let history = self.history()?;
		let method = Self::history_method(&history, name)?;
		let state = js_sys::JSON::parse(&state.to_string()).map_err(js_error)?;
		method
			.call3(&history, &state, &JsValue::from_str(unused), &JsValue::from_str(url))
			.map_err(js_error)?;
		Ok(())
	}
}

impl NavigationHost for BrowserHost {
	fn pathname(&self) -> Result<String, NavigationError> {
		self.window.location().pathname().map_err(js_error)
	}

	fn search(&self) -> Result<String, NavigationError> {
		self.window.location().search().map_err(js_error)
	}

	fn hash(&self) -> Result<String, NavigationError> {
		self.window.location().hash().map_err(js_error)
	}

	fn push_state(&self, state: &serde_json::Value, unused: &str, url: &str) -> Result<(), NavigationError> {
		self.call_history("pushState", state, unused, url)
	}

	fn replace_state(
		&self,
		state: &serde_json::Value,
		unused: &str,
		url: &str,
	) -> Result<(), NavigationError> {
		self.call_history("replaceState", state, unused, url)
	}

	fn add_popstate_listener(&self, listener: Listener) -> Result<ListenerId, NavigationError> {
		let closure = Closure::wrap(Box::new(move |_event: Event| {
			listener();
		}) as Box<dyn FnMut(_)>);

		self.window
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			.map_err(js_error)?;

		let id = ListenerId::next();
		self.listeners.borrow_mut().push((id, closure));
		Ok(id)
	}

	fn remove_popstate_listener(&self, id: ListenerId) {
		let removed = {
			let mut listeners = self.listeners.borrow_mut();
			listeners
				.iter()
				.position(|(listener_id, _)| *listener_id == id)
				.map(|index| listeners.remove(index))
		};
		let Some((_, closure)) = removed else {
			return;
		};
		if let Err(error) = self
			.window
			.remove_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		{
			crate::warn_log!("Failed to remove popstate listener: {}", js_error(error));
		}
	}

	fn intercept_navigation(&self, hook: Listener) -> Result<(), NavigationError> {
		let history = self.history()?;

		for name in INTERCEPTED_METHODS {
			let previous = Self::history_method(&history, name)?;
			let target = history.clone();
			let hook = hook.clone();
			let wrapper: HistoryClosure = Closure::wrap(Box::new(
				move |state: JsValue, unused: JsValue, url: JsValue| -> Result<JsValue, JsValue> {
					let result = previous.call3(&target, &state, &unused, &url)?;
					hook();
					Ok(result)
				},
			)
				as Box<dyn FnMut(JsValue, JsValue, JsValue) -> Result<JsValue, JsValue>>);

			Reflect::set(&history, &JsValue::from_str(name), wrapper.as_ref()).map_err(js_error)?;
			// The history object keeps calling the wrapper for the rest of the page.
			wrapper.forget();
		}
		Ok(())
	}
}

impl core::fmt::Debug for BrowserHost {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("BrowserHost")
			.field("popstate_listeners", &self.listeners.borrow().len())
			.finish()
	}
}
