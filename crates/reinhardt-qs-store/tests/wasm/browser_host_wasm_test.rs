//! Browser host tests
//!
//! Run with `wasm-pack test --headless --chrome crates/reinhardt-qs-store`.

#[cfg(target_arch = "wasm32")]
mod browser_host_tests {
	use reinhardt_qs_codec::presets;
	use reinhardt_qs_store::{BrowserHost, NavigationHost, QsUtils, UpdateOptions};
	use serde_json::json;
	use std::cell::Cell;
	use std::rc::Rc;
	use wasm_bindgen_test::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn reset(host: &BrowserHost) {
		let path = host.pathname().unwrap();
		host.replace_state(&json!({}), "", &path).unwrap();
	}

	#[wasm_bindgen_test]
	fn test_reads_window_location() {
		let host = BrowserHost::new().unwrap();
		reset(&host);

		host.replace_state(&json!({}), "", "?page=2#top").unwrap();

		assert_eq!(host.search().unwrap(), "?page=2");
		assert_eq!(host.hash().unwrap(), "#top");
		reset(&host);
	}

	#[wasm_bindgen_test]
	fn test_store_follows_direct_history_calls() {
		let host = BrowserHost::new().unwrap();
		reset(&host);
		let utils = QsUtils::with_host(host.clone()).unwrap();
		let q = utils
			.create_search_param_store("q", presets::string())
			.unwrap();

		let history = web_sys::window().unwrap().history().unwrap();
		history
			.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some("?q=direct"))
			.unwrap();

		assert_eq!(q.value_as::<String>().unwrap().as_deref(), Some("direct"));
		utils.destroy();
		reset(&host);
	}

	#[wasm_bindgen_test]
	fn test_store_update_writes_url() {
		let host = BrowserHost::new().unwrap();
		reset(&host);
		let utils = QsUtils::with_host(host.clone()).unwrap();
		let page = utils
			.create_search_param_store("page", presets::int_optional())
			.unwrap();

		page.update(3, &UpdateOptions::new().replace()).unwrap();

		assert_eq!(host.search().unwrap(), "?page=3");
		assert_eq!(page.value_as::<i64>().unwrap(), Some(3));
		utils.destroy();
		reset(&host);
	}

	#[wasm_bindgen_test]
	fn test_destroyed_bridge_ignores_navigation() {
		let host = BrowserHost::new().unwrap();
		reset(&host);
		let utils = QsUtils::with_host(host.clone()).unwrap();

		utils.destroy();
		host.replace_state(&json!({}), "", "?after=1").unwrap();

		assert_eq!(utils.search(), "");
		reset(&host);
	}

	#[wasm_bindgen_test]
	fn test_removed_popstate_listener_stops_firing() {
		let host = BrowserHost::new().unwrap();
		let calls = Rc::new(Cell::new(0));
		let counter = calls.clone();
		let id = host
			.add_popstate_listener(Rc::new(move || counter.set(counter.get() + 1)))
			.unwrap();
		let window = web_sys::window().unwrap();
		let popstate = web_sys::Event::new("popstate").unwrap();

		window.dispatch_event(&popstate).unwrap();
		host.remove_popstate_listener(id);
		host.remove_popstate_listener(id);
		window.dispatch_event(&popstate).unwrap();

		assert_eq!(calls.get(), 1);
	}
}
