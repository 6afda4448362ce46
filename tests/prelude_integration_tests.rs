//! Integration tests for the facade crate
//!
//! Exercises the prelude end to end: declare, read, update, and round-trip through
//! browser-style history on an in-memory host.

use reinhardt_qs::prelude::*;
use reinhardt_qs::store::NavigationHost;
use reinhardt_qs::{BracketCodec, MemoryHost};
use rstest::*;
use serde_json::json;
use serial_test::serial;
use std::cell::RefCell;
use std::rc::Rc;

#[fixture]
fn host() -> MemoryHost {
	MemoryHost::new("https://shop.example.com/products?color=green&page=2").unwrap()
}

/// A product listing with filters, pagination and a sort order
#[rstest]
#[serial]
fn test_product_listing_flow(host: MemoryHost) {
	let utils = QsUtils::with_host(host.clone()).unwrap();
	let filters = utils
		.create_search_params_store([
			(
				"color",
				SearchParam::from(presets::enumeration(&["red", "green", "blue"])),
			),
			("page", presets::bounded_int(1, 20).with_default(1).into()),
			("sizes", presets::enumeration_array(&["s", "m", "l"]).into()),
		])
		.unwrap();

	let values = filters.values().unwrap();
	assert_eq!(values.get_as::<String>("color").as_deref(), Some("green"));
	assert_eq!(values.get_as::<i64>("page"), Some(2));
	assert_eq!(values.get("sizes"), None);

	filters
		.update("sizes", vec!["m", "xl", "l"], &UpdateOptions::default())
		.unwrap();
	assert_eq!(
		host.search().unwrap(),
		"?color=green&page=2&sizes=m&sizes=xl&sizes=l"
	);
	assert_eq!(
		filters.values().unwrap().get_as::<Vec<String>>("sizes"),
		Some(vec!["m".to_string(), "l".to_string()])
	);

	filters
		.update("page", 1, &UpdateOptions::new().replace())
		.unwrap();
	assert_eq!(host.search().unwrap(), "?color=green&sizes=m&sizes=l");

	host.back();
	assert_eq!(filters.values().unwrap().get_as::<i64>("page"), Some(2));
	assert!(filters.values().unwrap().get("sizes").is_none());
}

/// Memos built on a store recompute only when its values change
#[rstest]
#[serial]
fn test_derived_memo(host: MemoryHost) {
	let utils = QsUtils::with_host(host.clone()).unwrap();
	let page = utils
		.create_search_param_store("page", presets::int())
		.unwrap();

	let source = page.clone();
	let offset = Memo::new(move || {
		source
			.value_as::<i64>()
			.ok()
			.flatten()
			.map_or(0, |page| (page - 1) * 25)
	});
	assert_eq!(offset.get(), 25);

	page.update(5, &UpdateOptions::default()).unwrap();
	assert_eq!(offset.get(), 100);
}

/// A bracket codec and case-insensitive equality configured through the builder
#[rstest]
#[serial]
fn test_builder_configuration() {
	let host = MemoryHost::new("https://example.com/?tag[]=Rust").unwrap();
	let utils = QsUtils::builder()
		.host(host.clone())
		.codec(BracketCodec)
		.equality(|a: Option<&Value>, b: Option<&Value>| match (a, b) {
			(Some(Value::List(a)), Some(Value::List(b))) => {
				a.len() == b.len()
					&& a.iter().zip(b).all(|(a, b)| {
						a.as_str().map(str::to_lowercase) == b.as_str().map(str::to_lowercase)
					})
			}
			_ => DeepEqual.is_equal(a, b),
		})
		.build()
		.unwrap();
	let tags = utils
		.create_search_param_store("tag", presets::string_array())
		.unwrap();
	let seen = Rc::new(RefCell::new(Vec::new()));
	let log = seen.clone();
	let _subscription = tags.subscribe(move |value| log.borrow_mut().push(value.cloned()));

	tags.update(vec!["rust"], &UpdateOptions::default()).unwrap();
	assert_eq!(host.entries().len(), 1);

	tags.update(vec!["rust", "wasm"], &UpdateOptions::default())
		.unwrap();
	assert_eq!(host.search().unwrap(), "?tag%5B%5D=rust&tag%5B%5D=wasm");
	assert_eq!(seen.borrow().len(), 2);
}

/// Navigation defaults loaded from JSON settings drive history writes
#[rstest]
#[serial]
fn test_update_options_from_settings() {
	let host = MemoryHost::new("https://shop.example.com/products?page=2#grid").unwrap();
	let utils = QsUtils::with_host(host.clone()).unwrap();
	let page = utils
		.create_search_param_store("page", presets::int_optional())
		.unwrap();
	let options: UpdateOptions = serde_json::from_value(json!({
		"replace": true,
		"keepHash": true,
		"state": {"source": "pager"},
	}))
	.unwrap();
	assert!(!options.force);

	page.update(3, &options).unwrap();

	assert_eq!(host.entries().len(), 1);
	assert_eq!(host.search().unwrap(), "?page=3");
	assert_eq!(host.hash().unwrap(), "#grid");
	assert_eq!(host.current_state(), json!({"source": "pager"}));
	assert_eq!(
		serde_json::to_value(&options).unwrap()["keepHash"],
		json!(true)
	);
}
