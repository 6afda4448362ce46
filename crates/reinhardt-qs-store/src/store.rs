//! Query-string stores
//!
//! [`SearchParamsStore`] maps a set of declared keys to typed values read from the
//! bridge's parsed record, and writes them back through the navigation host.
//! [`SearchParamStore`] is the same thing narrowed to one key.
//!
//! ## Update flow
//!
//! 1. Unless `force` is set, requests equal to the current values are dropped.
//! 2. Each declared key is encoded. Keys without a default whose value is absent
//!    (or an empty list) are omitted, as are keys whose encoder fails or yields nothing.
//! 3. Keys with a default are decoded again and omitted when they read back as the
//!    default, so writing a default always removes the key.
//! 4. The result is merged over the current record (undeclared keys survive),
//!    stringified and pushed or replaced.

use std::rc::Rc;

use indexmap::IndexMap;
use reinhardt_qs_codec::{
	Equality, FromValue, IntoParamValue, ParamValues, QsRecord, SearchParam, Value,
};
use reinhardt_reactive::{Effect, Memo};

use crate::bridge::NavigationBridge;
use crate::error::{QsError, QsResult};
use crate::options::UpdateOptions;

type Params = IndexMap<String, SearchParam>;

/// Outcome of the pure part of an update.
enum Plan {
	/// The request equals the current values.
	Unchanged,
	/// The search string to navigate to (`"?a=1"` or `""`).
	Navigate(String),
}

struct StoreInner {
	bridge: NavigationBridge,
	params: Rc<Params>,
	equality: Rc<dyn Equality>,
	values: Memo<QsResult<ParamValues>>,
}

/// Typed, reactive view over a set of declared query keys.
///
/// ```ignore
/// let store = utils.create_search_params_store([
///     ("page", presets::int().into()),
///     ("tag", presets::string_array().into()),
/// ])?;
///
/// store.update("page", 2, &UpdateOptions::default())?;
/// assert_eq!(store.values()?.get_as::<i64>("page"), Some(2));
/// ```
#[derive(Clone)]
pub struct SearchParamsStore {
	inner: Rc<StoreInner>,
}

fn read_values(params: &Params, record: &QsRecord) -> ParamValues {
	params
		.iter()
		.map(|(key, param)| {
			let (value, error) = param.read(record.get(key));
			if let Some(error) = error {
				crate::warn_log!("Failed to decode query key {:?}: {}", key, error);
			}
			(key.clone(), value)
		})
		.collect()
}

impl SearchParamsStore {
	pub(crate) fn new(
		bridge: NavigationBridge,
		params: Params,
		equality: Rc<dyn Equality>,
	) -> Self {
		let params = Rc::new(params);

		let qs = bridge.qs_memo().clone();
		let declared = params.clone();
		let values = Memo::new(move || {
			qs.with(|record| match record {
				Ok(record) => Ok(read_values(&declared, record)),
				Err(error) => Err(error.clone()),
			})
		});

		Self {
			inner: Rc::new(StoreInner {
				bridge,
				params,
				equality,
				values,
			}),
		}
	}

	/// Current typed values, one entry per declared key, tracked.
	///
	/// Fails only when the codec cannot parse the current search string.
	pub fn values(&self) -> QsResult<ParamValues> {
		self.inner.values.get()
	}

	/// The memo behind [`values`](Self::values).
	pub fn values_memo(&self) -> &Memo<QsResult<ParamValues>> {
		&self.inner.values
	}

	/// Declared keys in declaration order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.inner.params.keys().map(String::as_str)
	}

	pub fn param(&self, key: &str) -> Option<&SearchParam> {
		self.inner.params.get(key)
	}

	pub fn bridge(&self) -> &NavigationBridge {
		&self.inner.bridge
	}

	/// Sets one key, keeping the current values of the others.
	pub fn update(
		&self,
		key: &str,
		value: impl IntoParamValue,
		options: &UpdateOptions,
	) -> QsResult<()> {
		let next = self.with_key(key, value)?;
		self.update_all(&next, options)
	}

	/// Writes a full set of values. Declared keys missing from `next` are absent.
	pub fn update_all(&self, next: &ParamValues, options: &UpdateOptions) -> QsResult<()> {
		let search = match self.plan(next, options)? {
			Plan::Unchanged => {
				crate::debug_log!("Skipping update: values are unchanged");
				return Ok(());
			}
			Plan::Navigate(search) => search,
		};

		let host = self.inner.bridge.host();
		let mut target = host.pathname()?;
		target.push_str(&search);
		if options.keep_hash {
			target.push_str(&host.hash()?);
		}

		crate::debug_log!(
			"{} {:?}",
			if options.replace { "Replacing with" } else { "Pushing" },
			target
		);
		let state = options.history_state();
		if options.replace {
			host.replace_state(&state, options.unused_arg(), &target)?;
		} else {
			host.push_state(&state, options.unused_arg(), &target)?;
		}
		Ok(())
	}

	/// The search string [`update`](Self::update) would navigate to, without navigating.
	pub fn update_dry(
		&self,
		key: &str,
		value: impl IntoParamValue,
		options: &UpdateOptions,
	) -> QsResult<String> {
		let next = self.with_key(key, value)?;
		self.update_all_dry(&next, options)
	}

	/// The search string [`update_all`](Self::update_all) would navigate to.
	///
	/// Only the `?query` part is returned (`""` when every key is omitted); the
	/// pathname and fragment come from the host at navigation time and are left out
	/// so previews compare equal across pages. Unchanged requests report the current
	/// search string.
	pub fn update_all_dry(&self, next: &ParamValues, options: &UpdateOptions) -> QsResult<String> {
		match self.plan(next, options)? {
			Plan::Unchanged => Ok(self.inner.bridge.search_untracked()),
			Plan::Navigate(search) => Ok(search),
		}
	}

	/// Runs `f` with the current values now and synchronously after every change.
	///
	/// If `f` itself updates the store, it runs again once it returns, so its last
	/// call sees the values its own update produced. The subscription lives as long
	/// as the returned [`Effect`].
	pub fn subscribe<F>(&self, f: F) -> Effect
	where
		F: Fn(&ParamValues) + 'static,
	{
		let values = self.inner.values.clone();
		Effect::new(move || match values.get() {
			Ok(current) => f(&current),
			Err(error) => crate::warn_log!("Skipping subscriber: {}", error),
		})
	}

	fn with_key(&self, key: &str, value: impl IntoParamValue) -> QsResult<ParamValues> {
		if !self.inner.params.contains_key(key) {
			return Err(QsError::UnknownKey(key.to_string()));
		}
		let mut next = self.inner.values.get_untracked()?;
		next.set(key, value);
		Ok(next)
	}

	fn plan(&self, next: &ParamValues, options: &UpdateOptions) -> QsResult<Plan> {
		let params = &self.inner.params;
		let equality = &self.inner.equality;

		for key in next.keys().filter(|key| !params.contains_key(*key)) {
			crate::warn_log!("Ignoring undeclared query key {:?}", key);
		}
		let requested: ParamValues = params
			.keys()
			.map(|key| (key.as_str(), next.get(key).cloned()))
			.collect();

		if !options.force {
			let current = self.inner.values.get_untracked()?;
			if equality.values_equal(&requested, &current) {
				return Ok(Plan::Unchanged);
			}
		}

		let mut record: QsRecord = (*self.inner.bridge.qs_memo().get_untracked()?).clone();
		for (key, param) in params.iter() {
			let value = requested.get(key);
			let omit_absent = match value {
				None => true,
				Some(value) => param.is_array() && value.is_empty_list(),
			};
			if omit_absent && !param.has_default() {
				record.shift_remove(key);
				continue;
			}

			let encoded = match param.encode_raw(value) {
				Ok(encoded) => encoded,
				Err(error) => {
					crate::warn_log!("Failed to encode query key {:?}: {}", key, error);
					None
				}
			};
			let Some(raw) = encoded else {
				record.shift_remove(key);
				continue;
			};

			if param.has_default() {
				let (decoded, _) = param.read(Some(&raw));
				if equality.is_equal(decoded.as_ref(), param.default_value()) {
					record.shift_remove(key);
					continue;
				}
			}
			record.insert(key.clone(), raw);
		}

		let query = self.inner.bridge.codec().stringify(&record)?;
		Ok(Plan::Navigate(if query.is_empty() {
			String::new()
		} else {
			format!("?{query}")
		}))
	}
}

impl core::fmt::Debug for SearchParamsStore {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("SearchParamsStore")
			.field("params", &self.inner.params)
			.field("bridge", &self.inner.bridge)
			.finish()
	}
}

/// A [`SearchParamsStore`] with a single key.
#[derive(Clone)]
pub struct SearchParamStore {
	inner: SearchParamsStore,
	name: Rc<str>,
	value: Memo<QsResult<Option<Value>>>,
}

impl SearchParamStore {
	pub(crate) fn new(inner: SearchParamsStore, name: &str) -> Self {
		let name: Rc<str> = Rc::from(name);
		let values = inner.values_memo().clone();
		let key = name.clone();
		let value = Memo::new(move || {
			values.with(|values| match values {
				Ok(values) => Ok(values.get(&key).cloned()),
				Err(error) => Err(error.clone()),
			})
		});
		Self { inner, name, value }
	}

	/// Current typed value, tracked. `None` means absent.
	pub fn value(&self) -> QsResult<Option<Value>> {
		self.value.get()
	}

	/// Current value converted with [`FromValue`].
	pub fn value_as<T: FromValue>(&self) -> QsResult<Option<T>> {
		Ok(self.value()?.as_ref().and_then(T::from_value))
	}

	pub fn value_memo(&self) -> &Memo<QsResult<Option<Value>>> {
		&self.value
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn update(&self, value: impl IntoParamValue, options: &UpdateOptions) -> QsResult<()> {
		self.inner.update(&self.name, value, options)
	}

	pub fn update_dry(&self, value: impl IntoParamValue, options: &UpdateOptions) -> QsResult<String> {
		self.inner.update_dry(&self.name, value, options)
	}

	/// Runs `f` with the current value now and after every change.
	pub fn subscribe<F>(&self, f: F) -> Effect
	where
		F: Fn(Option<&Value>) + 'static,
	{
		let value = self.value.clone();
		Effect::new(move || match value.get() {
			Ok(current) => f(current.as_ref()),
			Err(error) => crate::warn_log!("Skipping subscriber: {}", error),
		})
	}

	/// The underlying one-key multi-param store.
	pub fn inner(&self) -> &SearchParamsStore {
		&self.inner
	}
}

impl core::fmt::Debug for SearchParamStore {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("SearchParamStore")
			.field("name", &self.name)
			.field("param", &self.inner.param(&self.name))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::history::{MemoryHost, NavigationHost};
	use reinhardt_qs_codec::{DeepEqual, UrlEncodedCodec, presets};
	use rstest::rstest;
	use serde_json::json;
	use serial_test::serial;

	fn store(url: &str, params: Vec<(&str, SearchParam)>) -> (MemoryHost, SearchParamsStore) {
		let host = MemoryHost::new(url).unwrap();
		let bridge =
			NavigationBridge::new(Rc::new(host.clone()), Rc::new(UrlEncodedCodec)).unwrap();
		let params = params
			.into_iter()
			.map(|(key, param)| (key.to_string(), param))
			.collect();
		(host, SearchParamsStore::new(bridge, params, Rc::new(DeepEqual)))
	}

	#[rstest]
	#[serial]
	fn test_values_cover_every_declared_key() {
		let (_host, store) = store(
			"https://example.com/?page=3&other=x",
			vec![
				("page", presets::int().into()),
				("q", presets::string_optional().into()),
			],
		);

		let values = store.values().unwrap();

		assert_eq!(values.keys().collect::<Vec<_>>(), vec!["page", "q"]);
		assert_eq!(values.get_as::<i64>("page"), Some(3));
		assert_eq!(values.get("q"), None);
	}

	#[rstest]
	#[case(3, "?page=3&other=x")]
	#[case(1, "?other=x")]
	#[serial]
	fn test_default_is_omitted(#[case] page: i64, #[case] expected: &str) {
		let (_host, store) = store(
			"https://example.com/?page=2&other=x",
			vec![("page", presets::bounded_int(1, 10).with_default(1).into())],
		);

		let search = store
			.update_dry("page", page, &UpdateOptions::default())
			.unwrap();

		assert_eq!(search, expected);
	}

	#[rstest]
	#[serial]
	fn test_dry_run_returns_query_only() {
		let (host, store) = store(
			"https://example.com/shop/items#top",
			vec![("q", presets::string().into())],
		);

		let search = store
			.update_dry("q", "rust", &UpdateOptions::new().keep_hash())
			.unwrap();

		assert_eq!(search, "?q=rust");
		assert_eq!(host.pathname().unwrap(), "/shop/items");
		assert_eq!(host.entries().len(), 1);
	}

	#[rstest]
	#[serial]
	fn test_unchanged_request_does_not_navigate() {
		let (host, store) = store(
			"https://example.com/?q=rust",
			vec![("q", presets::string().into())],
		);

		store.update("q", "rust", &UpdateOptions::default()).unwrap();
		assert_eq!(host.entries().len(), 1);
		assert_eq!(
			store.update_dry("q", "rust", &UpdateOptions::default()).unwrap(),
			"?q=rust"
		);

		store
			.update("q", "rust", &UpdateOptions::new().force())
			.unwrap();
		assert_eq!(host.entries().len(), 2);
	}

	#[rstest]
	#[serial]
	fn test_update_passes_state_and_replace() {
		let (host, store) = store(
			"https://example.com/list#top",
			vec![("q", presets::string().into())],
		);

		store
			.update(
				"q",
				"wasm",
				&UpdateOptions::new()
					.replace()
					.keep_hash()
					.with_state(json!({"source": "search-box"})),
			)
			.unwrap();

		assert_eq!(host.entries().len(), 1);
		assert_eq!(host.current_url().as_str(), "https://example.com/list?q=wasm#top");
		assert_eq!(host.current_state(), json!({"source": "search-box"}));
		assert_eq!(store.values().unwrap().get_as::<String>("q").as_deref(), Some("wasm"));
	}

	#[rstest]
	#[serial]
	fn test_unknown_key_is_rejected() {
		let (_host, store) = store("https://example.com/", vec![("q", presets::string().into())]);

		let result = store.update("missing", 1, &UpdateOptions::default());

		assert_eq!(result, Err(QsError::UnknownKey("missing".to_string())));
	}

	#[rstest]
	#[serial]
	fn test_single_param_store_projects_its_key() {
		let (host, multi) = store(
			"https://example.com/?b=true",
			vec![("b", presets::boolean_optional().into())],
		);
		let single = SearchParamStore::new(multi, "b");

		assert_eq!(single.name(), "b");
		assert_eq!(single.value_as::<bool>().unwrap(), Some(true));

		single.update(None::<bool>, &UpdateOptions::default()).unwrap();

		assert_eq!(host.search().unwrap(), "");
		assert_eq!(single.value().unwrap(), None);
	}
}
