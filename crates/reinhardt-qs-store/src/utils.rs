//! Store factory bound to one navigation bridge.

use std::rc::Rc;

use indexmap::IndexMap;
use reinhardt_qs_codec::{
	DeepEqual, Equality, ParamFactory, QsCodec, QsRecord, SearchParam, UrlEncodedCodec,
};

use crate::bridge::NavigationBridge;
use crate::error::{NavigationError, QsResult};
use crate::history::NavigationHost;
use crate::store::{SearchParamStore, SearchParamsStore};

#[cfg(target_arch = "wasm32")]
fn default_host() -> Result<Rc<dyn NavigationHost>, NavigationError> {
	Ok(Rc::new(crate::history::BrowserHost::new()?))
}

#[cfg(not(target_arch = "wasm32"))]
fn default_host() -> Result<Rc<dyn NavigationHost>, NavigationError> {
	Ok(Rc::new(crate::history::MemoryHost::new("http://localhost/")?))
}

/// Entry point: one bridge to the host plus the codec and equality its stores use.
///
/// ```ignore
/// let utils = QsUtils::new()?;
/// let page = utils.create_search_param_store("page", presets::int())?;
/// let filters = utils.create_search_params_store_with(|def| {
///     vec![
///         ("q", presets::string().into()),
///         ("tag", def.array().into()),
///     ]
/// })?;
/// ```
#[derive(Clone)]
pub struct QsUtils {
	bridge: NavigationBridge,
	equality: Rc<dyn Equality>,
}

impl QsUtils {
	/// Binds to the browser window on wasm32, and to a fresh in-memory history at
	/// `http://localhost/` elsewhere.
	pub fn new() -> QsResult<Self> {
		Self::builder().build()
	}

	/// Binds to `host` with the default codec and equality.
	pub fn with_host(host: impl NavigationHost + 'static) -> QsResult<Self> {
		Self::builder().host(host).build()
	}

	pub fn builder() -> QsUtilsBuilder {
		QsUtilsBuilder::default()
	}

	/// The cached search string, tracked.
	pub fn search(&self) -> String {
		self.bridge.search()
	}

	/// The parsed record of the cached search string, tracked.
	pub fn qs(&self) -> QsResult<Rc<QsRecord>> {
		self.bridge.qs()
	}

	/// Raw decoded pairs in URL order, tracked.
	pub fn search_params(&self) -> Vec<(String, String)> {
		self.bridge.search_params()
	}

	pub fn host(&self) -> &Rc<dyn NavigationHost> {
		self.bridge.host()
	}

	pub fn bridge(&self) -> &NavigationBridge {
		&self.bridge
	}

	/// Re-reads the host's search string; returns whether it changed.
	pub fn refresh(&self) -> Result<bool, NavigationError> {
		self.bridge.refresh()
	}

	/// Stops following navigation. Existing stores keep their last values.
	pub fn destroy(&self) {
		self.bridge.destroy();
	}

	pub fn is_destroyed(&self) -> bool {
		self.bridge.is_destroyed()
	}

	/// Replaces the cached search string without navigating.
	#[cfg(any(test, feature = "testing"))]
	pub fn override_search(&self, search: impl Into<String>) {
		self.bridge.override_search(search);
	}

	/// Creates a store over the given `(key, param)` declarations, in order.
	pub fn create_search_params_store<K, P, I>(&self, params: I) -> QsResult<SearchParamsStore>
	where
		K: Into<String>,
		P: Into<SearchParam>,
		I: IntoIterator<Item = (K, P)>,
	{
		let params: IndexMap<String, SearchParam> = params
			.into_iter()
			.map(|(key, param)| (key.into(), param.into()))
			.collect();
		crate::debug_log!(
			"Creating store for {:?}",
			params.keys().collect::<Vec<_>>()
		);
		Ok(SearchParamsStore::new(
			self.bridge.clone(),
			params,
			self.equality.clone(),
		))
	}

	/// Like [`create_search_params_store`](Self::create_search_params_store), with
	/// declarations built from a [`ParamFactory`].
	pub fn create_search_params_store_with<K, P, F>(&self, build: F) -> QsResult<SearchParamsStore>
	where
		K: Into<String>,
		P: Into<SearchParam>,
		F: FnOnce(&ParamFactory) -> Vec<(K, P)>,
	{
		self.create_search_params_store(build(&ParamFactory))
	}

	/// Creates a store for the single key `name`.
	pub fn create_search_param_store(
		&self,
		name: &str,
		param: impl Into<SearchParam>,
	) -> QsResult<SearchParamStore> {
		let inner = self.create_search_params_store([(name, param.into())])?;
		Ok(SearchParamStore::new(inner, name))
	}

	pub fn create_search_param_store_with<P, F>(
		&self,
		name: &str,
		build: F,
	) -> QsResult<SearchParamStore>
	where
		P: Into<SearchParam>,
		F: FnOnce(&ParamFactory) -> P,
	{
		self.create_search_param_store(name, build(&ParamFactory))
	}
}

impl core::fmt::Debug for QsUtils {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("QsUtils")
			.field("bridge", &self.bridge)
			.finish_non_exhaustive()
	}
}

/// Builder for [`QsUtils`].
#[derive(Default)]
pub struct QsUtilsBuilder {
	host: Option<Rc<dyn NavigationHost>>,
	codec: Option<Rc<dyn QsCodec>>,
	equality: Option<Rc<dyn Equality>>,
}

impl QsUtilsBuilder {
	pub fn host(mut self, host: impl NavigationHost + 'static) -> Self {
		self.host = Some(Rc::new(host));
		self
	}

	/// Query-string codec; [`UrlEncodedCodec`] by default.
	pub fn codec(mut self, codec: impl QsCodec + 'static) -> Self {
		self.codec = Some(Rc::new(codec));
		self
	}

	/// Value equality for no-op detection and default omission; [`DeepEqual`] by default.
	pub fn equality(mut self, equality: impl Equality + 'static) -> Self {
		self.equality = Some(Rc::new(equality));
		self
	}

	pub fn build(self) -> QsResult<QsUtils> {
		let host = match self.host {
			Some(host) => host,
			None => default_host()?,
		};
		let codec = self
			.codec
			.unwrap_or_else(|| Rc::new(UrlEncodedCodec) as Rc<dyn QsCodec>);
		let equality = self
			.equality
			.unwrap_or_else(|| Rc::new(DeepEqual) as Rc<dyn Equality>);

		Ok(QsUtils {
			bridge: NavigationBridge::new(host, codec)?,
			equality,
		})
	}
}
