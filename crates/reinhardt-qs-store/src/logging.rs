//! Logging abstraction layer for the query-string stores
//!
//! The same macros work on both targets: in the browser they write to the devtools
//! console (debug builds only), natively they forward to `tracing` so the embedding
//! application picks the subscriber and level.
//!
//! ## Macro Overview
//!
//! | Macro | WASM (debug builds) | Non-WASM |
//! |-------|---------------------|----------|
//! | `debug_log!` | `console.debug` | `tracing::debug!` |
//! | `info_log!` | `console.info` | `tracing::info!` |
//! | `warn_log!` | `console.warn` | `tracing::warn!` |
//! | `error_log!` | `console.error` | `tracing::error!` |
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_qs_store::{debug_log, warn_log};
//!
//! debug_log!("Navigating to {}", target);
//! warn_log!("Failed to decode search param {:?}: {}", key, error);
//! ```

#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}

/// Logs a debug message
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::logging::__private::web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// Logs a debug message
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::logging::__private::tracing::debug!($($arg)*);
	}};
}

/// No-op debug_log in release wasm builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::logging::__private::web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// Logs an info message
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::logging::__private::tracing::info!($($arg)*);
	}};
}

/// No-op info_log in release wasm builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message
///
/// Used for per-key decode and encode failures, which never abort a read or update.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::logging::__private::web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning message
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::logging::__private::tracing::warn!($($arg)*);
	}};
}

/// No-op warn_log in release wasm builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::logging::__private::web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error message
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::logging::__private::tracing::error!($($arg)*);
	}};
}

/// No-op error_log in release wasm builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{}};
}

#[cfg(test)]
mod tests {
	#[test]
	fn test_log_macros_compile() {
		let key = "page";
		let count = 3;

		debug_log!("debug {} {}", key, count);
		info_log!("info {key}");
		warn_log!("warn {:?}", key);
		error_log!("error {}", count);
	}
}
