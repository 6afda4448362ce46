//! Navigation bridge, hosts and stores
//!
//! This module provides access to reinhardt-qs-store:
//!
//! - **Hosts**: `BrowserHost` on wasm32 and [`MemoryHost`] everywhere
//! - **Bridge**: [`NavigationBridge`], the reactive copy of `location.search`
//! - **Stores**: [`SearchParamsStore`] and [`SearchParamStore`], created from [`QsUtils`]

// Re-export all reinhardt-qs-store functionality
pub use reinhardt_qs_store::*;
