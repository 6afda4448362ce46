//! # Reinhardt Reactive
//!
//! The fine-grained reactive runtime used by the Reinhardt query-string stores.
//!
//! - [`Signal`]: a writable source value
//! - [`Memo`]: a cached derivation, invalidated when its sources change
//! - [`Effect`]: a side effect re-run synchronously when its sources change
//!
//! The runtime is thread-local and single-threaded; the browser main thread is the
//! intended home.

pub mod effect;
pub mod memo;
pub mod runtime;
pub mod signal;

pub use effect::Effect;
pub use memo::Memo;
pub use runtime::{NodeId, NodeType, Observer, Runtime, with_runtime};
pub use signal::Signal;
