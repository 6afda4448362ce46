//! Fine-grained reactive runtime
//!
//! Stores expose their values as [`Memo`]s over a [`Signal`] holding the current
//! search string; [`Effect`]s subscribe to them.

// Re-export all reinhardt-reactive functionality
pub use reinhardt_reactive::*;
