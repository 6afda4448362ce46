//! Signal - Reactive Source
//!
//! `Signal<T>` holds a value; reading it inside an Effect or Memo subscribes the
//! reader, writing it notifies every subscriber.
//!
//! ```ignore
//! use reinhardt_reactive::Signal;
//!
//! let search = Signal::new(String::new());
//! search.set("?page=2".to_string());
//! assert_eq!(search.get(), "?page=2");
//! ```

use core::cell::RefCell;
use core::fmt;

extern crate alloc;
use alloc::rc::Rc;

use super::runtime::{NodeId, try_with_runtime, with_runtime};

/// A reactive value cell.
///
/// Clones share the same value and graph node; the node is released when the last
/// clone is dropped.
#[derive(Clone)]
pub struct Signal<T: 'static> {
	id: NodeId,
	value: Rc<RefCell<T>>,
}

impl<T: 'static> Signal<T> {
	/// Creates a signal holding `value`.
	pub fn new(value: T) -> Self {
		Self {
			id: NodeId::new(),
			value: Rc::new(RefCell::new(value)),
		}
	}

	/// Returns a clone of the value and subscribes the current observer.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		with_runtime(|rt| rt.track_dependency(self.id));
		self.get_untracked()
	}

	/// Returns a clone of the value without subscribing.
	pub fn get_untracked(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Borrows the value without cloning and without subscribing.
	pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Replaces the value and notifies subscribers.
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	/// Graph identifier of this signal.
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T: 'static> Drop for Signal<T> {
	fn drop(&mut self) {
		if Rc::strong_count(&self.value) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("id", &self.id)
			.field("value", &*self.value.borrow())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::runtime::{NodeType, Observer};
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	#[case(0, 42)]
	#[case(-7, 7)]
	#[serial]
	fn test_signal_set(#[case] initial: i32, #[case] next: i32) {
		let signal = Signal::new(initial);
		assert_eq!(signal.get_untracked(), initial);

		signal.set(next);
		assert_eq!(signal.get_untracked(), next);
	}

	#[test]
	#[serial]
	fn test_signal_clones_share_value() {
		let first = Signal::new(String::from("?a=1"));
		let second = first.clone();

		first.set(String::from("?a=2"));

		assert_eq!(second.get_untracked(), "?a=2");
		assert_eq!(first.id(), second.id());
	}

	#[test]
	#[serial]
	fn test_signal_get_tracks_current_observer() {
		let signal = Signal::new(42);

		with_runtime(|rt| {
			let observer_id = NodeId::new();
			rt.push_observer(Observer {
				id: observer_id,
				node_type: NodeType::Effect,
			});
			let _ = signal.get();
			rt.pop_observer();

			let graph = rt.dependency_graph.borrow();
			assert!(graph.get(&signal.id()).unwrap().subscribers.contains(&observer_id));
		});
	}

	#[test]
	#[serial]
	fn test_last_clone_drop_releases_node() {
		let signal = Signal::new(1);
		let id = signal.id();
		with_runtime(|rt| {
			let observer_id = NodeId::new();
			rt.push_observer(Observer {
				id: observer_id,
				node_type: NodeType::Memo,
			});
			let _ = signal.get();
			rt.pop_observer();
		});
		let clone = signal.clone();

		drop(signal);
		assert!(with_runtime(|rt| rt.has_node(id)));

		drop(clone);
		assert!(!with_runtime(|rt| rt.has_node(id)));
	}
}
