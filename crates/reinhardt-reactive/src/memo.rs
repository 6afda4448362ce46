//! Memo - Cached Derivation
//!
//! A `Memo<T>` caches the result of a computation over other Signals and Memos. It is
//! computed once on creation, marked dirty when any dependency changes, and recomputed
//! lazily on the next read. A dirty memo forwards the change to its own subscribers,
//! so chains such as `search -> parsed record -> typed values` stay consistent.

use core::cell::{Cell, RefCell};
use core::fmt;

extern crate alloc;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::{Rc, Weak};

use super::runtime::{NodeId, NodeType, Observer, try_with_runtime, with_runtime};

thread_local! {
	static MEMO_FLAGS: RefCell<BTreeMap<NodeId, Weak<Cell<bool>>>> = const { RefCell::new(BTreeMap::new()) };
}

/// Marks the memo `id` dirty. Returns `false` when `id` is not a live memo.
pub(crate) fn invalidate_memo(id: NodeId) -> bool {
	let flag = MEMO_FLAGS
		.try_with(|flags| flags.borrow().get(&id).and_then(Weak::upgrade))
		.ok()
		.flatten();
	match flag {
		Some(dirty) => {
			dirty.set(true);
			true
		}
		None => false,
	}
}

type ComputeFn<T> = Box<dyn FnMut() -> T + 'static>;

/// A lazily refreshed, cached computation.
pub struct Memo<T: 'static> {
	id: NodeId,
	value: Rc<RefCell<T>>,
	compute: Rc<RefCell<ComputeFn<T>>>,
	dirty: Rc<Cell<bool>>,
}

impl<T: 'static> Clone for Memo<T> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			value: self.value.clone(),
			compute: self.compute.clone(),
			dirty: self.dirty.clone(),
		}
	}
}

impl<T: 'static> Memo<T> {
	/// Creates a memo and computes its first value.
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() -> T + 'static,
	{
		let id = NodeId::new();
		let mut compute: ComputeFn<T> = Box::new(f);
		let initial = Self::run_tracked(id, &mut compute);

		let dirty = Rc::new(Cell::new(false));
		MEMO_FLAGS.with(|flags| {
			flags.borrow_mut().insert(id, Rc::downgrade(&dirty));
		});

		Self {
			id,
			value: Rc::new(RefCell::new(initial)),
			compute: Rc::new(RefCell::new(compute)),
			dirty,
		}
	}

	fn run_tracked(id: NodeId, compute: &mut ComputeFn<T>) -> T {
		with_runtime(|rt| {
			rt.clear_dependencies(id);
			rt.push_observer(Observer {
				id,
				node_type: NodeType::Memo,
			});
		});
		let value = compute();
		with_runtime(|rt| {
			rt.pop_observer();
		});
		value
	}

	fn refresh(&self) {
		if !self.dirty.get() {
			return;
		}
		self.dirty.set(false);
		let next = Self::run_tracked(self.id, &mut self.compute.borrow_mut());
		*self.value.borrow_mut() = next;
	}

	/// Returns the (refreshed) value and subscribes the current observer.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		with_runtime(|rt| rt.track_dependency(self.id));
		self.get_untracked()
	}

	/// Returns the (refreshed) value without subscribing.
	pub fn get_untracked(&self) -> T
	where
		T: Clone,
	{
		self.refresh();
		self.value.borrow().clone()
	}

	/// Borrows the (refreshed) value and subscribes the current observer.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		with_runtime(|rt| rt.track_dependency(self.id));
		self.refresh();
		f(&self.value.borrow())
	}

	/// Forces a recomputation on the next read.
	pub fn mark_dirty(&self) {
		self.dirty.set(true);
	}

	/// Whether the cached value is stale.
	pub fn is_dirty(&self) -> bool {
		self.dirty.get()
	}

	/// Graph identifier of this memo.
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T: 'static> Drop for Memo<T> {
	fn drop(&mut self) {
		if Rc::strong_count(&self.dirty) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
			let _ = MEMO_FLAGS.try_with(|flags| {
				flags.borrow_mut().remove(&self.id);
			});
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Memo<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Memo")
			.field("id", &self.id)
			.field("dirty", &self.dirty.get())
			.field("value", &*self.value.borrow())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Effect, Signal};
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_memo_computes_on_creation_and_caches() {
		let computations = Rc::new(Cell::new(0));
		let counter = computations.clone();
		let memo = Memo::new(move || {
			counter.set(counter.get() + 1);
			42
		});

		assert_eq!(memo.get(), 42);
		assert_eq!(memo.get(), 42);
		assert_eq!(computations.get(), 1);
	}

	#[test]
	#[serial]
	fn test_memo_recomputes_after_signal_change() {
		let count = Signal::new(5);
		let computations = Rc::new(Cell::new(0));

		let source = count.clone();
		let counter = computations.clone();
		let doubled = Memo::new(move || {
			counter.set(counter.get() + 1);
			source.get() * 2
		});

		count.set(10);
		assert!(doubled.is_dirty());
		assert_eq!(doubled.get(), 20);
		assert_eq!(doubled.get(), 20);
		assert_eq!(computations.get(), 2);
	}

	#[test]
	#[serial]
	fn test_memo_chain_propagates() {
		let search = Signal::new(String::from("a"));

		let source = search.clone();
		let upper = Memo::new(move || source.get().to_uppercase());
		let upper_source = upper.clone();
		let length = Memo::new(move || upper_source.get().len());

		search.set(String::from("abc"));

		assert_eq!(length.get(), 3);
		assert_eq!(upper.get(), "ABC");
	}

	#[test]
	#[serial]
	fn test_effect_sees_memo_update_synchronously() {
		let search = Signal::new(1);
		let seen = Rc::new(RefCell::new(alloc::vec::Vec::new()));

		let source = search.clone();
		let squared = Memo::new(move || source.get() * source.get());
		let memo = squared.clone();
		let log = seen.clone();
		let _effect = Effect::new(move || log.borrow_mut().push(memo.get()));

		search.set(3);
		search.set(4);

		assert_eq!(*seen.borrow(), alloc::vec![1, 9, 16]);
	}

	#[test]
	#[serial]
	fn test_mark_dirty_forces_recompute() {
		let computations = Rc::new(Cell::new(0));
		let counter = computations.clone();
		let memo = Memo::new(move || {
			counter.set(counter.get() + 1);
			counter.get()
		});

		memo.mark_dirty();

		assert_eq!(memo.get(), 2);
	}
}
