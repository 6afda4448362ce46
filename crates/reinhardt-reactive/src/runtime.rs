//! Reactive Runtime
//!
//! The runtime owns the dependency graph shared by every [`Signal`](crate::Signal),
//! [`Memo`](crate::Memo) and [`Effect`](crate::Effect) on the current thread.
//!
//! ## Propagation model
//!
//! 1. **Observer Stack**: the Effect or Memo currently executing sits on top of the stack.
//! 2. **Dependency Tracking**: reading a Signal or Memo records an edge from the source
//!    to the current observer.
//! 3. **Invalidation**: when a source changes, dependent Memos are marked dirty and the
//!    change is forwarded to *their* subscribers.
//! 4. **Effect dispatch**: effects run synchronously inside the notifying call.
//!
//! Query-string stores rely on step 4: a navigation that refreshes the search signal
//! re-runs every subscriber before the navigation call returns.

use core::cell::RefCell;
use core::sync::atomic::{AtomicUsize, Ordering};

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Unique identifier for reactive nodes (Signals, Effects, Memos)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Allocates a fresh identifier.
	pub fn new() -> Self {
		static NEXT_ID: AtomicUsize = AtomicUsize::new(0);
		Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

/// Kind of reactive node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
	/// Source of reactivity
	Signal,
	/// Side effect re-run when its dependencies change
	Effect,
	/// Cached derivation
	Memo,
}

/// Entry of the observer stack
#[derive(Debug, Clone)]
pub struct Observer {
	/// Node currently collecting dependencies
	pub id: NodeId,
	/// Kind of the observing node
	pub node_type: NodeType,
}

/// Dependency graph node
#[derive(Debug, Default)]
pub(crate) struct DependencyNode {
	/// Nodes that read this node
	pub(crate) subscribers: Vec<NodeId>,
	/// Nodes this node reads
	pub(crate) dependencies: Vec<NodeId>,
}

/// Per-thread reactive runtime
pub struct Runtime {
	observer_stack: RefCell<Vec<Observer>>,
	pub(crate) dependency_graph: RefCell<BTreeMap<NodeId, DependencyNode>>,
}

impl Runtime {
	/// Creates an empty runtime.
	pub fn new() -> Self {
		Self {
			observer_stack: RefCell::new(Vec::new()),
			dependency_graph: RefCell::new(BTreeMap::new()),
		}
	}

	/// Returns the node currently collecting dependencies, if any.
	pub fn current_observer(&self) -> Option<NodeId> {
		self.observer_stack.borrow().last().map(|observer| observer.id)
	}

	/// Pushes an observer; dependencies read afterwards are attributed to it.
	pub fn push_observer(&self, observer: Observer) {
		self.observer_stack.borrow_mut().push(observer);
	}

	/// Pops the innermost observer.
	pub fn pop_observer(&self) -> Option<Observer> {
		self.observer_stack.borrow_mut().pop()
	}

	/// Records that the current observer reads `source`.
	pub fn track_dependency(&self, source: NodeId) {
		let Some(observer_id) = self.current_observer() else {
			return;
		};
		if observer_id == source {
			return;
		}
		let mut graph = self.dependency_graph.borrow_mut();

		let source_node = graph.entry(source).or_default();
		if !source_node.subscribers.contains(&observer_id) {
			source_node.subscribers.push(observer_id);
		}

		let observer_node = graph.entry(observer_id).or_default();
		if !observer_node.dependencies.contains(&source) {
			observer_node.dependencies.push(source);
		}
	}

	/// Propagates a change of `source` through the graph.
	///
	/// Dirty memos forward the change to their own subscribers. Effects run before
	/// this returns.
	pub fn notify_signal_change(&self, source: NodeId) {
		let subscribers = match self.dependency_graph.borrow().get(&source) {
			Some(node) => node.subscribers.clone(),
			None => return,
		};

		let mut effects = Vec::new();
		for subscriber in subscribers {
			if crate::memo::invalidate_memo(subscriber) {
				self.notify_signal_change(subscriber);
			} else if crate::effect::is_effect(subscriber) {
				effects.push(subscriber);
			}
		}

		for effect_id in effects {
			crate::effect::Effect::execute_effect(effect_id);
		}
	}

	/// Forgets what `node_id` read, so a re-run can record fresh dependencies.
	pub fn clear_dependencies(&self, node_id: NodeId) {
		let mut graph = self.dependency_graph.borrow_mut();

		let dependencies = match graph.get_mut(&node_id) {
			Some(node) => core::mem::take(&mut node.dependencies),
			None => return,
		};
		for dependency in dependencies {
			if let Some(dep_node) = graph.get_mut(&dependency) {
				dep_node.subscribers.retain(|&id| id != node_id);
			}
		}
	}

	/// Removes a dropped node and every edge touching it.
	pub fn remove_node(&self, node_id: NodeId) {
		self.clear_dependencies(node_id);
		let removed = self.dependency_graph.borrow_mut().remove(&node_id);
		if let Some(node) = removed {
			let mut graph = self.dependency_graph.borrow_mut();
			for subscriber in node.subscribers {
				if let Some(sub_node) = graph.get_mut(&subscriber) {
					sub_node.dependencies.retain(|&id| id != node_id);
				}
			}
		}
	}

	/// Whether the graph knows `node_id`.
	pub fn has_node(&self, node_id: NodeId) -> bool {
		self.dependency_graph.borrow().contains_key(&node_id)
	}

	/// Number of nodes reading `node_id`.
	pub fn subscriber_count(&self, node_id: NodeId) -> usize {
		self.dependency_graph
			.borrow()
			.get(&node_id)
			.map(|node| node.subscribers.len())
			.unwrap_or(0)
	}
}

impl Default for Runtime {
	fn default() -> Self {
		Self::new()
	}
}

// One runtime per thread; in the browser that is the whole application.
thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Runs `f` with the current thread's runtime.
pub fn with_runtime<F, R>(f: F) -> R
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.with(f)
}

/// Like [`with_runtime`] but tolerates a destroyed thread-local (used from `Drop`).
pub(crate) fn try_with_runtime<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.try_with(f).ok()
}
