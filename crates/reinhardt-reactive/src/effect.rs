//! Effect - Reactive Side Effects
//!
//! An `Effect` runs a closure immediately and re-runs it synchronously whenever a
//! Signal or Memo it read during its last run changes. Dependencies are re-collected
//! on every run.
//!
//! A change notified while the effect is still running is not dropped: the effect runs
//! again once the current run returns, so its last run always sees the latest values.
//!
//! ```ignore
//! use reinhardt_reactive::{Effect, Signal};
//!
//! let count = Signal::new(0);
//! let seen = count.clone();
//! let _effect = Effect::new(move || println!("count = {}", seen.get()));
//!
//! count.set(1); // prints before `set` returns
//! ```

use core::cell::{Cell, RefCell};

extern crate alloc;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;

use super::runtime::{NodeId, NodeType, Observer, try_with_runtime, with_runtime};

/// Upper bound on back-to-back re-runs of one effect, so an effect that always writes
/// its own dependency terminates.
const MAX_RERUNS: usize = 100;

type EffectFn = Box<dyn FnMut() + 'static>;

struct EffectSlot {
	/// `None` while the closure is executing.
	run: Option<EffectFn>,
	/// Set when a dependency changed during the current run.
	rerun: bool,
}

thread_local! {
	static EFFECTS: RefCell<BTreeMap<NodeId, EffectSlot>> = const { RefCell::new(BTreeMap::new()) };
}

/// Whether `node_id` is a live effect.
pub(crate) fn is_effect(node_id: NodeId) -> bool {
	EFFECTS
		.try_with(|effects| effects.borrow().contains_key(&node_id))
		.unwrap_or(false)
}

/// A side effect bound to the reactive graph.
///
/// Dropping the handle disposes the effect; keep it alive for as long as the effect
/// should keep reacting.
pub struct Effect {
	id: NodeId,
	disposed: Rc<Cell<bool>>,
}

impl Effect {
	/// Creates an effect and runs it once.
	pub fn new<F>(mut f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		let id = NodeId::new();
		let disposed = Rc::new(Cell::new(false));

		let guard = disposed.clone();
		EFFECTS.with(|effects| {
			effects.borrow_mut().insert(
				id,
				EffectSlot {
					run: Some(Box::new(move || {
						if !guard.get() {
							f();
						}
					})),
					rerun: false,
				},
			);
		});

		Self::execute_effect(id);

		Self { id, disposed }
	}

	/// Re-runs the effect identified by `effect_id`, re-collecting its dependencies.
	///
	/// Called while the effect is already running, this only records that another run
	/// is needed.
	pub(crate) fn execute_effect(effect_id: NodeId) {
		let taken = EFFECTS.with(|effects| {
			let mut effects = effects.borrow_mut();
			let slot = effects.get_mut(&effect_id)?;
			let run = slot.run.take();
			if run.is_none() {
				slot.rerun = true;
			}
			run
		});
		let Some(mut run) = taken else {
			return;
		};

		for _ in 0..=MAX_RERUNS {
			with_runtime(|rt| {
				rt.clear_dependencies(effect_id);
				rt.push_observer(Observer {
					id: effect_id,
					node_type: NodeType::Effect,
				});
			});

			run();

			with_runtime(|rt| {
				rt.pop_observer();
			});

			let again = EFFECTS.with(|effects| {
				effects
					.borrow_mut()
					.get_mut(&effect_id)
					.is_some_and(|slot| core::mem::take(&mut slot.rerun))
			});
			if !again {
				break;
			}
		}

		EFFECTS.with(|effects| {
			if let Some(slot) = effects.borrow_mut().get_mut(&effect_id) {
				slot.run = Some(run);
				slot.rerun = false;
			}
		});
	}

	/// Identifier of this effect in the dependency graph.
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Whether [`dispose`](Self::dispose) has been called.
	pub fn is_disposed(&self) -> bool {
		self.disposed.get()
	}

	/// Stops the effect and releases its graph node. Calling it twice is harmless.
	pub fn dispose(&self) {
		if self.disposed.replace(true) {
			return;
		}
		let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		let _ = EFFECTS.try_with(|effects| {
			effects.borrow_mut().remove(&self.id);
		});
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl core::fmt::Debug for Effect {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Effect")
			.field("id", &self.id)
			.field("disposed", &self.disposed.get())
			.finish()
	}
}
