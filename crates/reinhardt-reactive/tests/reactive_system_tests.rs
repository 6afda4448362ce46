//! Integration tests for the reactive runtime
//!
//! 1. Effects re-run synchronously, including for changes made during their own run
//! 2. Memo values are cached and recomputed only after a dependency changed
//! 3. Dropped nodes leave no edges behind

use reinhardt_reactive::{Effect, Memo, Signal, with_runtime};
use serial_test::serial;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
#[serial]
fn test_effect_writing_through_a_memo_sees_final_state() {
	let search = Signal::new(String::from("?a=1"));
	let seen = Rc::new(RefCell::new(Vec::new()));

	let source = search.clone();
	let has_b = Memo::new(move || source.get().contains("b="));
	let (memo, writer, log) = (has_b.clone(), search.clone(), seen.clone());
	let _effect = Effect::new(move || {
		let present = memo.get();
		log.borrow_mut().push(present);
		if !present {
			writer.set(String::from("?a=1&b=2"));
		}
	});

	assert_eq!(*seen.borrow(), vec![false, true]);
	assert_eq!(search.get_untracked(), "?a=1&b=2");
}

#[test]
#[serial]
fn test_effect_observes_each_write() {
	let search = Signal::new(String::new());
	let seen = Rc::new(RefCell::new(Vec::new()));

	let (source, log) = (search.clone(), seen.clone());
	let _effect = Effect::new(move || log.borrow_mut().push(source.get()));

	search.set("?a=1".to_string());
	search.set("?a=2".to_string());

	assert_eq!(*seen.borrow(), vec!["", "?a=1", "?a=2"]);
}

#[test]
#[serial]
fn test_memo_is_cached_between_changes() {
	let count = Signal::new(5);
	let computations = Rc::new(Cell::new(0));

	let (source, counter) = (count.clone(), computations.clone());
	let doubled = Memo::new(move || {
		counter.set(counter.get() + 1);
		source.get() * 2
	});

	assert_eq!(doubled.get(), 10);
	assert_eq!(doubled.get(), 10);
	assert_eq!(computations.get(), 1);

	count.set(10);
	assert_eq!(doubled.get(), 20);
	assert_eq!(doubled.get(), 20);
	assert_eq!(computations.get(), 2);
}

#[test]
#[serial]
fn test_effect_over_memo_chain_runs_once_per_change() {
	let search = Signal::new(String::from("?n=1"));
	let runs = Rc::new(Cell::new(0));

	let source = search.clone();
	let parsed = Memo::new(move || source.get().trim_start_matches('?').to_string());
	let parsed_source = parsed.clone();
	let length = Memo::new(move || parsed_source.get().len());

	let (length_source, counter) = (length.clone(), runs.clone());
	let _effect = Effect::new(move || {
		let _ = length_source.get();
		counter.set(counter.get() + 1);
	});

	search.set(String::from("?n=12"));

	assert_eq!(runs.get(), 2);
	assert_eq!(length.get(), 4);
}

#[test]
#[serial]
fn test_dropped_memo_releases_subscription() {
	let search = Signal::new(0);
	{
		let source = search.clone();
		let memo = Memo::new(move || source.get() + 1);
		assert_eq!(memo.get(), 1);
		assert_eq!(with_runtime(|rt| rt.subscriber_count(search.id())), 1);
	}

	assert_eq!(with_runtime(|rt| rt.subscriber_count(search.id())), 0);
}
