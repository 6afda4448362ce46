//! Codec property tests
//!
//! Property-based tests for query-string codecs and number formatting.

use proptest::prelude::*;
use reinhardt_qs_codec::number::{format_number, parse_float, parse_int};
use reinhardt_qs_codec::{BracketCodec, QsCodec, QsRecord, QsValue, UrlEncodedCodec};
use rstest::*;

fn record_strategy(min_list_len: usize) -> impl Strategy<Value = QsRecord> {
	let value = prop_oneof![
		"\\PC{0,12}".prop_map(QsValue::Single),
		prop::collection::vec("\\PC{0,8}", min_list_len..5).prop_map(QsValue::Multi),
	];
	prop::collection::btree_map("[a-z_]{1,8}", value, 0..6)
		.prop_map(|entries| entries.into_iter().collect::<QsRecord>())
}

// ============================================================================
// Property-Based Tests: codecs
// ============================================================================

proptest! {
	/// Test: url-encoded parse inverts stringify
	///
	/// Category: Property
	/// Lists of one element read back as a single value, so lists start at two.
	#[rstest]
	fn prop_urlencoded_roundtrip(record in record_strategy(2)) {
		let query = UrlEncodedCodec.stringify(&record).unwrap();
		let parsed = UrlEncodedCodec.parse(&query).unwrap();

		prop_assert_eq!(parsed, record);
	}

	/// Test: bracket parse inverts stringify
	///
	/// Category: Property
	/// One-element lists keep their shape thanks to the `[]` suffix.
	#[rstest]
	fn prop_bracket_roundtrip(record in record_strategy(1)) {
		let query = BracketCodec.stringify(&record).unwrap();
		let parsed = BracketCodec.parse(&query).unwrap();

		prop_assert_eq!(parsed, record);
	}

	/// Test: a leading question mark is optional
	///
	/// Category: Property
	#[rstest]
	fn prop_question_mark_is_ignored(record in record_strategy(2)) {
		let query = UrlEncodedCodec.stringify(&record).unwrap();

		prop_assert_eq!(
			UrlEncodedCodec.parse(&format!("?{query}")).unwrap(),
			UrlEncodedCodec.parse(&query).unwrap()
		);
	}

	/// Test: stringify never emits a question mark
	///
	/// Category: Property
	#[rstest]
	fn prop_stringify_has_no_prefix(record in record_strategy(0)) {
		let query = UrlEncodedCodec.stringify(&record).unwrap();

		prop_assert!(!query.starts_with('?'));
	}
}

// ============================================================================
// Property-Based Tests: numbers
// ============================================================================

proptest! {
	/// Test: formatted integers parse back
	///
	/// Category: Property
	#[rstest]
	fn prop_int_roundtrip(n in -1_000_000_000i64..1_000_000_000i64) {
		prop_assert_eq!(parse_int(&format_number(n as f64)), n as f64);
	}

	/// Test: formatted finite floats parse back exactly
	///
	/// Category: Property
	#[rstest]
	fn prop_float_roundtrip(x in prop::num::f64::NORMAL | prop::num::f64::ZERO) {
		let parsed = parse_float(&format_number(x));

		prop_assert!(parsed == x, "{} -> {} -> {}", x, format_number(x), parsed);
	}

	/// Test: trailing garbage does not change the parsed integer
	///
	/// Category: Property
	#[rstest]
	fn prop_int_ignores_suffix(n in 0u32..100_000, suffix in "[a-z.]{0,5}") {
		prop_assert_eq!(parse_int(&format!("{n}{suffix}")), n as f64);
	}
}
