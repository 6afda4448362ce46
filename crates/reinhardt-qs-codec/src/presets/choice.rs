//! Presets restricted to a fixed set of string options.

use std::rc::Rc;

use super::expect_list;
use crate::param::{ArrayParam, ScalarParam};
use crate::value::Value;

fn options_of<S: AsRef<str>>(options: &[S]) -> Rc<[String]> {
	options.iter().map(|option| option.as_ref().to_string()).collect()
}

/// One of `options`; missing or unknown input reads as the first option.
///
/// # Panics
///
/// Panics if `options` is empty.
pub fn enumeration<S: AsRef<str>>(options: &[S]) -> ScalarParam {
	assert!(!options.is_empty(), "enumeration preset needs at least one option");
	let options = options_of(options);
	let first = options[0].clone();

	let allowed = options.clone();
	let fallback = first.clone();
	ScalarParam::new()
		.with_decode(move |raw| {
			let chosen = raw
				.filter(|candidate| allowed.iter().any(|option| option == candidate))
				.unwrap_or(fallback.as_str());
			Ok(Some(Value::from(chosen)))
		})
		.with_default(first)
}

/// One of `options`, or absent.
pub fn enumeration_optional<S: AsRef<str>>(options: &[S]) -> ScalarParam {
	let options = options_of(options);
	ScalarParam::new().with_decode(move |raw| {
		Ok(raw
			.filter(|candidate| options.iter().any(|option| option == candidate))
			.map(Value::from))
	})
}

/// Every occurrence of the key that is one of `options`.
pub fn enumeration_array<S: AsRef<str>>(options: &[S]) -> ArrayParam {
	let options = options_of(options);
	ArrayParam::new()
		.with_decode(move |raw| {
			Ok(Some(Value::List(
				raw.iter()
					.filter(|candidate| options.contains(candidate))
					.map(|candidate| Value::from(candidate.as_str()))
					.collect(),
			)))
		})
		.with_encode(|value| {
			let Some(value) = value else {
				return Ok(Vec::new());
			};
			Ok(expect_list(value)?
				.iter()
				.filter_map(Value::as_str)
				.map(str::to_string)
				.collect())
		})
}
