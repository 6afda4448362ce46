//! Integer and float presets.
//!
//! Integers and floats share one representation (`Value::Number`); the integer
//! presets differ only in parsing the leading integer (`"3.7"` reads as `3`).
//! `NaN` stands for "no valid number" and is never written to a URL.

use super::{expect_list, unexpected};
use crate::error::ParamResult;
use crate::number::{format_number, parse_float, parse_int};
use crate::param::{ArrayParam, ScalarParam};
use crate::value::Value;

type Parser = fn(&str) -> f64;

/// An integer that reads as `NaN` when missing or invalid.
pub fn int() -> ScalarParam {
	required(parse_int)
}

/// An integer that is absent when missing or invalid.
pub fn int_optional() -> ScalarParam {
	optional(parse_int)
}

/// Every valid integer occurrence of the key.
pub fn int_array() -> ArrayParam {
	array(parse_int)
}

/// A float that reads as `NaN` when missing or invalid.
pub fn float() -> ScalarParam {
	required(parse_float)
}

/// A float that is absent when missing or invalid.
pub fn float_optional() -> ScalarParam {
	optional(parse_float)
}

/// Every valid float occurrence of the key.
pub fn float_array() -> ArrayParam {
	array(parse_float)
}

fn required(parse: Parser) -> ScalarParam {
	ScalarParam::new()
		.with_decode(move |raw| Ok(Some(Value::Number(raw.map_or(f64::NAN, parse)))))
		.with_encode(encode_number)
		.with_default(f64::NAN)
}

fn optional(parse: Parser) -> ScalarParam {
	ScalarParam::new()
		.with_decode(move |raw| {
			Ok(raw
				.map(parse)
				.filter(|n| !n.is_nan())
				.map(Value::Number))
		})
		.with_encode(encode_number)
}

fn array(parse: Parser) -> ArrayParam {
	ArrayParam::new()
		.with_decode(move |raw| {
			Ok(Some(Value::List(
				raw.iter()
					.map(|item| parse(item))
					.filter(|n| !n.is_nan())
					.map(Value::Number)
					.collect(),
			)))
		})
		.with_encode(|value| {
			let Some(value) = value else {
				return Ok(Vec::new());
			};
			let mut encoded = Vec::new();
			for item in expect_list(value)? {
				if let Some(text) = encode_number(Some(item))? {
					encoded.push(text);
				}
			}
			Ok(encoded)
		})
}

fn encode_number(value: Option<&Value>) -> ParamResult<Option<String>> {
	match value {
		None => Ok(None),
		Some(Value::Number(n)) if n.is_nan() => Ok(None),
		Some(Value::Number(n)) => Ok(Some(format_number(*n))),
		Some(other) => Err(unexpected("number", other)),
	}
}
