//! Parameterized presets.

use crate::error::ParamError;
use crate::number::{format_number, parse_int};
use crate::param::ScalarParam;
use crate::value::Value;

use super::{expect_list, unexpected};

/// JSON data; unparseable input reads as `default`, and `default` is kept out of the URL.
pub fn json(default: serde_json::Value) -> ScalarParam {
	let fallback = default.clone();
	ScalarParam::new()
		.with_decode(move |raw| {
			let parsed = raw
				.and_then(|text| serde_json::from_str::<serde_json::Value>(text).ok())
				.unwrap_or_else(|| fallback.clone());
			Ok(Some(Value::Json(parsed)))
		})
		.with_encode(|value| match value {
			None => Ok(None),
			Some(Value::Json(data)) => serde_json::to_string(data)
				.map(Some)
				.map_err(|e| ParamError::encode(e.to_string())),
			Some(other) => Err(unexpected("json", other)),
		})
		.with_default(default)
}

/// An integer clamped to `min..=max` on both decode and encode; invalid input is absent.
pub fn bounded_int(min: i64, max: i64) -> ScalarParam {
	let (low, high) = (min as f64, max as f64);
	ScalarParam::new()
		.with_decode(move |raw| {
			let parsed = raw.map_or(f64::NAN, parse_int);
			Ok((!parsed.is_nan()).then(|| Value::Number(parsed.clamp(low, high))))
		})
		.with_encode(move |value| match value {
			None => Ok(None),
			Some(Value::Number(n)) if n.is_nan() => Ok(None),
			Some(Value::Number(n)) => Ok(Some(format_number(n.clamp(low, high)))),
			Some(other) => Err(unexpected("number", other)),
		})
}

/// A list packed into one comma-separated value (`?tags=a%2Cb`), defaulting to `[]`.
pub fn comma_separated() -> ScalarParam {
	ScalarParam::new()
		.with_decode(|raw| {
			Ok(Some(Value::List(
				raw.unwrap_or_default()
					.split(',')
					.filter(|part| !part.is_empty())
					.map(Value::from)
					.collect(),
			)))
		})
		.with_encode(|value| {
			let Some(value) = value else {
				return Ok(None);
			};
			let items = expect_list(value)?;
			if items.is_empty() {
				return Ok(None);
			}
			Ok(Some(
				items
					.iter()
					.map(|item| item.to_query_string().unwrap_or_default())
					.collect::<Vec<_>>()
					.join(","),
			))
		})
		.with_default(Vec::<String>::new())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("50", Some(50.0))]
	#[case("0", Some(1.0))]
	#[case("200", Some(100.0))]
	#[case("1", Some(1.0))]
	#[case("100", Some(100.0))]
	#[case("abc", None)]
	fn test_bounded_int_decode(#[case] raw: &str, #[case] expected: Option<f64>) {
		assert_eq!(
			bounded_int(1, 100).decode(Some(raw)).unwrap(),
			expected.map(Value::Number)
		);
	}

	#[rstest]
	#[case(50.0, "50")]
	#[case(0.0, "1")]
	#[case(200.0, "100")]
	fn test_bounded_int_encode(#[case] value: f64, #[case] expected: &str) {
		assert_eq!(
			bounded_int(1, 100)
				.encode(Some(&Value::Number(value)))
				.unwrap()
				.as_deref(),
			Some(expected)
		);
	}

	#[test]
	fn test_comma_separated() {
		let param = comma_separated();

		assert_eq!(
			param.decode(Some("a,b,c")).unwrap(),
			Some(Value::from(vec!["a", "b", "c"]))
		);
		assert_eq!(param.decode(Some("")).unwrap(), Some(Value::List(vec![])));
		assert_eq!(
			param.encode(Some(&Value::from(vec!["a", "b"]))).unwrap().as_deref(),
			Some("a,b")
		);
		assert_eq!(param.encode(Some(&Value::List(vec![]))).unwrap(), None);
	}

	#[test]
	fn test_json_parses_or_falls_back() {
		let param = json(json!({"status": "active"}));

		assert_eq!(
			param.decode(Some(r#"{"status":"pending"}"#)).unwrap(),
			Some(Value::Json(json!({"status": "pending"})))
		);
		assert_eq!(
			param.decode(Some("not-json")).unwrap(),
			Some(Value::Json(json!({"status": "active"})))
		);
		assert_eq!(
			param
				.encode(Some(&Value::Json(json!({"status": "pending"}))))
				.unwrap()
				.as_deref(),
			Some(r#"{"status":"pending"}"#)
		);
	}
}
