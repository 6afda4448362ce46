//! Date presets, written as `YYYY-MM-DDTHH:MM:SS.sssZ`.

use super::{expect_list, unexpected};
use crate::date::Date;
use crate::error::ParamResult;
use crate::param::{ArrayParam, ScalarParam};
use crate::value::Value;

/// A date that reads as the invalid date when missing or unparseable.
pub fn date() -> ScalarParam {
	ScalarParam::new()
		.with_decode(|raw| Ok(Some(Value::Date(raw.map_or(Date::invalid(), Date::parse)))))
		.with_encode(encode_date)
		.with_default(Date::invalid())
}

/// A date that is absent when missing or unparseable.
pub fn date_optional() -> ScalarParam {
	ScalarParam::new()
		.with_decode(|raw| {
			Ok(raw
				.map(Date::parse)
				.filter(Date::is_valid)
				.map(Value::Date))
		})
		.with_encode(encode_date)
}

/// Every parseable date occurrence of the key.
pub fn date_array() -> ArrayParam {
	ArrayParam::new()
		.with_decode(|raw| {
			Ok(Some(Value::List(
				raw.iter()
					.map(|item| Date::parse(item))
					.filter(Date::is_valid)
					.map(Value::Date)
					.collect(),
			)))
		})
		.with_encode(|value| {
			let Some(value) = value else {
				return Ok(Vec::new());
			};
			let mut encoded = Vec::new();
			for item in expect_list(value)? {
				if let Some(text) = encode_date(Some(item))? {
					encoded.push(text);
				}
			}
			Ok(encoded)
		})
}

fn encode_date(value: Option<&Value>) -> ParamResult<Option<String>> {
	match value {
		None => Ok(None),
		Some(Value::Date(date)) => Ok(date.to_iso_string()),
		Some(other) => Err(unexpected("date", other)),
	}
}
