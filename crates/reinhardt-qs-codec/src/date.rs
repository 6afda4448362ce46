//! Millisecond-precision UTC timestamps with an explicit invalid state.
//!
//! A date preset must be able to hold "whatever `?d=garbage` decoded to" without
//! losing the key, so [`Date`] carries an invalid variant instead of failing. Two
//! invalid dates compare equal, which lets an invalid date serve as a default.

use core::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, or the invalid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Date(Option<DateTime<Utc>>);

impl Date {
	/// The invalid date.
	pub const fn invalid() -> Self {
		Self(None)
	}

	/// Parses an ISO-8601 / RFC 3339 date or date-time.
	///
	/// Accepted shapes, from strictest to most lenient:
	///
	/// - `2024-01-02T03:04:05.000Z`, `2024-01-02T03:04:05+09:00`
	/// - `2024-01-02T03:04:05`, `2024-01-02T03:04` (read as UTC)
	/// - `2024-01-02`, `2024-01`, `2024` (midnight UTC)
	/// - RFC 2822 (`Tue, 2 Jan 2024 03:04:05 +0000`)
	///
	/// Anything else yields [`Date::invalid`].
	pub fn parse(input: &str) -> Self {
		let input = input.trim();

		if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
			return Self::from(parsed.with_timezone(&Utc));
		}
		for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
			if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
				return Self::from(naive.and_utc());
			}
		}
		if let Some(naive) = parse_calendar_prefix(input) {
			return Self::from(naive.and_utc());
		}
		if let Ok(parsed) = DateTime::parse_from_rfc2822(input) {
			return Self::from(parsed.with_timezone(&Utc));
		}

		Self::invalid()
	}

	/// Builds a date from milliseconds since the Unix epoch.
	pub fn from_timestamp_millis(millis: i64) -> Self {
		Self(DateTime::from_timestamp_millis(millis))
	}

	/// Whether this is a real point in time.
	pub fn is_valid(&self) -> bool {
		self.0.is_some()
	}

	/// The underlying timestamp, `None` when invalid.
	pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
		self.0.as_ref()
	}

	/// Milliseconds since the Unix epoch, `None` when invalid.
	pub fn timestamp_millis(&self) -> Option<i64> {
		self.0.map(|dt| dt.timestamp_millis())
	}

	/// `YYYY-MM-DDTHH:MM:SS.sssZ`, `None` when invalid.
	pub fn to_iso_string(&self) -> Option<String> {
		self.0
			.map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
	}
}

fn parse_calendar_prefix(input: &str) -> Option<NaiveDateTime> {
	if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
		return date.and_hms_opt(0, 0, 0);
	}

	let mut parts = input.split('-');
	let year = parts.next().filter(|part| is_digits(part, 4))?;
	let month = match parts.next() {
		Some(part) if is_digits(part, 2) => part.parse().ok()?,
		Some(_) => return None,
		None => 1,
	};
	if parts.next().is_some() {
		return None;
	}

	NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)?.and_hms_opt(0, 0, 0)
}

fn is_digits(part: &str, len: usize) -> bool {
	part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

impl From<DateTime<Utc>> for Date {
	fn from(value: DateTime<Utc>) -> Self {
		Self(Some(value.trunc_subsecs(3)))
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.to_iso_string() {
			Some(iso) => f.write_str(&iso),
			None => f.write_str("Invalid Date"),
		}
	}
}
