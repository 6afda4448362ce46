//! Lenient number parsing and canonical number formatting.
//!
//! Query strings are typed by hand, so numeric presets accept the longest numeric
//! prefix of their input (`"3.7"` is the integer `3`, `"12px"` is `12`) and produce
//! `NaN` when there is none. Formatting is the inverse: integral values print without
//! a fraction and `NaN` never reaches a URL because the presets drop it first.

/// Parses the leading base-10 integer of `input`.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. Returns `NaN` when no digit was found.
pub fn parse_int(input: &str) -> f64 {
	let trimmed = input.trim_start();
	let (negative, rest) = split_sign(trimmed);

	let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
	if digits_len == 0 {
		return f64::NAN;
	}

	let magnitude = rest[..digits_len].parse::<f64>().unwrap_or(f64::NAN);
	if negative { -magnitude } else { magnitude }
}

/// Parses the leading decimal literal of `input`.
///
/// Accepts an optional sign, `Infinity`, digits with an optional fraction and an
/// optional exponent. Returns `NaN` when no literal starts the input.
pub fn parse_float(input: &str) -> f64 {
	let trimmed = input.trim_start();
	let (negative, rest) = split_sign(trimmed);

	if rest.starts_with("Infinity") {
		return if negative {
			f64::NEG_INFINITY
		} else {
			f64::INFINITY
		};
	}

	let bytes = rest.as_bytes();
	let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

	let int_digits = count_digits(0);
	let mut end = int_digits;
	let mut mantissa_digits = int_digits;

	if bytes.get(end) == Some(&b'.') {
		let frac_digits = count_digits(end + 1);
		if int_digits > 0 || frac_digits > 0 {
			end += 1 + frac_digits;
			mantissa_digits += frac_digits;
		}
	}
	if mantissa_digits == 0 {
		return f64::NAN;
	}

	if matches!(bytes.get(end), Some(b'e' | b'E')) {
		let mut exp_end = end + 1;
		if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
			exp_end += 1;
		}
		let exp_digits = count_digits(exp_end);
		if exp_digits > 0 {
			end = exp_end + exp_digits;
		}
	}

	let magnitude = rest[..end].parse::<f64>().unwrap_or(f64::NAN);
	if negative { -magnitude } else { magnitude }
}

/// Formats `value` the way it is written into a query string.
///
/// `1.0` is `"1"`, `0.5` is `"0.5"`, very large or small magnitudes use exponent
/// notation (`"1e+21"`, `"1e-7"`), and the non-finite values are `"NaN"`,
/// `"Infinity"` and `"-Infinity"`.
pub fn format_number(value: f64) -> String {
	if value.is_nan() {
		return "NaN".to_string();
	}
	if value.is_infinite() {
		return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
	}
	if value == 0.0 {
		return "0".to_string();
	}

	let magnitude = value.abs();
	if (1e-6..1e21).contains(&magnitude) {
		return format!("{value}");
	}

	let formatted = format!("{value:e}");
	match formatted.split_once('e') {
		Some((mantissa, exponent)) if !exponent.starts_with('-') => {
			format!("{mantissa}e+{exponent}")
		}
		_ => formatted,
	}
}

fn split_sign(input: &str) -> (bool, &str) {
	if let Some(rest) = input.strip_prefix('-') {
		(true, rest)
	} else if let Some(rest) = input.strip_prefix('+') {
		(false, rest)
	} else {
		(false, input)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("42", 42.0)]
	#[case("3.7", 3.0)]
	#[case("  -12abc", -12.0)]
	#[case("+8", 8.0)]
	#[case("007", 7.0)]
	fn test_parse_int(#[case] input: &str, #[case] expected: f64) {
		assert_eq!(parse_int(input), expected);
	}

	#[rstest]
	#[case("")]
	#[case("abc")]
	#[case("-")]
	#[case(".5")]
	fn test_parse_int_nan(#[case] input: &str) {
		assert!(parse_int(input).is_nan());
	}

	#[rstest]
	#[case("2.75", 2.75)]
	#[case("1e3", 1000.0)]
	#[case("2.5E-1xyz", 0.25)]
	#[case(".5", 0.5)]
	#[case("5.", 5.0)]
	#[case("-0.75", -0.75)]
	#[case("7e", 7.0)]
	#[case("1.5e+2", 150.0)]
	fn test_parse_float(#[case] input: &str, #[case] expected: f64) {
		assert_eq!(parse_float(input), expected);
	}

	#[rstest]
	#[case("")]
	#[case(".")]
	#[case("NaN")]
	#[case("e5")]
	fn test_parse_float_nan(#[case] input: &str) {
		assert!(parse_float(input).is_nan());
	}

	#[test]
	fn test_parse_float_infinity() {
		assert_eq!(parse_float("Infinity"), f64::INFINITY);
		assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
	}

	#[rstest]
	#[case(5.0, "5")]
	#[case(-3.0, "-3")]
	#[case(0.5, "0.5")]
	#[case(-0.0, "0")]
	#[case(1e21, "1e+21")]
	#[case(1e-7, "1e-7")]
	#[case(123456.789, "123456.789")]
	#[case(f64::NAN, "NaN")]
	#[case(f64::NEG_INFINITY, "-Infinity")]
	fn test_format_number(#[case] value: f64, #[case] expected: &str) {
		assert_eq!(format_number(value), expected);
	}
}
