//! # Number Normalization
//!
//! en-US number formatting for threshold messages and display, plus the
//! digit filter used by numeric text inputs.
//!
//! `normalize_number` matches the output of an en-US `Intl.NumberFormat`
//! configured with the same fraction-digit bounds: comma grouping, rounding
//! half away from zero on the shortest decimal form of the value (`1.005`
//! rounds to `1.01` although its binary value is just below), trailing
//! fractional zeros
//! dropped down to the minimum, and a `$` sign after the minus sign for
//! currency (`-$1,234.5`).

use serde::{Deserialize, Serialize};

/// Upper bound on fraction digits, as in `Intl.NumberFormat`.
pub const MAX_FRACTION_DIGITS: usize = 20;

/// Formatting options for [`normalize_number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Prefix the amount with `$`.
    pub is_currency: bool,
    /// Fraction digits always printed, padding with zeros.
    pub minimum_fraction_digits: usize,
    /// Fraction digits kept after rounding.
    pub maximum_fraction_digits: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            is_currency: false,
            minimum_fraction_digits: 0,
            maximum_fraction_digits: 2,
        }
    }
}

impl NumberFormat {
    /// Default digit bounds, optionally as currency.
    pub fn new(is_currency: bool) -> Self {
        Self {
            is_currency,
            ..Self::default()
        }
    }
}

/// Format `value` as an en-US number.
///
/// Digit bounds are clamped to [`MAX_FRACTION_DIGITS`], and a maximum below
/// the minimum is raised to the minimum.
pub fn normalize_number(value: f64, format: NumberFormat) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let symbol = if format.is_currency { "$" } else { "" };

    if value.is_infinite() {
        return format!("{sign}{symbol}∞");
    }

    let min = format.minimum_fraction_digits.min(MAX_FRACTION_DIGITS);
    let max = format
        .maximum_fraction_digits
        .min(MAX_FRACTION_DIGITS)
        .max(min);

    let (integer, fraction) = round_to_digits(value.abs(), min, max);
    format!("{sign}{symbol}{}{}", group_thousands(&integer), fraction)
}

/// Round `abs` to `max` fraction digits and split into integer digits and a
/// fraction suffix (including the leading `.`, or empty).
fn round_to_digits(abs: f64, min: usize, max: usize) -> (String, String) {
    // Shortest round-trip form, `d.ddde±x`.
    let scientific = format!("{abs:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let significant: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let point = exponent.parse::<i64>().unwrap_or(0) + 1;

    // Digits of `abs * 10^max`, truncated.
    let keep = point + max as i64;
    let mut scaled: Vec<u8> = (0..keep.max(0))
        .map(|i| significant.get(i as usize).copied().unwrap_or(b'0'))
        .collect();
    let round_up = keep >= 0 && significant.get(keep as usize).is_some_and(|d| *d >= b'5');
    if round_up {
        increment_digits(&mut scaled);
    }

    let scaled: String = scaled.into_iter().map(char::from).collect();
    let digits = format!("{scaled:0>width$}", width = max + 1);
    let (integer, frac) = digits.split_at(digits.len() - max);

    let mut frac = frac.to_string();
    while frac.len() > min && frac.ends_with('0') {
        frac.pop();
    }

    let fraction = if frac.is_empty() {
        String::new()
    } else {
        format!(".{frac}")
    };
    (integer.to_string(), fraction)
}

/// Add one to an ASCII decimal digit string, growing it on carry out.
fn increment_digits(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Keep only ASCII digits and `.` (e.g. `"$1,234.50"` → `"1234.50"`).
pub fn parse_integer_numbers(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}
