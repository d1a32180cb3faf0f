//! Decimal values read from form input
//!
//! Bill forms are edited while partially filled, so every numeric field is
//! coerced through [`parse_lenient`]: anything that does not read as a number
//! becomes zero instead of an error. This is the only place that rule lives.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parses a raw form value into a decimal, defaulting to zero.
///
/// Whitespace around the value is ignored and the longest leading numeric
/// prefix is read, so `"12.5 sqft"` yields `12.5`. Text with no leading
/// digits, or a value outside the range of [`Decimal`], yields exactly zero.
///
/// # Examples
///
/// ```
/// use core_kernel::parse_lenient;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_lenient("3021"), dec!(3021));
/// assert_eq!(parse_lenient(" 12.50 "), dec!(12.50));
/// assert_eq!(parse_lenient("abc"), dec!(0));
/// assert_eq!(parse_lenient(""), dec!(0));
/// ```
pub fn parse_lenient(raw: &str) -> Decimal {
    NumericPrefix::scan(raw.trim())
        .and_then(|number| number.read())
        .unwrap_or(Decimal::ZERO)
}

/// Returns true when `raw` is blank or reads completely as a number.
///
/// Strict callers use this to find values that [`parse_lenient`] would
/// silently zero or truncate. A number that overflows [`Decimal`], or whose
/// digits all fall past its 28th decimal place, is not well formed.
pub fn is_well_formed(raw: &str) -> bool {
    let text = raw.trim();
    if text.is_empty() {
        return true;
    }
    match NumericPrefix::scan(text) {
        Some(number) => number.consumed == text.len() && number.read().is_some(),
        None => false,
    }
}

/// Most fractional digits a `Decimal` can hold
const MAX_SCALE: i64 = 28;

/// Most significant digits a `Decimal` mantissa can hold
const MAX_DIGITS: usize = 29;

/// The numeric part found at the start of a piece of text
#[derive(Debug)]
struct NumericPrefix<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: Option<i64>,
    consumed: usize,
}

impl<'a> NumericPrefix<'a> {
    fn scan(text: &'a str) -> Option<Self> {
        let bytes = text.as_bytes();
        let mut pos = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                pos = 1;
                true
            }
            Some(b'+') => {
                pos = 1;
                false
            }
            _ => false,
        };

        let integer_start = pos;
        pos = skip_digits(bytes, pos);
        let integer = &text[integer_start..pos];

        let mut fraction = "";
        if bytes.get(pos) == Some(&b'.') {
            let fraction_end = skip_digits(bytes, pos + 1);
            fraction = &text[pos + 1..fraction_end];
            if !fraction.is_empty() || !integer.is_empty() {
                pos = fraction_end;
            }
        }

        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        let mut exponent = None;
        if matches!(bytes.get(pos), Some(b'e' | b'E')) {
            let mut exp_pos = pos + 1;
            let exp_negative = match bytes.get(exp_pos) {
                Some(b'-') => {
                    exp_pos += 1;
                    true
                }
                Some(b'+') => {
                    exp_pos += 1;
                    false
                }
                _ => false,
            };
            let digits_end = skip_digits(bytes, exp_pos);
            if digits_end > exp_pos {
                // An exponent too large to represent cannot produce a Decimal
                let magnitude = text[exp_pos..digits_end].parse::<i64>().unwrap_or(i64::MAX);
                exponent = Some(if exp_negative { -magnitude } else { magnitude });
                pos = digits_end;
            }
        }

        Some(Self {
            negative,
            integer,
            fraction,
            exponent,
            consumed: pos,
        })
    }

    /// The value of the prefix, or `None` when it does not fit a `Decimal`
    ///
    /// The exponent moves the decimal point in the digit string before any
    /// parsing, so a long mantissa with a negative exponent still reads.
    /// Digits beyond the 28th decimal place are rounded half away from zero.
    fn read(&self) -> Option<Decimal> {
        let digits = format!("{}{}", self.integer, self.fraction);
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Some(Decimal::ZERO);
        }

        let exponent = self.exponent.unwrap_or(0);
        let mut scale = (self.fraction.len() as i64).saturating_sub(exponent);

        let mut digits = digits.to_string();
        if scale < 0 {
            let zeros = usize::try_from(scale.unsigned_abs()).ok()?;
            if digits.len().saturating_add(zeros) > MAX_DIGITS {
                return None;
            }
            digits.push_str(&"0".repeat(zeros));
            scale = 0;
        }

        // Every significant digit below the smallest representable step
        let excess = (scale - MAX_SCALE).max(0);
        if excess >= digits.len() as i64 {
            return None;
        }
        let mut keep = digits.len() - excess as usize;
        scale -= excess;
        while keep > MAX_DIGITS && scale > 0 {
            keep -= 1;
            scale -= 1;
        }

        loop {
            let round_up = digits.as_bytes().get(keep).is_some_and(|d| *d >= b'5');
            let magnitude = digits[..keep].parse::<i128>().ok()? + i128::from(round_up);
            let mantissa = if self.negative { -magnitude } else { magnitude };

            match Decimal::try_from_i128_with_scale(mantissa, scale as u32) {
                Ok(value) => return Some(value),
                Err(_) if scale > 0 && keep > 1 => {
                    keep -= 1;
                    scale -= 1;
                }
                Err(_) => return None,
            }
        }
    }
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

/// A percentage such as a bill percent or housekeeping percent
///
/// Stored in percent units (`10` means 10%). Values are never clamped:
/// 150% and negative percentages apply exactly as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage {
    value: Decimal,
}

impl Percentage {
    /// Creates a percentage from percent units (e.g. 5 for 5%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Reads a percentage from raw form input
    pub fn parse_lenient(raw: &str) -> Self {
        Self::new(parse_lenient(raw))
    }

    /// Returns the value in percent units
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the percentage as a fraction (10% -> 0.10)
    pub fn as_fraction(&self) -> Decimal {
        self.value / dec!(100)
    }

    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    /// Applies this percentage to an amount
    pub fn apply(&self, amount: Decimal) -> Decimal {
        amount.saturating_mul(self.as_fraction())
    }
}

impl From<Decimal> for Percentage {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.value.normalize())
    }
}
