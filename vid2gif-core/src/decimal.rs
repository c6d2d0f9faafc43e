//! Fixed-scale decimal arithmetic.
//!
//! All derived numeric values (fps, delay, framerate ratios) are computed with
//! [`Decimal`], a fixed-point number with three fractional digits. Every
//! operation is evaluated at an explicit result scale and truncates toward
//! zero, so the same inputs always produce the same text byte-for-byte.
//!
//! Formatting goes through [`canonicalize`], a pure function that turns any
//! decimal text into its minimal form (`.5` -> `0.5`, `2.000` -> `2`).

use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// Number of fractional digits carried by every [`Decimal`].
pub const MAX_SCALE: u32 = 3;

const UNIT: i128 = 10_i128.pow(MAX_SCALE);

/// Longest integer part accepted when parsing.
const MAX_INTEGER_DIGITS: usize = 24;

/// Fixed-point decimal with three fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal {
    milli: i128,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal { milli: 0 };

    /// Creates a decimal from an integer.
    #[must_use]
    pub const fn from_int(value: i64) -> Self {
        Self {
            milli: value as i128 * UNIT,
        }
    }

    /// Returns true when the value is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.milli > 0
    }

    /// Multiplies two values and truncates the result to `scale` digits.
    #[must_use]
    pub fn mul(self, rhs: Decimal, scale: u32) -> Decimal {
        let scale = scale.min(MAX_SCALE);
        // Product is in units of 10^-6.
        let product = self.milli * rhs.milli;
        let at_scale = product / 10_i128.pow(2 * MAX_SCALE - scale);
        Decimal {
            milli: at_scale * 10_i128.pow(MAX_SCALE - scale),
        }
    }

    /// Divides `self` by `rhs`, truncating the result to `scale` digits.
    ///
    /// `what` names the derived quantity and is used in the error when `rhs`
    /// is zero.
    pub fn div(self, rhs: Decimal, scale: u32, what: &str) -> CoreResult<Decimal> {
        if rhs.milli == 0 {
            return Err(CoreError::DivisionByZero(what.to_string()));
        }
        let scale = scale.min(MAX_SCALE);
        let at_scale = self.milli * 10_i128.pow(scale) / rhs.milli;
        Ok(Decimal {
            milli: at_scale * 10_i128.pow(MAX_SCALE - scale),
        })
    }

    /// Returns the integer part as a `u32`, if it fits.
    #[must_use]
    pub fn to_u32(self) -> Option<u32> {
        u32::try_from(self.milli / UNIT).ok()
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Decimal::from_int(i64::from(value))
    }
}

impl FromStr for Decimal {
    type Err = CoreError;

    /// Parses plain decimal notation (`12`, `-0.5`, `.25`, `29.97`).
    ///
    /// Fractional digits beyond the third are truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidNumber(s.to_string());
        let text = s.trim();

        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let int_digits = int_part.trim_start_matches('0');
        if int_digits.len() > MAX_INTEGER_DIGITS {
            return Err(invalid());
        }

        let int_value: i128 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid())?
        };

        let mut frac_value: i128 = 0;
        for (i, digit) in frac_part.bytes().take(MAX_SCALE as usize).enumerate() {
            frac_value += i128::from(digit - b'0') * 10_i128.pow(MAX_SCALE - 1 - i as u32);
        }

        let milli = int_value * UNIT + frac_value;
        Ok(Decimal {
            milli: if negative { -milli } else { milli },
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.milli < 0 { "-" } else { "" };
        let abs = self.milli.unsigned_abs();
        let unit = UNIT as u128;
        let raw = format!(
            "{sign}{}.{:0width$}",
            abs / unit,
            abs % unit,
            width = MAX_SCALE as usize
        );
        f.write_str(&canonicalize(&raw))
    }
}

/// Rewrites decimal text into its minimal canonical form.
///
/// Integers are returned unchanged. For text with a decimal point, trailing
/// zeros and a trailing dot are stripped and a bare leading dot gains a `0`
/// (`.5` -> `0.5`, `-.25` -> `-0.25`, `1.500` -> `1.5`, `2.000` -> `2`).
#[must_use]
pub fn canonicalize(text: &str) -> String {
    if !text.contains('.') {
        return text.to_string();
    }

    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let trimmed = body.trim_end_matches('0');
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);

    let body = if trimmed.is_empty() {
        "0".to_string()
    } else if trimmed.starts_with('.') {
        format!("0{trimmed}")
    } else {
        trimmed.to_string()
    };

    if negative && body != "0" {
        format!("-{body}")
    } else {
        body
    }
}
