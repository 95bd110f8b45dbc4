//! Decimal arithmetic for rounding and power-of-ten scaling
//!
//! Floats are rounded and scaled on their shortest decimal representation
//! (the digits `Display` prints for an `f64`) held in a
//! [`rust_decimal::Decimal`], not on the binary float. `1.005` therefore
//! rounds to `1.01`, and `0.1` scaled by two places is exactly `10`.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

// ============================================================================
// ROUND MODE
// ============================================================================

/// How surplus decimal places are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundMode {
    /// 0.5 rounds away from zero.
    #[default]
    HalfAwayFromZero,
    /// 0.5 rounds to the even neighbour (banker's rounding).
    HalfEven,
    /// Drops surplus digits.
    Truncate,
    /// Towards positive infinity.
    Ceiling,
    /// Towards negative infinity.
    Floor,
    /// Any surplus moves to the next unit away from zero.
    AwayFromZero,
}

impl RoundMode {
    /// The matching `rust_decimal` strategy.
    #[must_use]
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
            Self::Truncate => RoundingStrategy::ToZero,
            Self::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Self::Floor => RoundingStrategy::ToNegativeInfinity,
            Self::AwayFromZero => RoundingStrategy::AwayFromZero,
        }
    }
}

// ============================================================================
// DECIMAL OPERATIONS
// ============================================================================

/// Shortest decimal form of a finite float.
///
/// `None` for NaN, infinities and magnitudes beyond [`Decimal::MAX`].
pub(crate) fn from_float(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str_exact(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .map(|d| d.normalize())
}

/// Reads the unsigned number `int_part.frac_part`. Either part may be empty,
/// not both. `None` when a part holds a non-digit or the value does not fit.
pub(crate) fn parse_digits(int_part: &str, frac_part: &str) -> Option<Decimal> {
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        digits => digits,
    };
    let text = match frac_part.trim_end_matches('0') {
        "" => int_part.to_string(),
        digits => format!("{int_part}.{digits}"),
    };
    Decimal::from_str_exact(&text).ok().map(|d| d.normalize())
}

/// Nearest float; zero of either sign becomes `0.0`.
pub(crate) fn to_float(decimal: &Decimal) -> f64 {
    if decimal.is_zero() {
        return 0.0;
    }
    decimal.normalize().to_string().parse().unwrap_or(f64::NAN)
}

/// Strictly below zero.
pub(crate) fn is_negative(decimal: &Decimal) -> bool {
    decimal.is_sign_negative() && !decimal.is_zero()
}

/// Significant digits after the decimal point.
pub(crate) fn places(decimal: &Decimal) -> u32 {
    decimal.normalize().scale()
}

/// Removes digits beyond `places` using `mode`.
pub(crate) fn rounded(decimal: Decimal, places: u32, mode: RoundMode) -> Decimal {
    decimal
        .round_dp_with_strategy(places, mode.strategy())
        .normalize()
}

/// Multiplies by `10^places` (divides when negative). `None` on overflow.
pub(crate) fn shifted(decimal: Decimal, places: i32) -> Option<Decimal> {
    let mut result = decimal;
    for _ in 0..places.unsigned_abs() {
        result = if places > 0 {
            result.checked_mul(Decimal::TEN)?
        } else {
            result.checked_div(Decimal::TEN)?
        };
    }
    Some(result.normalize())
}

/// Integer digits and fraction digits of the magnitude, the fraction padded
/// to at least `min_places`.
pub(crate) fn parts(decimal: &Decimal, min_places: u32) -> (String, String) {
    let text = decimal.abs().normalize().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut frac_part = frac_part.to_string();
    while frac_part.len() < min_places as usize {
        frac_part.push('0');
    }
    (int_part.to_string(), frac_part)
}

// ============================================================================
// PUBLIC HELPERS
// ============================================================================

/// Rounds `value` to `places` decimal places.
///
/// # Examples
///
/// ```rust
/// use formtype_types::decimal::{round, RoundMode};
///
/// assert_eq!(round(1.005, 2, RoundMode::HalfAwayFromZero), 1.01);
/// assert_eq!(round(-2.5, 0, RoundMode::HalfAwayFromZero), -3.0);
/// assert_eq!(round(2.5, 0, RoundMode::HalfEven), 2.0);
/// ```
#[must_use]
pub fn round(value: f64, places: u32, mode: RoundMode) -> f64 {
    from_float(value).map_or(value, |d| to_float(&rounded(d, places, mode)))
}

/// Multiplies `value` by `10^places` by moving the decimal point.
///
/// ```rust
/// use formtype_types::decimal::shift;
///
/// assert_eq!(shift(0.1, 2), 10.0);
/// assert_eq!(shift(10.0, -2), 0.1);
/// assert_eq!(shift(0.07, 2), 7.0);
/// ```
#[must_use]
pub fn shift(value: f64, places: i32) -> f64 {
    match from_float(value).and_then(|d| shifted(d, places)) {
        Some(decimal) => to_float(&decimal),
        None => value * 10f64.powi(places),
    }
}

/// Number of digits after the decimal point in the shortest form of
/// `value`.
#[must_use]
pub fn decimal_places(value: f64) -> u32 {
    from_float(value).map_or(0, |d| places(&d))
}
