//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  At checkout this becomes real:                                         │
//! │    tendered >= total compared on floats can flip on the last bit,      │
//! │    and ₱499.99 × discounts drift after a few operations                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Mils (1/1000 of the major unit)                  │
//! │    The UI formats every amount to 3 decimal places ("150.000"),        │
//! │    so the smallest representable unit is one mil. All arithmetic       │
//! │    and comparisons are exact i64 math.                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use zarlette_core::money::Money;
//!
//! // Create from mils (preferred)
//! let price = Money::from_mils(150_000); // ₱150.000
//!
//! // Or from whole major units
//! let same = Money::from_major(150);
//! assert_eq!(price, same);
//!
//! // Arithmetic is exact
//! let discount = Money::from_mils(10_000);
//! assert_eq!((price - discount).to_string(), "140.000");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

/// Number of mils in one major currency unit.
pub const MILS_PER_UNIT: i64 = 1000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in mils (1/1000 of the major currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discounts and change math
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Three decimals**: Matches the fixed "0.000" display format everywhere
///   in the UI, so formatting never rounds
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► CartItem.price ──► Cart.sub_total                    │
/// │                                          │                              │
/// │  CartItem.discount ──► Cart.total_discount                              │
/// │                                          │                              │
/// │  grand_total = sub_total − total_discount ──► tendered / change         │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Wire Format
/// The REST collaborator speaks JSON numbers of major units (`150`, `499.99`),
/// so `Money` serializes as an `f64` of major units and deserializes from
/// either a number or a numeric string. The float only ever exists at the
/// boundary; everything inside is integer mils.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from mils (the smallest representable unit).
    ///
    /// ## Example
    /// ```rust
    /// use zarlette_core::money::Money;
    ///
    /// let price = Money::from_mils(150_000); // ₱150.000
    /// assert_eq!(price.mils(), 150_000);
    /// ```
    #[inline]
    pub const fn from_mils(mils: i64) -> Self {
        Money(mils)
    }

    /// Creates a Money value from whole major units.
    ///
    /// ## Example
    /// ```rust
    /// use zarlette_core::money::Money;
    ///
    /// let price = Money::from_major(150);
    /// assert_eq!(price.mils(), 150_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MILS_PER_UNIT)
    }

    /// Converts a float of major units, rounding half away from zero to the
    /// nearest mil.
    ///
    /// This is the JSON-boundary constructor. Values the collaborator sends
    /// as `499.99` land on exactly 499,990 mils.
    ///
    /// ## Example
    /// ```rust
    /// use zarlette_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64(499.99).mils(), 499_990);
    /// assert_eq!(Money::from_f64(-0.0005).mils(), -1);
    /// ```
    #[inline]
    pub fn from_f64(major: f64) -> Self {
        Money((major * MILS_PER_UNIT as f64).round() as i64)
    }

    /// Returns the value in mils.
    #[inline]
    pub const fn mils(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use zarlette_core::money::Money;
    ///
    /// assert_eq!(Money::from_mils(150_500).major_part(), 150);
    /// assert_eq!(Money::from_mils(-500).major_part(), 0);
    /// ```
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / MILS_PER_UNIT
    }

    /// Returns the fractional portion in mils (always 0-999).
    #[inline]
    pub const fn mils_part(&self) -> i64 {
        (self.0 % MILS_PER_UNIT).abs()
    }

    /// Returns the value as a float of major units.
    ///
    /// For wire serialization and display-side percentages only. Never feed
    /// the result back into arithmetic.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / MILS_PER_UNIT as f64
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Saturating subtraction that never goes below zero.
    ///
    /// Used for change display: while tendered < total the UI shows "0.000"
    /// rather than a negative amount.
    ///
    /// ## Example
    /// ```rust
    /// use zarlette_core::money::Money;
    ///
    /// let total = Money::from_major(140);
    /// let tendered = Money::from_major(100);
    /// assert_eq!(tendered.saturating_sub_zero(total), Money::zero());
    /// ```
    #[inline]
    pub const fn saturating_sub_zero(&self, other: Self) -> Self {
        let diff = self.0 - other.0;
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error returned when a string cannot be parsed as a monetary amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// Input was empty or whitespace only.
    #[error("amount is empty")]
    Empty,
    /// Input contained characters outside `[-0-9.]` or was malformed.
    #[error("invalid amount: {0}")]
    Invalid(String),
    /// More than three decimal places were supplied.
    #[error("too many decimal places in amount: {0}")]
    TooPrecise(String),
}

/// Parses decimal strings like `"150"`, `"150.5"`, or `"150.000"` exactly,
/// without going through floating point.
///
/// Up to three fraction digits are accepted (the display resolution); more
/// is rejected rather than silently rounded.
///
/// ## Example
/// ```rust
/// use zarlette_core::money::Money;
///
/// let tendered: Money = "150".parse().unwrap();
/// assert_eq!(tendered.mils(), 150_000);
/// assert_eq!("0.5".parse::<Money>().unwrap().mils(), 500);
/// assert!("150.0001".parse::<Money>().is_err());
/// assert!("abc".parse::<Money>().is_err());
/// ```
impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };

        // "." alone, or "-." etc.
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(MoneyParseError::Invalid(s.to_string()));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(MoneyParseError::Invalid(s.to_string()));
        }
        if frac_part.len() > 3 {
            return Err(MoneyParseError::TooPrecise(s.to_string()));
        }

        let major: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| MoneyParseError::Invalid(s.to_string()))?
        };

        // Right-pad the fraction to three digits: "5" means 500 mils.
        let mut frac: i64 = 0;
        for c in frac_part.chars() {
            frac = frac * 10 + (c as u8 - b'0') as i64;
        }
        for _ in frac_part.len()..3 {
            frac *= 10;
        }

        let mils = major
            .checked_mul(MILS_PER_UNIT)
            .and_then(|m| m.checked_add(frac))
            .ok_or_else(|| MoneyParseError::Invalid(s.to_string()))?;

        Ok(Money(if negative { -mils } else { mils }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display always uses the fixed 3-decimal format: `"150.000"`, `"0.000"`.
///
/// Currency symbols are a presentation concern and live in the app config,
/// not here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:03}",
            sign,
            self.major_part().abs(),
            self.mils_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Summation, so derived totals read as `items.iter().map(…).sum()`.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Serde (wire boundary)
// =============================================================================

/// Serializes as a JSON number of major units, the collaborator's native
/// shape (`140.0`, `499.99`).
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a monetary amount as a number or numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Ok(Money::from_f64(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money::from_major(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money::from_major(v as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(de::Error::custom)
    }
}

/// Accepts numbers and numeric strings; some report endpoints stringify
/// amounts and the loader must cope.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Lossy deserializer for report rows: anything unparseable becomes zero
/// instead of failing the whole response.
///
/// Use with `#[serde(deserialize_with = "money::lossy_or_zero")]`.
pub fn lossy_or_zero<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    struct LossyVisitor;

    impl Visitor<'_> for LossyVisitor {
        type Value = Money;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a monetary amount, coerced to zero if malformed")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
            if v.is_finite() {
                Ok(Money::from_f64(v))
            } else {
                Ok(Money::zero())
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
            Ok(Money::from_major(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
            Ok(Money::from_major(v as i64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
            Ok(v.parse().unwrap_or_else(|_| Money::zero()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Money, E> {
            Ok(Money::zero())
        }

        fn visit_none<E: de::Error>(self) -> Result<Money, E> {
            Ok(Money::zero())
        }
    }

    deserializer.deserialize_any(LossyVisitor)
}

// =============================================================================
// Unit Tests
// =============================================================================
