//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A change computation that drifts by even one cent hands the buyer     │
//! │  the wrong coins, or worse, corrupts the reserve bookkeeping.          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every denomination, price, and amount carries exactly two decimal   │
//! │    places of meaning, so i64 cents represent all of them exactly.      │
//! │    Half-up rounding at two decimal places becomes the identity.        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendo_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(150); // 1.50
//!
//! // Or parse a two-decimal-place string at the boundary
//! let coin = Money::parse("0.20").unwrap();
//!
//! // Arithmetic operations
//! let total = price + coin; // 1.70
//! assert_eq!(total.cents(), 170);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values so that
///   underpayment and invalid amounts can be detected rather than wrap
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Ord derive**: Denominations sort by value, which the coin reserve
///   relies on for its descending depletion order
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► purchase validation ──► tendered sum − price        │
/// │                                                  │                      │
/// │  Denomination ──► reserve counts ──► change combination ◄───────┘      │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let price = Money::from_cents(105); // 1.05
    /// assert_eq!(price.cents(), 105);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let price = Money::from_major_minor(1, 5); // 1.05
    /// assert_eq!(price.cents(), 105);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-1, 50)` = -1.50, not -0.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a decimal string with at most two fraction digits.
    ///
    /// This is the boundary constructor: maintainer and demo input arrives
    /// as text like `"1.05"` or `"0.5"`. Inputs with more than two fraction
    /// digits are rejected rather than rounded, because denominations and
    /// prices are defined to carry exactly two decimal places of meaning.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// assert_eq!(Money::parse("1.05").unwrap().cents(), 105);
    /// assert_eq!(Money::parse("0.5").unwrap().cents(), 50);
    /// assert_eq!(Money::parse("2").unwrap().cents(), 200);
    /// assert!(Money::parse("0.125").is_err());
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let malformed = || ValidationError::MalformedAmount {
            input: input.to_string(),
        };

        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major_part, minor_part) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (unsigned, None),
        };

        if major_part.is_empty() || !major_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let major: i64 = major_part.parse().map_err(|_| malformed())?;

        let minor: i64 = match minor_part {
            None => 0,
            Some(minor) => {
                if minor.is_empty()
                    || minor.len() > 2
                    || !minor.bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(malformed());
                }
                // "5" means 50 cents, "05" means 5 cents
                let parsed: i64 = minor.parse().map_err(|_| malformed())?;
                if minor.len() == 1 {
                    parsed * 10
                } else {
                    parsed
                }
            }
        };

        let cents = major * 100 + minor;
        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
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
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the value with two decimal places, e.g. `1.05` or `-0.50`.
///
/// ## Note
/// This is for logs and the console demo. There is deliberately no currency
/// symbol: the machine has no currency/locale abstraction.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
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

/// Multiplication by a count (denomination × coin count).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: i64) -> Self {
        Money(self.0 * count)
    }
}

/// Summing a tendered coin list into a single amount.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(105);
        assert_eq!(money.cents(), 105);
        assert_eq!(money.major(), 1);
        assert_eq!(money.minor(), 5);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(1, 5).cents(), 105);
        assert_eq!(Money::from_major_minor(-1, 50).cents(), -150);
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(Money::parse("1.05").unwrap().cents(), 105);
        assert_eq!(Money::parse("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse("2").unwrap().cents(), 200);
        assert_eq!(Money::parse(" 1.60 ").unwrap().cents(), 160);
        assert_eq!(Money::parse("-0.10").unwrap().cents(), -10);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse(".5").is_err());
        assert!(Money::parse("1.").is_err());
        assert!(Money::parse("1.005").is_err()); // three fraction digits
        assert!(Money::parse("1,05").is_err());
        assert!(Money::parse("abc").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(105)), "1.05");
        assert_eq!(format!("{}", Money::from_cents(50)), "0.50");
        assert_eq!(format!("{}", Money::from_cents(-150)), "-1.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(100);
        let b = Money::from_cents(50);

        assert_eq!((a + b).cents(), 150);
        assert_eq!((a - b).cents(), 50);
        assert_eq!((a * 3).cents(), 300);
    }

    #[test]
    fn test_sum_of_coins() {
        let coins = [
            Money::from_cents(100),
            Money::from_cents(10),
            Money::from_cents(20),
        ];
        let total: Money = coins.iter().sum();
        assert_eq!(total.cents(), 130);
    }

    #[test]
    fn test_ordering_sorts_denominations_by_value() {
        let mut coins = [
            Money::from_cents(10),
            Money::from_cents(100),
            Money::from_cents(50),
        ];
        coins.sort();
        assert_eq!(
            coins.map(|c| c.cents()),
            [10, 50, 100]
        );
    }
}
