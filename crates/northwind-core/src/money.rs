//! # Money Module
//!
//! Provides the `Money` type for product costs.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE PRECISION PROBLEM                                                  │
//! │                                                                         │
//! │  Parsing "12.75" as an integer:    fails, or drops the .75              │
//! │  Parsing "0.1" + "0.2" as floats:  0.30000000000000004                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "12.75"  → 1275 cents                                                │
//! │    1275 + 500 = 1775 cents → "$17.75"                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use northwind_core::money::Money;
//!
//! let cost: Money = "10.00".parse().unwrap();
//! let raise: Money = "5".parse().unwrap();
//! assert_eq!(cost.checked_add(raise).unwrap().cents(), 1500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, ValidationError};

/// Number of decimal places stored for a cost.
pub const DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Stored in SQLite as an INTEGER column; with the `sqlx` feature the type
/// encodes and decodes transparently as `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use northwind_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, reporting overflow instead of wrapping.
    ///
    /// ```rust
    /// use northwind_core::money::Money;
    ///
    /// let max = Money::from_cents(i64::MAX);
    /// assert!(max.checked_add(Money::from_cents(1)).is_err());
    /// ```
    pub fn checked_add(self, other: Money) -> Result<Money, CoreError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(CoreError::MoneyOverflow { operation: "addition" })
    }

    /// Parses a decimal amount, naming `field` in any validation error.
    ///
    /// ## Accepted Forms
    /// - `12`, `12.5`, `12.50`, `$12.50`, `-3.25`, `1,234.00`
    ///
    /// ## Rejected Forms
    /// - empty input, `12.345` (more than two places), `abc`, `1.2.3`
    pub fn parse_field(input: &str, field: &str) -> Result<Money, ValidationError> {
        let not_decimal = || ValidationError::NotADecimal {
            field: field.to_string(),
            input: input.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };

        // Grouping commas are only allowed in the whole part
        let whole: String = whole.chars().filter(|c| *c != ',').collect();

        if whole.is_empty() && fraction.is_empty() {
            return Err(not_decimal());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(not_decimal());
        }
        if fraction.len() > DECIMAL_PLACES as usize {
            return Err(ValidationError::TooManyDecimalPlaces {
                field: field.to_string(),
                max_places: DECIMAL_PLACES,
            });
        }

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| not_decimal())?
        };
        let mut fraction_cents: i64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse().map_err(|_| not_decimal())?
        };
        if fraction.len() == 1 {
            fraction_cents *= 10;
        }

        let cents = whole_units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(not_decimal)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$#,##0.00`, the format the product listings use.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.dollars().unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let formatted = format!("{}${}.{:02}", sign, grouped, self.cents_part());
        f.pad(&formatted)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_field(s, "amount")
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
        assert_eq!(Money::from_major(15).cents(), 1500);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(26350).to_string(), "$263.50");
        assert_eq!(Money::from_cents(123_456_789).to_string(), "$1,234,567.89");
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:>8}", Money::from_cents(950)), "   $9.50");
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("12.50".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("$12.05".parse::<Money>().unwrap().cents(), 1205);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!("-3.25".parse::<Money>().unwrap().cents(), -325);
        assert_eq!("1,234.00".parse::<Money>().unwrap().cents(), 123_400);
        assert_eq!("  7.10 ".parse::<Money>().unwrap().cents(), 710);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "".parse::<Money>(),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            "abc".parse::<Money>(),
            Err(ValidationError::NotADecimal { .. })
        ));
        assert!(matches!(
            "1.2.3".parse::<Money>(),
            Err(ValidationError::NotADecimal { .. })
        ));
        assert!(matches!(
            ".".parse::<Money>(),
            Err(ValidationError::NotADecimal { .. })
        ));
        assert!(matches!(
            "12.345".parse::<Money>(),
            Err(ValidationError::TooManyDecimalPlaces { max_places: 2, .. })
        ));
    }

    #[test]
    fn test_parse_field_names_the_field() {
        let err = Money::parse_field("x", "minimum cost").unwrap_err();
        assert_eq!(
            err.to_string(),
            "minimum cost must be a decimal amount like 12.50, got 'x'"
        );
    }

    #[test]
    fn test_checked_add() {
        let cost = Money::from_cents(1000);
        let raise = Money::from_cents(500);
        assert_eq!(cost.checked_add(raise).unwrap(), Money::from_cents(1500));
        assert!(Money::from_cents(i64::MAX)
            .checked_add(Money::from_cents(1))
            .is_err());
    }

    #[test]
    fn test_ordering_follows_cents() {
        assert!(Money::from_cents(1500) > Money::from_cents(1499));
        assert!(Money::from_cents(-1) < Money::zero());
    }
}
