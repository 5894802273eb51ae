//! # Validation Module
//!
//! Turns raw console input into typed values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console prompt                                               │
//! │  └── THIS MODULE: parse text → i64 / Money / bool / trimmed name       │
//! │      (on error the prompt is repeated)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository                                                   │
//! │  └── Receives typed values only; thresholds taken literally            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints (product → category)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CATEGORY_NAME_LEN, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses a whole number such as a stock threshold or a category id.
///
/// Negative values are accepted; the caller decides what they mean.
///
/// ```rust
/// use northwind_core::validation::parse_whole_number;
///
/// assert_eq!(parse_whole_number(" 25 ", "units").unwrap(), 25);
/// assert_eq!(parse_whole_number("-3", "units").unwrap(), -3);
/// assert!(parse_whole_number("2.5", "units").is_err());
/// ```
pub fn parse_whole_number(input: &str, field: &str) -> ValidationResult<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            field: field.to_string(),
            input: trimmed.to_string(),
        })
}

/// Parses a decimal amount (cost, threshold, price increase).
pub fn parse_money(input: &str, field: &str) -> ValidationResult<Money> {
    Money::parse_field(input, field)
}

/// Parses a strictly positive amount, used for price increases.
pub fn parse_positive_money(input: &str, field: &str) -> ValidationResult<Money> {
    let amount = parse_money(input, field)?;
    if amount.is_negative() || amount.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(amount)
}

/// Parses an optional amount: blank input means "no cost".
pub fn parse_optional_money(input: &str, field: &str) -> ValidationResult<Option<Money>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_money(input, field).map(Some)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty
/// - At most 40 characters (Northwind column width)
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "product name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a category name and returns it trimmed (at most 15 characters).
pub fn validate_category_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "category name".to_string(),
        });
    }

    if name.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "category name".to_string(),
            max: MAX_CATEGORY_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a name prefix for update/delete.
///
/// An empty prefix would match every product, so it is refused here.
pub fn validate_name_prefix(prefix: &str) -> ValidationResult<String> {
    let prefix = prefix.trim();

    if prefix.is_empty() {
        return Err(ValidationError::Required {
            field: "name prefix".to_string(),
        });
    }

    if prefix.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name prefix".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(prefix.to_string())
}

/// Validates a search fragment. Empty input is allowed and matches all.
pub fn validate_search_text(text: &str) -> ValidationResult<String> {
    let text = text.trim();

    if text.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "search text".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(text.to_string())
}

/// Parses a Y/N answer.
///
/// ```rust
/// use northwind_core::validation::parse_yes_no;
///
/// assert_eq!(parse_yes_no("Y").unwrap(), true);
/// assert_eq!(parse_yes_no("no").unwrap(), false);
/// assert!(parse_yes_no("maybe").is_err());
/// ```
pub fn parse_yes_no(input: &str) -> ValidationResult<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(ValidationError::NotAllowed {
            field: "answer".to_string(),
            allowed: vec!["Y".to_string(), "N".to_string()],
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
