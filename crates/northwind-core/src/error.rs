//! # Error Types
//!
//! Domain-specific error types for northwind-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  northwind-core errors (this file)                                     │
//! │  ├── CoreError        - Domain rule failures                           │
//! │  └── ValidationError  - Unparseable or out-of-range shell input        │
//! │                                                                         │
//! │  northwind-db errors (separate crate)                                  │
//! │  └── DbError          - ConstraintViolation, NotFound, Store           │
//! │                                                                         │
//! │  console errors (in app)                                               │
//! │  └── ShellError       - What the operator sees                         │
//! │                                                                         │
//! │  ValidationError never reaches the database layer: the shell           │
//! │  re-prompts until input parses.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Money arithmetic left the representable range.
    #[error("Money overflow while computing {operation}")]
    MoneyOverflow { operation: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when console input doesn't meet requirements.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value could not be parsed as a number.
    #[error("{field} must be a whole number, got '{input}'")]
    NotAnInteger { field: String, input: String },

    /// Value could not be parsed as a decimal amount.
    #[error("{field} must be a decimal amount like 12.50, got '{input}'")]
    NotADecimal { field: String, input: String },

    /// Decimal amount has more than two fractional digits.
    #[error("{field} has more than {max_places} decimal places")]
    TooManyDecimalPlaces { field: String, max_places: u32 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Unit Tests
// =============================================================================
