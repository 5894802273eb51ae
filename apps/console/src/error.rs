//! # Shell Error Type
//!
//! What the operator sees when a menu option fails.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  Menu option                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Bad input? ─── ValidationError ──► message, same prompt again         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Facade call                                                           │
//! │       ├── DbError::NotFound            ──► [NOT_FOUND]                 │
//! │       ├── DbError::ConstraintViolation ──► [CONSTRAINT_VIOLATION]      │
//! │       └── store failure                ──► [DATABASE_ERROR]            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "Error [CODE]: message" printed, back to the menu                     │
//! │                                                                         │
//! │  Input closed (EOF) ──► [END_OF_INPUT] ──► shell exits cleanly         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::io;

use northwind_core::{CoreError, ValidationError};
use northwind_db::DbError;
use serde::Serialize;

/// Error returned by shell operations.
///
/// ## Serialization
/// In `--json` mode a failed option prints:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: name starting with 'Widget'"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("[{code}] {message}")]
pub struct ShellError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for shell failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Update target absent
    NotFound,

    /// Foreign key, unique, not-null or check failure
    ConstraintViolation,

    /// Input could not be parsed
    ValidationError,

    /// Cost arithmetic left the representable range
    BusinessRule,

    /// Store unreachable or query failed
    DatabaseError,

    /// Console read/write failed
    Io,

    /// Input stream closed
    EndOfInput,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BusinessRule => "BUSINESS_RULE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Io => "IO",
            ErrorCode::EndOfInput => "END_OF_INPUT",
        };
        f.write_str(code)
    }
}

impl ShellError {
    /// Creates a new shell error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ShellError {
            code,
            message: message.into(),
        }
    }

    /// The input stream ended while a prompt was waiting.
    pub fn end_of_input() -> Self {
        ShellError::new(ErrorCode::EndOfInput, "input closed")
    }

    /// True when the shell should stop instead of reporting.
    pub fn is_end_of_input(&self) -> bool {
        self.code == ErrorCode::EndOfInput
    }
}

/// Converts database errors to shell errors.
impl From<DbError> for ShellError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ShellError::new(ErrorCode::NotFound, err.to_string()),
            DbError::ConstraintViolation { .. } => {
                ShellError::new(ErrorCode::ConstraintViolation, err.to_string())
            }
            DbError::Domain(core) => core.into(),
            DbError::Store(ref source) => {
                tracing::error!(error = %source, "Store operation failed");
                ShellError::new(ErrorCode::DatabaseError, err.to_string())
            }
            DbError::ConnectionFailed(_) | DbError::MigrationFailed(_) => {
                ShellError::new(ErrorCode::DatabaseError, err.to_string())
            }
        }
    }
}

impl From<CoreError> for ShellError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MoneyOverflow { .. } => {
                ShellError::new(ErrorCode::BusinessRule, err.to_string())
            }
            CoreError::Validation(v) => v.into(),
        }
    }
}

impl From<ValidationError> for ShellError {
    fn from(err: ValidationError) -> Self {
        ShellError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::new(ErrorCode::Io, err.to_string())
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        ShellError::new(ErrorCode::Io, format!("could not render JSON: {err}"))
    }
}

/// Result type for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;
    use northwind_db::error::{ConstraintKind, StoreError};

    #[test]
    fn test_db_errors_keep_their_kind() {
        let not_found: ShellError = DbError::not_found("Product", "name starting with 'X'").into();
        assert_eq!(not_found.code, ErrorCode::NotFound);

        let constraint: ShellError = DbError::ConstraintViolation {
            constraint: ConstraintKind::ForeignKey,
            message: "FOREIGN KEY constraint failed".to_string(),
        }
        .into();
        assert_eq!(constraint.code, ErrorCode::ConstraintViolation);

        let store: ShellError = DbError::Store(StoreError::PoolTimedOut).into();
        assert_eq!(store.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_overflow_is_business_rule() {
        let err: ShellError = DbError::Domain(CoreError::MoneyOverflow {
            operation: "price increase",
        })
        .into();
        assert_eq!(err.code, ErrorCode::BusinessRule);
    }

    #[test]
    fn test_display_and_json() {
        let err = ShellError::new(ErrorCode::NotFound, "Product not found: 7");
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: 7");

        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"Product not found: 7"}"#);
    }
}
