//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ├── constraint failure ──► DbError::ConstraintViolation           │
//! │       │                                                                 │
//! │       └── anything else ───────► DbError::Store (unmodified)            │
//! │                                                                         │
//! │  Repository checks (no matching row) ──► DbError::NotFound              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ShellError (in console) ← Short code + message for the operator       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No operation retries: every failure is returned to the caller as-is.

use std::fmt;

use northwind_core::CoreError;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// The underlying store error, for callers without a direct sqlx dependency.
pub use sqlx::Error as StoreError;

/// Which kind of integrity constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    ForeignKey,
    Unique,
    NotNull,
    Check,
    Other,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::Unique => "unique",
            ConstraintKind::NotNull => "not null",
            ConstraintKind::Check => "check",
            ConstraintKind::Other => "integrity",
        };
        f.write_str(name)
    }
}

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The row a mutation targets does not exist.
    ///
    /// ## When This Occurs
    /// - No product name starts with the requested prefix
    /// - Lookup by id for a deleted row
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    /// A write was rejected by a schema constraint.
    ///
    /// ## When This Occurs
    /// - Inserting a product whose category does not exist
    /// - Inserting a duplicate category name
    #[error("{constraint} constraint violated: {message}")]
    ConstraintViolation {
        constraint: ConstraintKind,
        message: String,
    },

    /// Database connection could not be opened.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Domain arithmetic failed (cost overflow).
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Any other store failure, passed through unmodified.
    #[error("Store error: {0}")]
    Store(#[source] StoreError),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and key.
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// True for `ConstraintViolation`.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, DbError::ConstraintViolation { .. })
    }

    /// True for store-level failures (connectivity, timeouts, SQL errors).
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            DbError::Store(_) | DbError::ConnectionFailed(_) | DbError::MigrationFailed(_)
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database (constraint) → DbError::ConstraintViolation
/// Other (including RowNotFound)      → DbError::Store, unmodified
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) => {
                let constraint = match db_err.kind() {
                    ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
                    ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                    ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                    ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                    // SQLite reports some constraint failures with the
                    // generic SQLITE_CONSTRAINT code
                    _ if db_err.message().contains("constraint failed") => {
                        Some(ConstraintKind::Other)
                    }
                    _ => None,
                };

                match constraint {
                    Some(constraint) => DbError::ConstraintViolation {
                        constraint,
                        message: db_err.message().to_string(),
                    },
                    None => DbError::Store(err),
                }
            }

            _ => DbError::Store(err),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
