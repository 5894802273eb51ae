//! # northwind-core: Domain Types for the Northwind Store
//!
//! Pure types shared by the database layer and the console shell.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Northwind Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console Shell (apps/console)                 │   │
//! │  │    prompts ──► parse/validate ──► call facade ──► print table   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ northwind-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  related  │  │ validation│  │   │
//! │  │   │ Category  │  │   Money   │  │ Related<T>│  │  parsing  │  │   │
//! │  │   │ Product   │  │  parsing  │  │           │  │  prompts  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CONSOLE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  northwind-db (Database Layer)                  │   │
//! │  │        SQLite queries, migrations, relation loading             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Category, Product) and query result rows
//! - [`money`] - Decimal money with integer cents
//! - [`related`] - State of a one-to-many relation (loaded or not)
//! - [`error`] - Validation error types
//! - [`validation`] - Parsing of shell input into typed values
//!
//! ## Example Usage
//!
//! ```rust
//! use northwind_core::money::Money;
//!
//! // Costs are parsed as decimals, never truncated to integers
//! let cost: Money = "12.50".parse().unwrap();
//! assert_eq!(cost.cents(), 1250);
//! assert_eq!(cost.to_string(), "$12.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod related;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use related::Related;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name.
///
/// Matches the `ProductName nvarchar(40)` column of the Northwind schema.
pub const MAX_PRODUCT_NAME_LEN: usize = 40;

/// Maximum length of a category name (`CategoryName nvarchar(15)`).
pub const MAX_CATEGORY_NAME_LEN: usize = 15;
