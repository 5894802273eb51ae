//! # northwind-db: Database Layer for the Northwind Store
//!
//! Query and mutation facades over a SQLite copy of the Northwind
//! Categories/Products tables, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Northwind Data Flow                              │
//! │                                                                         │
//! │  Console menu option (1-7)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   northwind-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │    │ CategoryRepo   │   │              │   │   │
//! │  │   │ SqlitePool    │◄───│  └ Session     │   │ 001_schema   │   │   │
//! │  │   │               │    │ ProductRepo    │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   northwind.db                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Category (relation loading) and product repositories
//! - [`seed`] - Sample Northwind data
//!
//! ## Usage
//!
//! ```rust,ignore
//! use northwind_core::LoadStrategy;
//! use northwind_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("northwind.db")).await?;
//!
//! let counts = db
//!     .categories()
//!     .list_categories_with_product_counts(LoadStrategy::Eager, |_| false)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::{CategoryRepository, CategorySession};
pub use repository::product::ProductRepository;
