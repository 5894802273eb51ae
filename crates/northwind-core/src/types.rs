//! # Domain Types
//!
//! Entities and result rows of the Northwind data-access layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  1      *  ┌─────────────────┐                     │
//! │  │    Category     │───────────►│     Product     │                     │
//! │  │  ─────────────  │            │  ─────────────  │                     │
//! │  │  id             │            │  id             │                     │
//! │  │  name           │            │  name           │                     │
//! │  │  description    │            │  category_id FK │                     │
//! │  └─────────────────┘            │  cost (Money?)  │                     │
//! │                                 │  units_in_stock │                     │
//! │                                 │  discontinued   │                     │
//! │                                 └─────────────────┘                     │
//! │                                                                         │
//! │  CategoryWithProducts = Category + Related<Product>                     │
//! │  LoadStrategy         = Eager | Explicit                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are integers assigned by the store and never change.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;
use crate::related::Related;

// =============================================================================
// Entities
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Always references an existing category.
    pub category_id: i64,
    /// Unit price; Northwind allows it to be absent.
    pub cost: Option<Money>,
    pub units_in_stock: i64,
    pub discontinued: bool,
}

/// Input for inserting a product. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub category_id: i64,
    pub name: String,
    pub cost: Option<Money>,
    pub units_in_stock: i64,
    pub discontinued: bool,
}

impl NewProduct {
    /// Creates an in-stock-zero, not-discontinued product.
    pub fn new(category_id: i64, name: impl Into<String>, cost: Option<Money>) -> Self {
        NewProduct {
            category_id,
            name: name.into(),
            cost,
            units_in_stock: 0,
            discontinued: false,
        }
    }

    /// Sets the initial stock level.
    pub fn units_in_stock(mut self, units: i64) -> Self {
        self.units_in_stock = units;
        self
    }

    /// Marks the product discontinued.
    pub fn discontinued(mut self, discontinued: bool) -> Self {
        self.discontinued = discontinued;
        self
    }
}

/// A category together with the state of its product relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWithProducts {
    pub category: Category,
    pub products: Related<Product>,
}

impl CategoryWithProducts {
    /// Wraps a category whose products have not been fetched.
    pub fn unloaded(category: Category) -> Self {
        CategoryWithProducts {
            category,
            products: Related::NotLoaded,
        }
    }
}

// =============================================================================
// Loading Strategy
// =============================================================================

/// How a category query populates the product relation.
///
/// ```text
/// Eager     one statement: categories LEFT JOIN products
/// Explicit  categories only; products fetched per category on request
/// ```
///
/// Loading on first read is deliberately not offered: a caller must pick
/// one of these two before the query runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStrategy {
    Eager,
    Explicit,
}

impl fmt::Display for LoadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStrategy::Eager => f.write_str("eager"),
            LoadStrategy::Explicit => f.write_str("explicit"),
        }
    }
}

/// Filter applied inside the product relation fetch.
///
/// The condition is part of the SQL join/where clause, so filtered-out
/// products are never read from the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Keep only products with `units_in_stock >= min_units_in_stock`.
    pub min_units_in_stock: Option<i64>,
}

impl ProductFilter {
    /// No filtering: the whole relation.
    pub const fn all() -> Self {
        ProductFilter {
            min_units_in_stock: None,
        }
    }

    /// Products with at least `units` in stock. Negative values are kept as-is.
    pub const fn min_stock(units: i64) -> Self {
        ProductFilter {
            min_units_in_stock: Some(units),
        }
    }
}

// =============================================================================
// Query Results
// =============================================================================

/// One line of the "categories and how many products they have" listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProductCount {
    pub category_name: String,
    pub product_count: usize,
}

/// A product line in the stock-filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStock {
    pub product_name: String,
    pub units_in_stock: i64,
}

/// A category with only the products meeting a stock threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStock {
    pub category_name: String,
    pub product_count: usize,
    pub products: Vec<ProductStock>,
}

/// A search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSummary {
    pub name: String,
    pub units_in_stock: i64,
    pub discontinued: bool,
}

// =============================================================================
// Mutation Results
// =============================================================================

/// Result of inserting a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub product_id: i64,
    pub rows_affected: u64,
}

impl ProductAdded {
    /// Success means exactly one row was written.
    #[inline]
    pub fn succeeded(&self) -> bool {
        self.rows_affected == 1
    }
}

/// Result of raising one product's cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceIncreased {
    pub product_id: i64,
    pub product_name: String,
    pub old_cost: Option<Money>,
    pub new_cost: Money,
    pub rows_affected: u64,
}

impl PriceIncreased {
    /// Success means exactly one row was written.
    #[inline]
    pub fn succeeded(&self) -> bool {
        self.rows_affected == 1
    }
}
