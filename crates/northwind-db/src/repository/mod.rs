//! # Repository Module
//!
//! Database repository implementations for the Northwind store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  Console option                                                        │
//! │       │                                                                 │
//! │       │  db.categories().open_session(Explicit, filter)                │
//! │       │  db.products().list_products_above_cost(price)                 │
//! │       ▼                                                                 │
//! │  CategoryRepository                 ProductRepository                  │
//! │  ├── open_session  ─► Session       ├── list_products_above_cost       │
//! │  │     └── load_products            ├── search_products_by_name_part   │
//! │  ├── list_categories_with_...       ├── list_all_products_by_cost_...  │
//! │  └── list_categories_filtered_...   ├── add_product                    │
//! │                                     ├── increase_price_by_name_prefix  │
//! │                                     └── delete_products_by_name_prefix │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Categories and relation loading
//! - [`ProductRepository`](product::ProductRepository) - Product queries and mutations

pub mod category;
pub mod product;
