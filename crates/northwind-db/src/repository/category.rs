//! # Category Repository
//!
//! Category queries and loading of the Category → Products relation.
//!
//! ## Loading Strategies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Eager vs Explicit                                    │
//! │                                                                         │
//! │  EAGER (one round trip)                                                │
//! │    SELECT ... FROM categories c                                        │
//! │    LEFT JOIN products p ON p.category_id = c.category_id [AND filter]  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    every category: products = Loaded(..)                               │
//! │                                                                         │
//! │  EXPLICIT (one + one per opted-in category)                            │
//! │    SELECT ... FROM categories                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    every category: products = NotLoaded                                │
//! │         │                                                               │
//! │         ▼  session.load_products(id)   (caller decides, per category)  │
//! │    SELECT ... FROM products WHERE category_id = ? [AND filter]         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    that category: products = Loaded(..), never fetched again           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`CategorySession`] owns one pooled connection from the initial query
//! until it is dropped, so every explicit load in a session runs on the same
//! connection.

use northwind_core::validation::validate_category_name;
use northwind_core::{
    Category, CategoryProductCount, CategoryStock, CategoryWithProducts, CoreError, LoadStrategy,
    Money, Product, ProductFilter, ProductStock, Related,
};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// One row of the eager `categories LEFT JOIN products` query.
#[derive(Debug, sqlx::FromRow)]
struct CategoryProductRow {
    category_id: i64,
    category_name: String,
    description: Option<String>,
    product_id: Option<i64>,
    product_name: Option<String>,
    unit_price_cents: Option<Money>,
    units_in_stock: Option<i64>,
    discontinued: Option<bool>,
}

impl CategoryProductRow {
    fn category(&self) -> Category {
        Category {
            id: self.category_id,
            name: self.category_name.clone(),
            description: self.description.clone(),
        }
    }

    /// The joined product, or `None` for a category with no (matching) products.
    fn into_product(self) -> Option<Product> {
        let id = self.product_id?;
        Some(Product {
            id,
            name: self.product_name.unwrap_or_default(),
            category_id: self.category_id,
            cost: self.unit_price_cents,
            units_in_stock: self.units_in_stock.unwrap_or_default(),
            discontinued: self.discontinued.unwrap_or_default(),
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for category queries.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Runs the initial category query and returns a session over its result.
    ///
    /// ## Arguments
    /// * `strategy` - Eager: products arrive with the categories.
    ///   Explicit: products stay unloaded until [`CategorySession::load_products`].
    /// * `filter` - Applied inside the relation fetch for either strategy.
    pub async fn open_session(
        &self,
        strategy: LoadStrategy,
        filter: ProductFilter,
    ) -> DbResult<CategorySession> {
        let mut conn = self.pool.acquire().await?;

        debug!(%strategy, ?filter, "Opening category session");

        let categories = match strategy {
            LoadStrategy::Eager => fetch_with_products(&mut conn, filter).await?,
            LoadStrategy::Explicit => fetch_categories(&mut conn)
                .await?
                .into_iter()
                .map(CategoryWithProducts::unloaded)
                .collect(),
        };

        debug!(count = categories.len(), "Category session opened");

        Ok(CategorySession {
            conn,
            strategy,
            filter,
            categories,
            relation_fetches: 0,
        })
    }

    /// Lists every category with the number of products the strategy loaded.
    ///
    /// Under [`LoadStrategy::Explicit`], `should_load` is asked once per
    /// category, in id order; categories it declines report a count of zero.
    /// Under [`LoadStrategy::Eager`] it is never called.
    pub async fn list_categories_with_product_counts<F>(
        &self,
        strategy: LoadStrategy,
        mut should_load: F,
    ) -> DbResult<Vec<CategoryProductCount>>
    where
        F: FnMut(&Category) -> bool,
    {
        let mut session = self.open_session(strategy, ProductFilter::all()).await?;

        if strategy == LoadStrategy::Explicit {
            let candidates: Vec<Category> = session
                .categories()
                .iter()
                .map(|c| c.category.clone())
                .collect();

            for category in &candidates {
                if should_load(category) {
                    session.load_products(category.id).await?;
                }
            }
        }

        Ok(session.product_counts())
    }

    /// Lists every category with only its products having at least
    /// `min_stock` units in stock.
    ///
    /// The threshold is part of the join condition, so categories without a
    /// qualifying product are still listed (with a count of zero). Negative
    /// thresholds are used as given.
    pub async fn list_categories_filtered_by_stock(
        &self,
        min_stock: i64,
    ) -> DbResult<Vec<CategoryStock>> {
        let session = self
            .open_session(LoadStrategy::Eager, ProductFilter::min_stock(min_stock))
            .await?;

        let listing = session
            .into_categories()
            .into_iter()
            .map(|entry| {
                let products: Vec<ProductStock> = entry
                    .products
                    .into_items()
                    .into_iter()
                    .map(|p| ProductStock {
                        product_name: p.name,
                        units_in_stock: p.units_in_stock,
                    })
                    .collect();

                CategoryStock {
                    category_name: entry.category.name,
                    product_count: products.len(),
                    products,
                }
            })
            .collect();

        Ok(listing)
    }

    /// Lists all categories in id order, without products.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let mut conn = self.pool.acquire().await?;
        fetch_categories(&mut conn).await
    }

    /// Gets a category by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id AS id, category_name AS name, description
            FROM categories
            WHERE category_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Counts categories.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts a category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - The stored category with its assigned id
    /// * `Err(DbError::ConstraintViolation)` - Name already exists
    /// * `Err(DbError::Domain)` - Name empty or longer than 15 characters
    pub async fn insert(&self, name: &str, description: Option<&str>) -> DbResult<Category> {
        let name = validate_category_name(name).map_err(CoreError::from)?;
        debug!(name = %name, "Inserting category");

        let mut tx = self.pool.begin().await?;
        let id = insert_category(&mut *tx, &name, description).await?;
        tx.commit().await?;

        Ok(Category {
            id,
            name,
            description: description.map(str::to_string),
        })
    }
}

/// Writes one category row on `conn` and returns its id.
///
/// The caller owns the transaction; nothing is validated here.
pub(crate) async fn insert_category(
    conn: &mut SqliteConnection,
    name: &str,
    description: Option<&str>,
) -> DbResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO categories (category_name, description)
        VALUES (?1, ?2)
        "#,
    )
    .bind(name)
    .bind(description)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

// =============================================================================
// Session
// =============================================================================

/// The result of one category query, plus the connection it ran on.
///
/// Dropping the session returns the connection to the pool.
#[derive(Debug)]
pub struct CategorySession {
    conn: PoolConnection<Sqlite>,
    strategy: LoadStrategy,
    filter: ProductFilter,
    categories: Vec<CategoryWithProducts>,
    relation_fetches: usize,
}

impl CategorySession {
    /// The strategy the session was opened with.
    pub fn strategy(&self) -> LoadStrategy {
        self.strategy
    }

    /// Categories in id order with their relation state.
    pub fn categories(&self) -> &[CategoryWithProducts] {
        &self.categories
    }

    /// Number of per-category product fetches issued so far.
    pub fn relation_fetches(&self) -> usize {
        self.relation_fetches
    }

    /// Loads the products of one category, unless already loaded.
    ///
    /// Calling this twice for the same category returns the same products
    /// and issues a single fetch. Under the eager strategy every relation is
    /// already loaded, so no fetch is ever issued.
    ///
    /// ## Returns
    /// * `Ok(&[Product])` - The category's products (filtered)
    /// * `Err(DbError::NotFound)` - The category is not part of this session
    pub async fn load_products(&mut self, category_id: i64) -> DbResult<&[Product]> {
        let index = self
            .categories
            .iter()
            .position(|c| c.category.id == category_id)
            .ok_or_else(|| DbError::not_found("Category", category_id.to_string()))?;

        if !self.categories[index].products.is_loaded() {
            debug!(category_id, filter = ?self.filter, "Explicitly loading products");

            let products = sqlx::query_as::<_, Product>(
                r#"
                SELECT
                    product_id AS id,
                    product_name AS name,
                    category_id,
                    unit_price_cents AS cost,
                    units_in_stock,
                    discontinued
                FROM products
                WHERE category_id = ?1
                AND (?2 IS NULL OR units_in_stock >= ?2)
                ORDER BY product_id
                "#,
            )
            .bind(category_id)
            .bind(self.filter.min_units_in_stock)
            .fetch_all(&mut *self.conn)
            .await?;

            self.relation_fetches += 1;
            debug!(category_id, count = products.len(), "Products loaded");
            self.categories[index].products = Related::Loaded(products);
        }

        Ok(self.categories[index].products.items())
    }

    /// Category names with the number of products currently visible.
    pub fn product_counts(&self) -> Vec<CategoryProductCount> {
        self.categories
            .iter()
            .map(|c| CategoryProductCount {
                category_name: c.category.name.clone(),
                product_count: c.products.len(),
            })
            .collect()
    }

    /// Releases the connection and returns the loaded categories.
    pub fn into_categories(self) -> Vec<CategoryWithProducts> {
        self.categories
    }
}

// =============================================================================
// Queries
// =============================================================================

async fn fetch_categories(conn: &mut PoolConnection<Sqlite>) -> DbResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT category_id AS id, category_name AS name, description
        FROM categories
        ORDER BY category_id
        "#,
    )
    .fetch_all(&mut **conn)
    .await?;

    Ok(categories)
}

async fn fetch_with_products(
    conn: &mut PoolConnection<Sqlite>,
    filter: ProductFilter,
) -> DbResult<Vec<CategoryWithProducts>> {
    // The filter sits in the ON clause so that categories without a
    // matching product still produce one row (with NULL product columns)
    let rows = sqlx::query_as::<_, CategoryProductRow>(
        r#"
        SELECT
            c.category_id,
            c.category_name,
            c.description,
            p.product_id,
            p.product_name,
            p.unit_price_cents,
            p.units_in_stock,
            p.discontinued
        FROM categories c
        LEFT JOIN products p
            ON p.category_id = c.category_id
            AND (?1 IS NULL OR p.units_in_stock >= ?1)
        ORDER BY c.category_id, p.product_id
        "#,
    )
    .bind(filter.min_units_in_stock)
    .fetch_all(&mut **conn)
    .await?;

    debug!(rows = rows.len(), "Eager category query returned rows");

    let mut categories: Vec<CategoryWithProducts> = Vec::new();
    for row in rows {
        let starts_new = categories
            .last()
            .map_or(true, |last| last.category.id != row.category_id);
        if starts_new {
            categories.push(CategoryWithProducts {
                category: row.category(),
                products: Related::Loaded(Vec::new()),
            });
        }

        if let (Some(product), Some(entry)) = (row.into_product(), categories.last_mut()) {
            entry.products.push(product);
        }
    }

    Ok(categories)
}

// =============================================================================
// Unit Tests
// =============================================================================
