//! # Product Repository
//!
//! Product queries and the three product mutations.
//!
//! ## Key Operations
//! - Cost threshold listing, name search, full listing by cost
//! - Insert (foreign key checked by the store)
//! - Price increase and deletion by name prefix
//!
//! ## Name Matching
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Search vs Prefix                                     │
//! │                                                                         │
//! │  search_products_by_name_part("choc")                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  product_name LIKE '%choc%' ESCAPE '\'    (ASCII case-insensitive)      │
//! │       "Chocolade"            ← MATCH                                   │
//! │       "Schoggi Schokolade"   ← no match ("Schok")                      │
//! │                                                                         │
//! │  delete_products_by_name_prefix("Choc")                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  substr(product_name, 1, length('Choc')) = 'Choc'   (exact, literal)   │
//! │       "Chocolate"      ← MATCH                                         │
//! │       "Chocolate Bar"  ← MATCH                                         │
//! │       "chocolate"      ← no match (case differs)                       │
//! │       "Dark Chocolate" ← no match (not at start)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation runs in its own transaction: it either commits fully or
//! leaves the store untouched.

use northwind_core::{Money, NewProduct, PriceIncreased, Product, ProductAdded, ProductSummary};
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let pricey = repo.list_products_above_cost(Money::from_major(50)).await?;
/// let removed = repo.delete_products_by_name_prefix("Choc").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Products whose cost is strictly greater than `min_cost`.
    ///
    /// Ordered by cost descending, ties by id. Products without a cost never
    /// qualify.
    pub async fn list_products_above_cost(&self, min_cost: Money) -> DbResult<Vec<Product>> {
        debug!(min_cost = %min_cost, "Listing products above cost");

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
            WHERE unit_price_cents > ?1
            ORDER BY unit_price_cents DESC, product_id
            "#,
        )
        .bind(min_cost)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Products above cost");
        Ok(products)
    }

    /// Products whose name contains `part`.
    ///
    /// `%`, `_` and `\` in `part` match themselves. An empty `part` matches
    /// every product. Ordered by id.
    pub async fn search_products_by_name_part(&self, part: &str) -> DbResult<Vec<ProductSummary>> {
        debug!(part = %part, "Searching products by name");

        let products = sqlx::query_as::<_, ProductSummary>(
            r#"
            SELECT
                product_name AS name,
                units_in_stock,
                discontinued
            FROM products
            WHERE product_name LIKE ?1 ESCAPE '\'
            ORDER BY product_id
            "#,
        )
        .bind(contains_pattern(part))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Every product, cost descending. Products without a cost come last;
    /// ties are ordered by id.
    pub async fn list_all_products_by_cost_descending(&self) -> DbResult<Vec<Product>> {
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
            ORDER BY unit_price_cents IS NULL, unit_price_cents DESC, product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                product_id AS id,
                product_name AS name,
                category_id,
                unit_price_cents AS cost,
                units_in_stock,
                discontinued
            FROM products
            WHERE product_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Inserts a product.
    ///
    /// ## Returns
    /// * `Ok(ProductAdded)` - Assigned id and rows written
    /// * `Err(DbError::ConstraintViolation)` - `category_id` names no category;
    ///   nothing is written
    pub async fn add_product(&self, product: &NewProduct) -> DbResult<ProductAdded> {
        debug!(
            name = %product.name,
            category_id = product.category_id,
            "Adding product"
        );

        let mut tx = self.pool.begin().await?;
        let result = insert_product(&mut *tx, product).await?;
        tx.commit().await?;

        let added = ProductAdded {
            product_id: result.last_insert_rowid(),
            rows_affected: result.rows_affected(),
        };

        info!(product_id = added.product_id, "Product added");
        Ok(added)
    }

    /// Raises the cost of the first product (lowest id) whose name starts
    /// with `prefix`.
    ///
    /// A product without a cost is treated as costing zero. Other products
    /// sharing the prefix are left alone.
    ///
    /// ## Returns
    /// * `Ok(PriceIncreased)` - Old and new cost of the updated product
    /// * `Err(DbError::NotFound)` - No name starts with `prefix`
    /// * `Err(DbError::Domain)` - The new cost would overflow
    pub async fn increase_price_by_name_prefix(
        &self,
        prefix: &str,
        amount: Money,
    ) -> DbResult<PriceIncreased> {
        debug!(prefix = %prefix, amount = %amount, "Increasing product price");

        let mut tx = self.pool.begin().await?;

        let target = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                product_id AS id,
                product_name AS name,
                category_id,
                unit_price_cents AS cost,
                units_in_stock,
                discontinued
            FROM products
            WHERE substr(product_name, 1, length(?1)) = ?1
            ORDER BY product_id
            LIMIT 1
            "#,
        )
        .bind(prefix)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Product", format!("name starting with '{prefix}'")))?;

        let new_cost = target.cost.unwrap_or_default().checked_add(amount)?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET unit_price_cents = ?2
            WHERE product_id = ?1
            "#,
        )
        .bind(target.id)
        .bind(new_cost)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            product_id = target.id,
            new_cost = %new_cost,
            "Product price increased"
        );

        Ok(PriceIncreased {
            product_id: target.id,
            product_name: target.name,
            old_cost: target.cost,
            new_cost,
            rows_affected: result.rows_affected(),
        })
    }

    /// Deletes every product whose name starts with `prefix`.
    ///
    /// An empty `prefix` matches every name and empties the table. Callers
    /// taking operator input must refuse it first (the console does, via
    /// `validate_name_prefix`).
    ///
    /// ## Returns
    /// The number of products deleted; zero when nothing matched.
    pub async fn delete_products_by_name_prefix(&self, prefix: &str) -> DbResult<u64> {
        debug!(prefix = %prefix, "Deleting products by prefix");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE substr(product_name, 1, length(?1)) = ?1
            "#,
        )
        .bind(prefix)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let deleted = result.rows_affected();
        info!(prefix = %prefix, deleted, "Products deleted");
        Ok(deleted)
    }
}

/// Writes one product row on `conn`. The caller owns the transaction.
pub(crate) async fn insert_product(
    conn: &mut SqliteConnection,
    product: &NewProduct,
) -> DbResult<SqliteQueryResult> {
    let result = sqlx::query(
        r#"
        INSERT INTO products (
            product_name, category_id, unit_price_cents,
            units_in_stock, discontinued
        ) VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&product.name)
    .bind(product.category_id)
    .bind(product.cost)
    .bind(product.units_in_stock)
    .bind(product.discontinued)
    .execute(&mut *conn)
    .await?;

    Ok(result)
}

/// Builds a `LIKE` pattern matching names that contain `part` literally.
fn contains_pattern(part: &str) -> String {
    let mut pattern = String::with_capacity(part.len() + 2);
    pattern.push('%');
    for c in part.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{add_category, add_product, empty_db};

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("choc"), "%choc%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[tokio::test]
    async fn test_above_cost_is_strict_and_ordered() {
        let db = empty_db().await;
        let cat = add_category(&db, "Beverages").await;
        let low = add_product(&db, cat.id, "Chai", Some(1800), 39).await;
        let tie_a = add_product(&db, cat.id, "Ipoh Coffee", Some(4600), 17).await;
        let tie_b = add_product(&db, cat.id, "Outback Lager", Some(4600), 15).await;
        let high = add_product(&db, cat.id, "Côte de Blaye", Some(26350), 17).await;
        add_product(&db, cat.id, "Mystery Tea", None, 1).await;

        let products = db
            .products()
            .list_products_above_cost(Money::from_cents(1800))
            .await
            .unwrap();

        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![high, tie_a, tie_b]);
        assert!(!ids.contains(&low));
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let db = empty_db().await;
        let cat = add_category(&db, "Confections").await;
        add_product(&db, cat.id, "Chocolade", Some(1275), 15).await;
        add_product(&db, cat.id, "100% Cocoa", Some(500), 3).await;
        add_product(&db, cat.id, "Pavlova", Some(1745), 29).await;

        let products = db.products();
        let hits = products.search_products_by_name_part("choc").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Chocolade");
        assert_eq!(hits[0].units_in_stock, 15);

        let percent = products.search_products_by_name_part("%").await.unwrap();
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].name, "100% Cocoa");

        assert_eq!(products.search_products_by_name_part("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_all_products_put_missing_cost_last() {
        let db = empty_db().await;
        let cat = add_category(&db, "Produce").await;
        let unpriced = add_product(&db, cat.id, "Mystery Fruit", None, 0).await;
        let cheap = add_product(&db, cat.id, "Tofu", Some(2325), 35).await;
        let dear = add_product(&db, cat.id, "Dried Apples", Some(5300), 20).await;

        let ids: Vec<i64> = db
            .products()
            .list_all_products_by_cost_descending()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![dear, cheap, unpriced]);
    }

    #[tokio::test]
    async fn test_add_product_round_trips_fields() {
        let db = empty_db().await;
        let cat = add_category(&db, "Seafood").await;

        let new = NewProduct::new(cat.id, "Ikura", Some(Money::from_cents(3100)))
            .units_in_stock(31)
            .discontinued(true);
        let added = db.products().add_product(&new).await.unwrap();
        assert!(added.succeeded());

        let stored = db.products().get_by_id(added.product_id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ikura");
        assert_eq!(stored.category_id, cat.id);
        assert_eq!(stored.cost, Some(Money::from_cents(3100)));
        assert_eq!(stored.units_in_stock, 31);
        assert!(stored.discontinued);
    }

    #[tokio::test]
    async fn test_add_product_unknown_category_is_rejected() {
        let db = empty_db().await;
        add_category(&db, "Seafood").await;

        let err = db
            .products()
            .add_product(&NewProduct::new(999, "Orphan", None))
            .await
            .unwrap_err();

        assert!(err.is_constraint_violation());
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_increase_price_touches_lowest_id_only() {
        let db = empty_db().await;
        let cat = add_category(&db, "Condiments").await;
        let first = add_product(&db, cat.id, "Chef Anton's Cajun Seasoning", Some(2200), 53).await;
        let second = add_product(&db, cat.id, "Chef Anton's Gumbo Mix", Some(2135), 0).await;

        let increased = db
            .products()
            .increase_price_by_name_prefix("Chef Anton", Money::from_cents(100))
            .await
            .unwrap();

        assert!(increased.succeeded());
        assert_eq!(increased.product_id, first);
        assert_eq!(increased.old_cost, Some(Money::from_cents(2200)));
        assert_eq!(increased.new_cost, Money::from_cents(2300));

        let untouched = db.products().get_by_id(second).await.unwrap().unwrap();
        assert_eq!(untouched.cost, Some(Money::from_cents(2135)));
    }

    #[tokio::test]
    async fn test_increase_price_treats_missing_cost_as_zero() {
        let db = empty_db().await;
        let cat = add_category(&db, "Produce").await;
        add_product(&db, cat.id, "Unpriced Pears", None, 5).await;

        let increased = db
            .products()
            .increase_price_by_name_prefix("Unpriced", Money::from_cents(250))
            .await
            .unwrap();

        assert_eq!(increased.old_cost, None);
        assert_eq!(increased.new_cost, Money::from_cents(250));
    }

    #[tokio::test]
    async fn test_increase_price_without_match_is_not_found() {
        let db = empty_db().await;
        let cat = add_category(&db, "Produce").await;
        add_product(&db, cat.id, "tofu", Some(2325), 35).await;

        let err = db
            .products()
            .increase_price_by_name_prefix("Tofu", Money::from_cents(100))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_increase_price_overflow_leaves_cost() {
        let db = empty_db().await;
        let cat = add_category(&db, "Produce").await;
        let id = add_product(&db, cat.id, "Gold Leaf", Some(i64::MAX - 1), 1).await;

        let err = db
            .products()
            .increase_price_by_name_prefix("Gold", Money::from_cents(10))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Domain(_)));
        let stored = db.products().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.cost, Some(Money::from_cents(i64::MAX - 1)));
    }

    #[tokio::test]
    async fn test_delete_by_prefix_is_case_sensitive() {
        let db = empty_db().await;
        let cat = add_category(&db, "Confections").await;
        add_product(&db, cat.id, "Chocolate", Some(500), 1).await;
        add_product(&db, cat.id, "Chocolate Bar", Some(300), 1).await;
        add_product(&db, cat.id, "chocolate milk", Some(200), 1).await;
        add_product(&db, cat.id, "Dark Chocolate", Some(700), 1).await;

        let deleted = db
            .products()
            .delete_products_by_name_prefix("Choc")
            .await
            .unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(db.products().count().await.unwrap(), 2);
    }
}
