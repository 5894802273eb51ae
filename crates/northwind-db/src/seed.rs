//! # Sample Data
//!
//! The classic Northwind categories and products, for development and demos.
//!
//! Seeding only runs against an empty store: if any category or product
//! exists, nothing is written.

use northwind_core::{Money, NewProduct};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::category::insert_category;
use crate::repository::product::insert_product;

/// `(name, description)`
type SeedCategory = (&'static str, &'static str);

/// `(name, category index, cost in cents, units in stock, discontinued)`
type SeedProduct = (&'static str, usize, i64, i64, bool);

/// `(name, description)` in id order.
const CATEGORIES: &[SeedCategory] = &[
    ("Beverages", "Soft drinks, coffees, teas, beers, and ales"),
    ("Condiments", "Sweet and savory sauces, relishes, spreads, and seasonings"),
    ("Confections", "Desserts, candies, and sweet breads"),
    ("Dairy Products", "Cheeses"),
    ("Grains/Cereals", "Breads, crackers, pasta, and cereal"),
    ("Meat/Poultry", "Prepared meats"),
    ("Produce", "Dried fruit and bean curd"),
    ("Seafood", "Seaweed and fish"),
];

/// `(name, category index into CATEGORIES, cost in cents, units in stock, discontinued)`
const PRODUCTS: &[SeedProduct] = &[
    ("Chai", 0, 1800, 39, false),
    ("Chang", 0, 1900, 17, false),
    ("Aniseed Syrup", 1, 1000, 13, false),
    ("Chef Anton's Cajun Seasoning", 1, 2200, 53, false),
    ("Chef Anton's Gumbo Mix", 1, 2135, 0, true),
    ("Grandma's Boysenberry Spread", 1, 2500, 120, false),
    ("Uncle Bob's Organic Dried Pears", 6, 3000, 15, false),
    ("Northwoods Cranberry Sauce", 1, 4000, 6, false),
    ("Mishi Kobe Niku", 5, 9700, 29, true),
    ("Ikura", 7, 3100, 31, false),
    ("Queso Cabrales", 3, 2100, 22, false),
    ("Queso Manchego La Pastora", 3, 3800, 86, false),
    ("Konbu", 7, 600, 24, false),
    ("Tofu", 6, 2325, 35, false),
    ("Genen Shouyu", 1, 1550, 39, false),
    ("Pavlova", 2, 1745, 29, false),
    ("Alice Mutton", 5, 3900, 0, true),
    ("Carnarvon Tigers", 7, 6250, 42, false),
    ("Teatime Chocolate Biscuits", 2, 920, 25, false),
    ("Sir Rodney's Marmalade", 2, 8100, 40, false),
    ("Sir Rodney's Scones", 2, 1000, 3, false),
    ("Gustaf's Knäckebröd", 4, 2100, 104, false),
    ("Tunnbröd", 4, 900, 61, false),
    ("Guaraná Fantástica", 0, 450, 20, true),
    ("NuNuCa Nuß-Nougat-Creme", 2, 1400, 76, false),
    ("Gumbär Gummibärchen", 2, 3123, 15, false),
    ("Schoggi Schokolade", 2, 4390, 49, false),
    ("Rössle Sauerkraut", 6, 4560, 26, true),
    ("Thüringer Rostbratwurst", 5, 12379, 0, true),
    ("Nord-Ost Matjeshering", 7, 2589, 10, false),
    ("Gorgonzola Telino", 3, 1250, 0, false),
    ("Mascarpone Fabioli", 3, 3200, 9, false),
    ("Geitost", 3, 250, 112, false),
    ("Sasquatch Ale", 0, 1400, 111, false),
    ("Steeleye Stout", 0, 1800, 20, false),
    ("Inlagd Sill", 7, 1900, 112, false),
    ("Gravad lax", 7, 2600, 11, false),
    ("Côte de Blaye", 0, 26350, 17, false),
    ("Chartreuse verte", 0, 1800, 69, false),
    ("Boston Crab Meat", 7, 1840, 123, false),
    ("Jack's New England Clam Chowder", 7, 965, 85, false),
    ("Singaporean Hokkien Fried Mee", 4, 1400, 26, true),
    ("Ipoh Coffee", 0, 4600, 17, false),
    ("Gula Malacca", 1, 1945, 27, false),
    ("Rogede sild", 7, 950, 5, false),
    ("Spegesild", 7, 1200, 95, false),
    ("Zaanse koeken", 2, 950, 36, false),
    ("Chocolade", 2, 1275, 15, false),
    ("Maxilaku", 2, 2000, 10, false),
    ("Valkoinen suklaa", 2, 1625, 65, false),
    ("Manjimup Dried Apples", 6, 5300, 20, false),
    ("Filo Mix", 4, 700, 38, false),
    ("Perth Pasties", 5, 3280, 0, true),
    ("Tourtière", 5, 745, 21, false),
    ("Pâté chinois", 5, 2400, 115, false),
    ("Gnocchi di nonna Alice", 4, 3800, 21, false),
    ("Ravioli Angelo", 4, 1950, 36, false),
    ("Escargots de Bourgogne", 7, 1325, 62, false),
    ("Raclette Courdavault", 3, 5500, 79, false),
    ("Camembert Pierrot", 3, 3400, 19, false),
    ("Sirop d'érable", 1, 2850, 113, false),
    ("Tarte au sucre", 2, 4930, 17, false),
    ("Vegie-spread", 1, 4390, 24, false),
    ("Wimmers gute Semmelknödel", 4, 3325, 22, false),
    ("Louisiana Fiery Hot Pepper Sauce", 1, 2105, 76, false),
    ("Louisiana Hot Spiced Okra", 1, 1700, 4, false),
    ("Laughing Lumberjack Lager", 0, 1400, 52, false),
    ("Scottish Longbreads", 2, 1250, 6, false),
    ("Gudbrandsdalsost", 3, 3600, 26, false),
    ("Outback Lager", 0, 1500, 15, false),
    ("Flotemysost", 3, 2150, 26, false),
    ("Mozzarella di Giovanni", 3, 3480, 14, false),
    ("Röd Kaviar", 7, 1500, 101, false),
    ("Longlife Tofu", 6, 1000, 4, false),
    ("Rhönbräu Klosterbier", 0, 775, 125, false),
    ("Lakkalikööri", 0, 1800, 57, false),
    ("Original Frankfurter grüne Soße", 1, 1300, 32, false),
];

/// What a seeding run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub categories: usize,
    pub products: usize,
}

impl SeedSummary {
    /// True when the store already had data and nothing was written.
    pub fn skipped(&self) -> bool {
        self.categories == 0 && self.products == 0
    }
}

/// Loads the sample categories and products into an empty store.
///
/// All rows are written in one transaction: a failure part-way leaves the
/// store empty, so a later run can seed it again.
///
/// ## Returns
/// * `Ok(SeedSummary)` - Rows written (both zero when the store had data)
pub async fn seed_sample_data(db: &Database) -> DbResult<SeedSummary> {
    seed_rows(db, CATEGORIES, PRODUCTS).await
}

async fn seed_rows(
    db: &Database,
    categories: &[SeedCategory],
    products: &[SeedProduct],
) -> DbResult<SeedSummary> {
    let mut tx = db.pool().begin().await?;

    let (existing_categories, existing_products): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM categories),
            (SELECT COUNT(*) FROM products)
        "#,
    )
    .fetch_one(&mut *tx)
    .await?;

    if existing_categories > 0 || existing_products > 0 {
        warn!(
            categories = existing_categories,
            products = existing_products,
            "Store already has data, skipping seed"
        );
        return Ok(SeedSummary::default());
    }

    let mut category_ids = Vec::with_capacity(categories.len());
    for &(name, description) in categories {
        category_ids.push(insert_category(&mut *tx, name, Some(description)).await?);
    }

    for &(name, category, cost_cents, units_in_stock, discontinued) in products {
        let category_id = category_ids
            .get(category)
            .copied()
            .ok_or_else(|| DbError::not_found("Seed category", category.to_string()))?;

        let product = NewProduct::new(category_id, name, Some(Money::from_cents(cost_cents)))
            .units_in_stock(units_in_stock)
            .discontinued(discontinued);

        insert_product(&mut *tx, &product).await?;
    }

    tx.commit().await?;

    let summary = SeedSummary {
        categories: category_ids.len(),
        products: products.len(),
    };

    info!(
        categories = summary.categories,
        products = summary.products,
        "Sample data seeded"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;

    #[test]
    fn test_product_categories_exist() {
        assert!(PRODUCTS.iter().all(|p| p.1 < CATEGORIES.len()));
    }

    #[tokio::test]
    async fn test_seed_fills_empty_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let summary = seed_sample_data(&db).await.unwrap();
        assert_eq!(summary.categories, 8);
        assert_eq!(summary.products, PRODUCTS.len());
        assert_eq!(db.products().count().await.unwrap(), PRODUCTS.len() as i64);
    }

    #[tokio::test]
    async fn test_seed_is_skipped_when_data_exists() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_sample_data(&db).await.unwrap();

        let second = seed_sample_data(&db).await.unwrap();
        assert!(second.skipped());
        assert_eq!(db.categories().count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_failed_seed_leaves_store_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // Second product points past the category list
        let products: &[SeedProduct] = &[
            ("Chai", 0, 1800, 39, false),
            ("Chang", 5, 1900, 17, false),
        ];
        let err = seed_rows(&db, &CATEGORIES[..2], products).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(db.categories().count().await.unwrap(), 0);
        assert_eq!(db.products().count().await.unwrap(), 0);

        // Duplicate category name fails inside the store
        let categories: &[SeedCategory] = &[("Beverages", "a"), ("Beverages", "b")];
        let err = seed_rows(&db, categories, &[]).await.unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(db.categories().count().await.unwrap(), 0);

        // Nothing half-written blocks a full seed afterwards
        let summary = seed_sample_data(&db).await.unwrap();
        assert_eq!(summary.products, PRODUCTS.len());
    }
}
