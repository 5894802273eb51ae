//! End-to-end checks of the query and mutation facades against an
//! in-memory store.

use northwind_core::{LoadStrategy, Money, NewProduct, ProductFilter};
use northwind_db::seed::seed_sample_data;
use northwind_db::{Database, DbConfig, DbError};

async fn db_with_category(name: &str) -> (Database, i64) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let category = db.categories().insert(name, None).await.unwrap();
    (db, category.id)
}

async fn add(db: &Database, category_id: i64, name: &str, cents: i64, stock: i64) -> i64 {
    let product = NewProduct::new(category_id, name, Some(Money::from_cents(cents)))
        .units_in_stock(stock);
    db.products().add_product(&product).await.unwrap().product_id
}

#[tokio::test]
async fn eager_relation_matches_store_for_every_category() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    seed_sample_data(&db).await.unwrap();

    let everything = db
        .products()
        .list_all_products_by_cost_descending()
        .await
        .unwrap();

    let session = db
        .categories()
        .open_session(LoadStrategy::Eager, ProductFilter::all())
        .await
        .unwrap();
    let categories = session.into_categories();

    assert_eq!(categories.len(), 8);
    for entry in &categories {
        let mut expected: Vec<i64> = everything
            .iter()
            .filter(|p| p.category_id == entry.category.id)
            .map(|p| p.id)
            .collect();
        expected.sort_unstable();

        let loaded: Vec<i64> = entry.products.items().iter().map(|p| p.id).collect();
        assert_eq!(loaded, expected, "category {}", entry.category.name);
    }
}

#[tokio::test]
async fn explicit_relation_is_empty_until_loaded_then_stable() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    seed_sample_data(&db).await.unwrap();

    let mut session = db
        .categories()
        .open_session(LoadStrategy::Explicit, ProductFilter::all())
        .await
        .unwrap();

    assert!(session.categories().iter().all(|c| c.products.is_empty()));

    let beverages = session.categories()[0].category.id;
    let once = session.load_products(beverages).await.unwrap().to_vec();
    let twice = session.load_products(beverages).await.unwrap().to_vec();

    assert_eq!(once.len(), 12);
    assert_eq!(once, twice);
    assert_eq!(session.relation_fetches(), 1);
    assert!(session.categories()[1..].iter().all(|c| !c.products.is_loaded()));
}

#[tokio::test]
async fn stock_filter_is_exact() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    seed_sample_data(&db).await.unwrap();
    let threshold = 40;

    let listing = db
        .categories()
        .list_categories_filtered_by_stock(threshold)
        .await
        .unwrap();

    let qualifying = db
        .products()
        .list_all_products_by_cost_descending()
        .await
        .unwrap()
        .into_iter()
        .filter(|p| p.units_in_stock >= threshold)
        .count();

    let listed: usize = listing.iter().map(|c| c.product_count).sum();
    assert_eq!(listed, qualifying);
    assert!(listing
        .iter()
        .flat_map(|c| &c.products)
        .all(|p| p.units_in_stock >= threshold));
}

#[tokio::test]
async fn above_cost_is_sorted_strict_and_repeatable() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    seed_sample_data(&db).await.unwrap();
    let threshold = Money::from_major(50);

    let first = db.products().list_products_above_cost(threshold).await.unwrap();
    let second = db.products().list_products_above_cost(threshold).await.unwrap();

    assert!(!first.is_empty());
    assert!(first.iter().all(|p| p.cost.map_or(false, |c| c > threshold)));
    assert!(first.windows(2).all(|w| w[0].cost >= w[1].cost));
    assert_eq!(first, second);
}

#[tokio::test]
async fn add_product_with_unknown_category_changes_nothing() {
    let (db, category_id) = db_with_category("Beverages").await;
    add(&db, category_id, "Chai", 1800, 39).await;
    let before = db.products().count().await.unwrap();

    let err = db
        .products()
        .add_product(&NewProduct::new(category_id + 100, "Ghost Tea", None))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::ConstraintViolation { .. }));
    assert_eq!(db.products().count().await.unwrap(), before);
}

#[tokio::test]
async fn delete_by_prefix_removes_matches_once() {
    let (db, category_id) = db_with_category("Confections").await;
    add(&db, category_id, "Chocolate", 500, 10).await;
    add(&db, category_id, "Chocolate Bar", 250, 10).await;
    add(&db, category_id, "Vanilla", 300, 10).await;

    let products = db.products();
    assert_eq!(products.delete_products_by_name_prefix("Choc").await.unwrap(), 2);
    assert_eq!(products.delete_products_by_name_prefix("Choc").await.unwrap(), 0);
    assert_eq!(products.count().await.unwrap(), 1);
}

#[tokio::test]
async fn increase_price_then_not_found() {
    let (db, category_id) = db_with_category("Hardware").await;
    let widget = add(&db, category_id, "Widget", 1000, 5).await;

    let products = db.products();
    let increased = products
        .increase_price_by_name_prefix("Widget", "5.00".parse().unwrap())
        .await
        .unwrap();

    assert!(increased.succeeded());
    let stored = products.get_by_id(widget).await.unwrap().unwrap();
    assert_eq!(stored.cost, Some(Money::from_cents(1500)));

    products.delete_products_by_name_prefix("Widget").await.unwrap();
    let err = products
        .increase_price_by_name_prefix("Widget", Money::from_major(5))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test]
async fn negative_stock_threshold_is_taken_literally() {
    let (db, category_id) = db_with_category("Dairy Products").await;
    add(&db, category_id, "Returned Brie", 900, -5).await;
    add(&db, category_id, "Spoiled Feta", 700, -6).await;
    add(&db, category_id, "Gouda", 1200, 0).await;
    add(&db, category_id, "Edam", 1100, 3).await;

    let listing = db
        .categories()
        .list_categories_filtered_by_stock(-5)
        .await
        .unwrap();

    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].product_count, 3);
    let names: Vec<&str> = listing[0]
        .products
        .iter()
        .map(|p| p.product_name.as_str())
        .collect();
    assert!(names.contains(&"Returned Brie"));
    assert!(!names.contains(&"Spoiled Feta"));
}

#[tokio::test]
async fn negative_cost_threshold_is_taken_literally() {
    let (db, category_id) = db_with_category("Samples").await;
    let free = add(&db, category_id, "Free Sample", 0, 10).await;
    let paid = add(&db, category_id, "Paid Sample", 100, 10).await;
    add(&db, category_id, "Refund Voucher", -50, 10).await;
    let uncosted = NewProduct::new(category_id, "Unpriced Sample", None);
    db.products().add_product(&uncosted).await.unwrap();

    let ids: Vec<i64> = db
        .products()
        .list_products_above_cost(Money::from_cents(-1))
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();

    // Strictly above -0.01, highest first; no cost never qualifies
    assert_eq!(ids, vec![paid, free]);
}

#[tokio::test]
async fn empty_prefix_deletes_every_product() {
    let (db, category_id) = db_with_category("Produce").await;
    add(&db, category_id, "Tofu", 2325, 35).await;
    add(&db, category_id, "Longlife Tofu", 1000, 4).await;

    let products = db.products();
    assert_eq!(products.delete_products_by_name_prefix("").await.unwrap(), 2);
    assert_eq!(products.count().await.unwrap(), 0);
}
