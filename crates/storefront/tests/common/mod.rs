//! Shared helpers for the integration suites.
//!
//! Every test gets its own in-memory `SQLite` database with the schema
//! applied. The pool is capped at one connection: each `sqlite::memory:`
//! connection is a separate empty database, so a larger pool would hand
//! out unmigrated ones.

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use lakkeriet_core::StockCode;
use lakkeriet_storefront::db::MIGRATOR;
use lakkeriet_storefront::models::product::NewProduct;

/// Create a migrated in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");

    MIGRATOR.run(&pool).await.expect("migrations");

    pool
}

/// Build a product with sensible defaults for seeding.
pub fn sample_product(sku: &str, price: f64, quantity_on_hand: i64) -> NewProduct {
    NewProduct {
        sku: StockCode::parse(sku).expect("valid sku"),
        ean: None,
        name: format!("Product {sku}"),
        description_no: String::new(),
        description_en: String::new(),
        category: None,
        weight: 0.0,
        quantity_on_hand,
        price,
        tax_rate: 25.0,
        brand: None,
        image_url: None,
    }
}
