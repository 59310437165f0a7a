//! Integration tests for the product repository and cart resolution.

mod common;

use lakkeriet_core::{ProductId, StockCode};
use lakkeriet_storefront::db::{ProductRepository, RepositoryError};
use lakkeriet_storefront::models::cart::Cart;
use lakkeriet_storefront::models::product::NewProduct;
use lakkeriet_storefront::services::cart::CartService;

use common::{sample_product, test_pool};

fn with_category(sku: &str, category: &str) -> NewProduct {
    NewProduct {
        category: Some(category.to_owned()),
        ..sample_product(sku, 100.0, 10)
    }
}

// =============================================================================
// Listing and Categories
// =============================================================================

#[tokio::test]
async fn test_list_orders_by_id_and_filters_by_category() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    products.create(&with_category("LAK-200", "Neglelakk")).await.expect("create");
    products.create(&with_category("LAK-201", "Tilbehør")).await.expect("create");
    products.create(&with_category("LAK-202", "Neglelakk")).await.expect("create");

    let all = products.list(None).await.expect("list");
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));

    let polish = products.list(Some("Neglelakk")).await.expect("list");
    assert_eq!(polish.len(), 2);
    assert!(polish.iter().all(|p| p.category.as_deref() == Some("Neglelakk")));

    let none = products.list(Some("Finnes ikke")).await.expect("list");
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_distinct_categories_skip_missing_and_empty() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    products.create(&with_category("LAK-210", "Neglelakk")).await.expect("create");
    products.create(&with_category("LAK-211", "Neglelakk")).await.expect("create");
    products.create(&sample_product("LAK-212", 50.0, 1)).await.expect("create");
    products
        .create(&NewProduct {
            category: Some(String::new()),
            ..sample_product("LAK-213", 50.0, 1)
        })
        .await
        .expect("create");

    let categories = products.distinct_categories().await.expect("categories");
    assert_eq!(categories, vec!["Neglelakk".to_owned()]);
}

// =============================================================================
// Create, Update, Delete
// =============================================================================

#[tokio::test]
async fn test_duplicate_sku_is_a_conflict() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    products.create(&sample_product("LAK-220", 100.0, 5)).await.expect("create");

    let result = products.create(&sample_product("LAK-220", 200.0, 1)).await;
    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let product = products
        .create(&with_category("LAK-230", "Neglelakk"))
        .await
        .expect("create");

    let replacement = NewProduct {
        name: "Ny Navn".to_owned(),
        price: 159.0,
        category: None,
        ..sample_product("LAK-230", 159.0, 7)
    };
    products.update(product.id, &replacement).await.expect("update");

    let updated = products.get_by_id(product.id).await.expect("get").expect("some");
    assert_eq!(updated.name, "Ny Navn");
    assert_eq!(updated.category, None);
    assert_eq!(updated.quantity_on_hand, 7);
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let pool = test_pool().await;

    let result = ProductRepository::new(&pool)
        .update(ProductId::new(9999), &sample_product("LAK-240", 10.0, 1))
        .await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_delete_reports_whether_a_row_went_away() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let product = products.create(&sample_product("LAK-250", 10.0, 1)).await.expect("create");

    assert!(products.delete(product.id).await.expect("delete"));
    assert!(!products.delete(product.id).await.expect("delete again"));
    assert!(products.get_by_id(product.id).await.expect("get").is_none());
}

#[tokio::test]
async fn test_get_many_returns_existing_rows_ascending() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let first = products.create(&sample_product("LAK-255", 10.0, 1)).await.expect("create");
    let second = products.create(&sample_product("LAK-256", 20.0, 1)).await.expect("create");
    let third = products.create(&sample_product("LAK-257", 30.0, 1)).await.expect("create");

    // Request out of order, with one ID that matches nothing.
    let found = products
        .get_many(&[third.id, ProductId::new(9999), first.id])
        .await
        .expect("get_many");

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].id, first.id);
    assert_eq!(found[1].id, third.id);
    assert!(found.iter().all(|p| p.id != second.id));

    assert!(products.get_many(&[]).await.expect("empty").is_empty());
}

// =============================================================================
// Cart Resolution
// =============================================================================

#[tokio::test]
async fn test_snapshot_resolves_current_prices() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let polish = products.create(&sample_product("LAK-260", 129.0, 10)).await.expect("create");
    let topcoat = products.create(&sample_product("LAK-261", 89.0, 10)).await.expect("create");

    let mut cart = Cart::new();
    cart.add(polish.id, 2);
    cart.add(topcoat.id, 1);

    let snapshot = CartService::new(&pool).snapshot(&cart).await.expect("snapshot");

    assert!(!snapshot.is_empty());
    assert_eq!(snapshot.items.len(), 2);
    assert!((snapshot.total - (129.0 * 2.0 + 89.0)).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_snapshot_silently_drops_vanished_products() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let kept = products.create(&sample_product("LAK-270", 50.0, 5)).await.expect("create");
    let gone = products.create(&sample_product("LAK-271", 75.0, 5)).await.expect("create");

    let mut cart = Cart::new();
    cart.add(kept.id, 1);
    cart.add(gone.id, 3);

    assert!(products.delete(gone.id).await.expect("delete"));

    let snapshot = CartService::new(&pool).snapshot(&cart).await.expect("snapshot");

    // The stale entry drops out of the view; the cart itself is untouched.
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].product.id, kept.id);
    assert!((snapshot.total - 50.0).abs() < f64::EPSILON);
    assert_eq!(cart.len(), 2);
}

#[tokio::test]
async fn test_get_by_sku_roundtrip() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let created = products.create(&sample_product("LAK-280", 42.0, 3)).await.expect("create");

    let fetched = products
        .get_by_sku(&StockCode::parse("LAK-280").expect("sku"))
        .await
        .expect("get")
        .expect("some");

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.sku.as_str(), "LAK-280");
}
