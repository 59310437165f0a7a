//! Integration tests for the checkout pipeline.
//!
//! Exercises cart resolution, the order total invariant, clamped stock
//! decrements and guest versus authenticated attribution against an
//! in-memory database.

mod common;

use lakkeriet_storefront::db::{OrderRepository, ProductRepository, UserRepository};
use lakkeriet_storefront::models::cart::Cart;
use lakkeriet_storefront::services::auth::hash_password;
use lakkeriet_storefront::services::cart::CartService;
use lakkeriet_storefront::services::checkout::{CheckoutError, CheckoutService};

use common::{sample_product, test_pool};

// =============================================================================
// Order Totals
// =============================================================================

#[tokio::test]
async fn test_order_total_matches_lines() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let polish = products
        .create(&sample_product("LAK-001", 129.0, 10))
        .await
        .expect("create");
    let remover = products
        .create(&sample_product("LAK-002", 59.5, 10))
        .await
        .expect("create");

    let mut cart = Cart::new();
    cart.add(polish.id, 3);
    cart.add(remover.id, 2);

    let (order, lines) = CheckoutService::new(&pool, "NOK")
        .place_order(&cart, "card", "mail", None)
        .await
        .expect("checkout");

    assert_eq!(lines.len(), 2);
    let line_sum: f64 = lines
        .iter()
        .map(|l| l.unit_price * l.quantity as f64)
        .sum();
    assert!((order.total_amount - line_sum).abs() < f64::EPSILON);
    assert!((order.total_amount - (129.0 * 3.0 + 59.5 * 2.0)).abs() < f64::EPSILON);
    assert_eq!(order.currency, "NOK");
}

#[tokio::test]
async fn test_lines_snapshot_price_and_follow_cart_order() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let first = products
        .create(&sample_product("LAK-010", 100.0, 5))
        .await
        .expect("create");
    let second = products
        .create(&sample_product("LAK-011", 50.0, 5))
        .await
        .expect("create");

    // Insertion order deliberately reversed; lines come out in ascending
    // product-id order regardless.
    let mut cart = Cart::new();
    cart.add(second.id, 1);
    cart.add(first.id, 2);

    let (_, lines) = CheckoutService::new(&pool, "NOK")
        .place_order(&cart, "card", "pickup", None)
        .await
        .expect("checkout");

    assert_eq!(lines[0].product_id, first.id);
    assert_eq!(lines[0].quantity, 2);
    assert!((lines[0].unit_price - 100.0).abs() < f64::EPSILON);
    assert_eq!(lines[1].product_id, second.id);
}

// =============================================================================
// Stock Decrements
// =============================================================================

#[tokio::test]
async fn test_stock_decrements_and_clamps_at_zero() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let plenty = products
        .create(&sample_product("LAK-020", 100.0, 3))
        .await
        .expect("create");
    let scarce = products
        .create(&sample_product("LAK-021", 50.0, 1))
        .await
        .expect("create");

    let mut cart = Cart::new();
    cart.add(plenty.id, 2);
    cart.add(scarce.id, 5);

    let (order, _) = CheckoutService::new(&pool, "NOK")
        .place_order(&cart, "card", "mail", None)
        .await
        .expect("checkout");

    // Oversell is permitted; the order records what was asked for.
    assert!((order.total_amount - (100.0 * 2.0 + 50.0 * 5.0)).abs() < f64::EPSILON);

    let plenty = products.get_by_id(plenty.id).await.expect("get").expect("some");
    let scarce = products.get_by_id(scarce.id).await.expect("get").expect("some");
    assert_eq!(plenty.quantity_on_hand, 1);
    assert_eq!(scarce.quantity_on_hand, 0);
}

#[tokio::test]
async fn test_checkout_against_an_empty_shelf() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let stocked = products
        .create(&sample_product("LAK-025", 100.0, 5))
        .await
        .expect("create");
    let sold_out = products
        .create(&sample_product("LAK-026", 50.0, 0))
        .await
        .expect("create");

    let mut cart = Cart::new();
    cart.add(stocked.id, 2);
    cart.add(sold_out.id, 1);

    let (order, lines) = CheckoutService::new(&pool, "NOK")
        .place_order(&cart, "card", "mail", None)
        .await
        .expect("checkout");

    assert!((order.total_amount - 250.0).abs() < f64::EPSILON);
    assert_eq!(lines.len(), 2);

    let stocked = products.get_by_id(stocked.id).await.expect("get").expect("some");
    let sold_out = products.get_by_id(sold_out.id).await.expect("get").expect("some");
    assert_eq!(stocked.quantity_on_hand, 3);
    assert_eq!(sold_out.quantity_on_hand, 0);
}

// =============================================================================
// Empty and Stale Carts
// =============================================================================

#[tokio::test]
async fn test_empty_cart_creates_nothing() {
    let pool = test_pool().await;

    let result = CheckoutService::new(&pool, "NOK")
        .place_order(&Cart::new(), "card", "mail", None)
        .await;

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert_eq!(OrderRepository::new(&pool).count().await.expect("count"), 0);
}

#[tokio::test]
async fn test_cart_of_only_vanished_products_is_empty() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let product = products
        .create(&sample_product("LAK-030", 80.0, 4))
        .await
        .expect("create");

    let mut cart = Cart::new();
    cart.add(product.id, 1);

    assert!(products.delete(product.id).await.expect("delete"));

    // The snapshot silently drops the stale entry...
    let snapshot = CartService::new(&pool).snapshot(&cart).await.expect("snapshot");
    assert!(snapshot.is_empty());

    // ...and checkout treats the cart as empty.
    let result = CheckoutService::new(&pool, "NOK")
        .place_order(&cart, "card", "mail", None)
        .await;
    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
}

// =============================================================================
// Attribution
// =============================================================================

#[tokio::test]
async fn test_guest_and_user_attribution() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);
    let users = UserRepository::new(&pool);

    let product = products
        .create(&sample_product("LAK-040", 99.0, 10))
        .await
        .expect("create");

    let email = lakkeriet_core::Email::parse("kari@example.com").expect("email");
    let hash = hash_password("passord123").expect("hash");
    let user = users.create(&email, &hash, false).await.expect("user");

    let mut cart = Cart::new();
    cart.add(product.id, 1);

    let checkout = CheckoutService::new(&pool, "NOK");

    let (guest_order, _) = checkout
        .place_order(&cart, "card", "mail", None)
        .await
        .expect("guest checkout");
    assert_eq!(guest_order.user_id, None);

    let (user_order, _) = checkout
        .place_order(&cart, "card", "mail", Some(user.id))
        .await
        .expect("user checkout");
    assert_eq!(user_order.user_id, Some(user.id));
}

#[tokio::test]
async fn test_order_lines_survive_product_deletion() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);
    let orders = OrderRepository::new(&pool);

    let product = products
        .create(&sample_product("LAK-050", 120.0, 2))
        .await
        .expect("create");

    let mut cart = Cart::new();
    cart.add(product.id, 1);

    let (order, _) = CheckoutService::new(&pool, "NOK")
        .place_order(&cart, "card", "mail", None)
        .await
        .expect("checkout");

    assert!(products.delete(product.id).await.expect("delete"));

    let (fetched, lines) = orders
        .get_with_lines(order.id)
        .await
        .expect("get")
        .expect("some");
    assert_eq!(fetched.id, order.id);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_id, product.id);
    assert!((lines[0].unit_price - 120.0).abs() < f64::EPSILON);
}
