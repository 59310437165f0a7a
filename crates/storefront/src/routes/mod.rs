//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check
//!
//! # Catalog
//! GET  /products                - Product listing (?category= filter)
//! GET  /products/{id}           - Product detail
//!
//! # Cart
//! GET  /cart                    - Resolved cart view
//! POST /cart/add                - Add a product (quantity defaults to 1)
//! POST /cart/remove             - Remove a product (idempotent)
//!
//! # Checkout
//! POST /checkout                - Place an order from the cart
//!
//! # Auth
//! POST /auth/register           - Create an account
//! POST /auth/login              - Log in
//! POST /auth/logout             - Log out
//!
//! # Admin (requires admin login)
//! GET    /admin/products        - List all products
//! POST   /admin/products        - Create a product
//! GET    /admin/products/{id}   - Fetch one product
//! PUT    /admin/products/{id}   - Fully replace a product
//! DELETE /admin/products/{id}   - Delete a product
//! POST   /admin/import          - Upload and import a product feed
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the storefront routes router.
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(products::list))
        .route("/products/{id}", get(products::detail))
        .route("/cart", get(cart::view))
        .route("/cart/add", post(cart::add))
        .route("/cart/remove", post(cart::remove))
        .route("/checkout", post(checkout::place_order))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/products/{id}",
            get(admin::get_product)
                .put(admin::update_product)
                .delete(admin::delete_product),
        )
        .route("/import", post(admin::import_feed))
}

/// Assemble the full application router (without layers).
pub fn router() -> Router<AppState> {
    storefront_routes()
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}
