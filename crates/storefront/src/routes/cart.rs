//! Cart route handlers.
//!
//! The cart lives in the session; every view resolves it against the
//! catalog through the shared snapshot path, so entries for products that
//! have since been deleted silently drop out of the displayed items and
//! totals.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use lakkeriet_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::{Cart, session_keys};
use crate::services::cart::{CartService, CartSnapshot};
use crate::state::AppState;

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: i64,
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
    pub image_url: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: f64,
    pub item_count: u32,
}

impl From<CartSnapshot> for CartView {
    fn from(snapshot: CartSnapshot) -> Self {
        let item_count = snapshot.items.iter().map(|item| item.quantity).sum();
        Self {
            items: snapshot
                .items
                .into_iter()
                .map(|item| CartItemView {
                    product_id: item.product.id.as_i64(),
                    sku: item.product.sku.into_inner(),
                    name: item.product.name,
                    quantity: item.quantity,
                    unit_price: item.product.price,
                    subtotal: item.subtotal,
                    image_url: item.product.image_url,
                })
                .collect(),
            total: snapshot.total,
            item_count,
        }
    }
}

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub product_id: i64,
    /// Defaults to 1 when unspecified.
    pub quantity: Option<u32>,
}

/// Request body for removing a product from the cart.
#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    pub product_id: i64,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, defaulting to an empty one.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns `AppError::Internal` if the session cannot be modified.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))
}

/// Drop the cart from the session after a successful checkout.
///
/// # Errors
///
/// Returns `AppError::Internal` if the session cannot be modified.
pub async fn clear_cart(session: &Session) -> Result<()> {
    session
        .remove::<Cart>(session_keys::CART)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /cart` - View the resolved cart.
pub async fn view(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await;
    let snapshot = CartService::new(state.pool()).snapshot(&cart).await?;
    Ok(Json(CartView::from(snapshot)))
}

/// `POST /cart/add` - Add a product to the cart.
///
/// The product must exist in the catalog; the quantity accumulates onto
/// any existing entry.
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddRequest>,
) -> Result<Json<CartView>> {
    let product_id = ProductId::new(request.product_id);

    ProductRepository::new(state.pool())
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let mut cart = load_cart(&session).await;
    cart.add(product_id, request.quantity.unwrap_or(1));
    save_cart(&session, &cart).await?;

    let snapshot = CartService::new(state.pool()).snapshot(&cart).await?;
    Ok(Json(CartView::from(snapshot)))
}

/// `POST /cart/remove` - Remove a product from the cart.
///
/// Removing a product that is not in the cart is a no-op, not an error.
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RemoveRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await;
    cart.remove(ProductId::new(request.product_id));
    save_cart(&session, &cart).await?;

    let snapshot = CartService::new(state.pool()).snapshot(&cart).await?;
    Ok(Json(CartView::from(snapshot)))
}
