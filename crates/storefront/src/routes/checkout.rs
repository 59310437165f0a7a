//! Checkout route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::routes::cart::{clear_cart, load_cart};
use crate::services::checkout::CheckoutService;
use crate::state::AppState;

/// Request body for placing an order.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub payment_method: String,
    pub shipping_method: String,
}

/// Order confirmation returned on success.
///
/// No payment has been captured at this point; the order is recorded and
/// awaits an external payment provider (card, Klarna, Vipps).
#[derive(Debug, Serialize)]
pub struct OrderConfirmation {
    pub order_id: i64,
    pub total_amount: f64,
    pub currency: String,
    pub line_count: usize,
}

/// `POST /checkout` - Place an order from the session cart.
///
/// Guests may check out; when a user is logged in the order is attributed
/// to them. The cart is cleared only after the order has committed.
pub async fn place_order(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<OrderConfirmation>> {
    let cart = load_cart(&session).await;

    let (order, lines) = CheckoutService::new(state.pool(), state.config().currency.as_str())
        .place_order(
            &cart,
            &request.payment_method,
            &request.shipping_method,
            user.map(|u| u.id),
        )
        .await?;

    clear_cart(&session).await?;

    Ok(Json(OrderConfirmation {
        order_id: order.id.as_i64(),
        total_amount: order.total_amount,
        currency: order.currency,
        line_count: lines.len(),
    }))
}
