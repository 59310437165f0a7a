//! Order models.
//!
//! Orders and their lines are written once at checkout and never mutated.
//! Each line captures the product's price at purchase time, so later catalog
//! edits do not rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lakkeriet_core::{OrderId, OrderLineId, ProductId, UserId};

/// A persisted order header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The buyer, when authenticated; `None` for guest checkout.
    pub user_id: Option<UserId>,
    pub payment_method: String,
    pub shipping_method: String,
    /// Sum of `quantity * unit_price` over the order's lines.
    pub total_amount: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// A single line of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    /// Price snapshot taken at purchase time.
    pub unit_price: f64,
}

/// Field set for creating an order header.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<UserId>,
    pub payment_method: String,
    pub shipping_method: String,
    pub total_amount: f64,
    pub currency: String,
}

/// Field set for creating an order line.
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: f64,
}
