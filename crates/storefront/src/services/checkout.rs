//! Checkout pipeline: cart snapshot → persisted order.
//!
//! No payment is processed here; a successful checkout means "order
//! recorded". Payment-provider integration is deliberately left to an
//! external collaborator.

use sqlx::SqlitePool;
use thiserror::Error;

use lakkeriet_core::UserId;

use crate::db::{OrderRepository, RepositoryError};
use crate::models::cart::Cart;
use crate::models::order::{NewOrder, NewOrderLine, Order, OrderLine};
use crate::services::cart::CartService;

/// Errors from the checkout pipeline.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart resolved to no orderable items; nothing was written.
    #[error("cart is empty")]
    EmptyCart,

    /// Storage failure; the transaction rolled back completely and the
    /// cart is untouched, so the checkout is safely retryable.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Service converting carts into persisted orders.
pub struct CheckoutService<'a> {
    pool: &'a SqlitePool,
    currency: String,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service stamping `currency` onto orders.
    #[must_use]
    pub fn new(pool: &'a SqlitePool, currency: impl Into<String>) -> Self {
        Self {
            pool,
            currency: currency.into(),
        }
    }

    /// Place an order from the cart's current contents.
    ///
    /// Resolves the cart through the shared snapshot path (entries for
    /// vanished products drop out), computes the total as the sum of
    /// `price * quantity` in snapshot order, then commits the order header,
    /// one line per resolved item (capturing the current price as the
    /// line's unit price), and the clamped stock decrements as one atomic
    /// unit.
    ///
    /// The caller clears the session cart only after this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if nothing resolves; no order is
    /// created. Returns `CheckoutError::Repository` on storage failure; the
    /// transaction rolls back fully.
    pub async fn place_order(
        &self,
        cart: &Cart,
        payment_method: &str,
        shipping_method: &str,
        user_id: Option<UserId>,
    ) -> Result<(Order, Vec<OrderLine>), CheckoutError> {
        let snapshot = CartService::new(self.pool).snapshot(cart).await?;

        if snapshot.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let new_order = NewOrder {
            user_id,
            payment_method: payment_method.to_owned(),
            shipping_method: shipping_method.to_owned(),
            total_amount: snapshot.total,
            currency: self.currency.clone(),
        };

        let lines: Vec<NewOrderLine> = snapshot
            .items
            .iter()
            .map(|item| NewOrderLine {
                product_id: item.product.id,
                quantity: i64::from(item.quantity),
                unit_price: item.product.price,
            })
            .collect();

        let (order, lines) = OrderRepository::new(self.pool)
            .create_with_lines(&new_order, &lines)
            .await?;

        tracing::info!(
            order_id = %order.id,
            total = order.total_amount,
            lines = lines.len(),
            "order placed"
        );

        Ok((order, lines))
    }
}
