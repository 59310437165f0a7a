//! Order repository for database operations.
//!
//! Order creation is the one multi-statement write in the system: the order
//! header, its lines, and the stock decrements must land together or not at
//! all, so they run inside a single transaction.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use lakkeriet_core::{OrderId, OrderLineId, ProductId, UserId};

use super::RepositoryError;
use crate::models::order::{NewOrder, NewOrderLine, Order, OrderLine};

/// Database row for an order header.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: Option<i64>,
    payment_method: String,
    shipping_method: String,
    total_amount: f64,
    currency: String,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            user_id: row.user_id.map(UserId::new),
            payment_method: row.payment_method,
            shipping_method: row.shipping_method,
            total_amount: row.total_amount,
            currency: row.currency,
            created_at: row.created_at,
        }
    }
}

/// Database row for an order line.
#[derive(sqlx::FromRow)]
struct OrderLineRow {
    id: i64,
    order_id: i64,
    product_id: i64,
    quantity: i64,
    unit_price: f64,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        Self {
            id: OrderLineId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an order with its lines and decrement stock, atomically.
    ///
    /// For every line the referenced product's `quantity_on_hand` is
    /// decremented, clamped at zero: ordering more units than are in stock
    /// empties the shelf but never fails (oversell is permitted).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction rolls back and neither the order, its lines, nor any
    /// stock change is observable.
    pub async fn create_with_lines(
        &self,
        order: &NewOrder,
        lines: &[NewOrderLine],
    ) -> Result<(Order, Vec<OrderLine>), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query_as::<_, OrderRow>(
            "INSERT INTO orders (user_id, payment_method, shipping_method, total_amount, currency) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, user_id, payment_method, shipping_method, total_amount, currency, \
                       created_at",
        )
        .bind(order.user_id.map(|id| id.as_i64()))
        .bind(&order.payment_method)
        .bind(&order.shipping_method)
        .bind(order.total_amount)
        .bind(&order.currency)
        .fetch_one(&mut *tx)
        .await?;

        let order_id = OrderId::new(order_row.id);
        let mut created_lines = Vec::with_capacity(lines.len());

        for line in lines {
            let line_row = sqlx::query_as::<_, OrderLineRow>(
                "INSERT INTO order_lines (order_id, product_id, quantity, unit_price) \
                 VALUES (?, ?, ?, ?) \
                 RETURNING id, order_id, product_id, quantity, unit_price",
            )
            .bind(order_id.as_i64())
            .bind(line.product_id.as_i64())
            .bind(line.quantity)
            .bind(line.unit_price)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                "UPDATE products SET quantity_on_hand = MAX(0, quantity_on_hand - ?) WHERE id = ?",
            )
            .bind(line.quantity)
            .bind(line.product_id.as_i64())
            .execute(&mut *tx)
            .await?;

            created_lines.push(OrderLine::from(line_row));
        }

        tx.commit().await?;

        Ok((Order::from(order_row), created_lines))
    }

    /// Get an order with its lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_with_lines(
        &self,
        id: OrderId,
    ) -> Result<Option<(Order, Vec<OrderLine>)>, RepositoryError> {
        let order = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, payment_method, shipping_method, total_amount, currency, \
                    created_at \
             FROM orders WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, OrderLineRow>(
            "SELECT id, order_id, product_id, quantity, unit_price \
             FROM order_lines WHERE order_id = ? ORDER BY id",
        )
        .bind(id.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(Some((
            Order::from(order),
            lines.into_iter().map(OrderLine::from).collect(),
        )))
    }

    /// Count orders in the store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
