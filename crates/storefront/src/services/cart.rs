//! Cart resolution against the catalog.
//!
//! The [`Cart`](crate::models::Cart) only holds product IDs; this service
//! turns it into priced line items. It is the single resolution path: the
//! cart view and the checkout pipeline both go through [`CartService::snapshot`],
//! so they agree on which entries count and in what order.

use std::collections::HashMap;

use sqlx::SqlitePool;

use lakkeriet_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::models::cart::Cart;
use crate::models::product::Product;

/// One resolved cart entry.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    /// `product.price * quantity`.
    pub subtotal: f64,
}

/// A cart resolved against the catalog at one point in time.
#[derive(Debug, Clone, Default)]
pub struct CartSnapshot {
    /// Resolved items, ascending by product ID.
    pub items: Vec<CartItem>,
    /// Sum of subtotals, in item order.
    pub total: f64,
}

impl CartSnapshot {
    /// Whether the snapshot resolved to no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Service resolving carts against the product catalog.
pub struct CartService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// Resolve every cart entry against the catalog.
    ///
    /// All entries resolve through one `get_many` query; those whose
    /// product no longer exists are silently excluded from the snapshot.
    /// The cart itself is left untouched, so such entries simply stop
    /// contributing to views and totals.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the lookup fails.
    pub async fn snapshot(&self, cart: &Cart) -> Result<CartSnapshot, RepositoryError> {
        let ids: Vec<ProductId> = cart.iter().map(|(id, _)| id).collect();
        let mut found: HashMap<ProductId, Product> = self
            .products
            .get_many(&ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let mut items = Vec::with_capacity(found.len());
        let mut total = 0.0;

        for (product_id, quantity) in cart.iter() {
            let Some(product) = found.remove(&product_id) else {
                continue;
            };

            let subtotal = product.price * f64::from(quantity);
            total += subtotal;
            items.push(CartItem {
                product,
                quantity,
                subtotal,
            });
        }

        Ok(CartSnapshot { items, total })
    }
}
