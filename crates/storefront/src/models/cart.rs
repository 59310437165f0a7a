//! Session-scoped shopping cart.
//!
//! The cart is a plain value object serialized into the client session; it
//! holds product IDs and requested quantities, nothing else. Resolving those
//! IDs against the catalog happens in [`crate::services::cart::CartService`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use lakkeriet_core::ProductId;

/// A shopping cart: product ID → requested quantity.
///
/// Backed by a `BTreeMap` so iteration (and therefore checkout line order
/// and the order-total sum) is deterministic, ascending by product ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: BTreeMap<ProductId, u32>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product, accumulating onto any existing
    /// entry. Quantities below 1 are coerced to 1; accumulation saturates
    /// at `u32::MAX` since the quantity comes straight from client input.
    ///
    /// The caller is responsible for checking that the product exists; the
    /// cart itself never talks to the catalog.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        let entry = self.items.entry(product_id).or_insert(0);
        *entry = entry.saturating_add(quantity.max(1));
    }

    /// Remove a product entirely. Removing an absent entry is a no-op.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.remove(&product_id);
    }

    /// Empty the cart. Called only after a successful checkout commit.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over entries in ascending product-ID order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.items.iter().map(|(id, qty)| (*id, *qty))
    }
}
