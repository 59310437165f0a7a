//! Catalog product models.

use serde::{Deserialize, Serialize};

use lakkeriet_core::{ProductId, StockCode};

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Surrogate database ID, immutable.
    pub id: ProductId,
    /// Externally meaningful unique stock code.
    pub sku: StockCode,
    /// Optional secondary code (EAN), not unique-enforced.
    pub ean: Option<String>,
    pub name: String,
    /// Norwegian description (primary language).
    pub description_no: String,
    /// English description, auto-derived from the Norwegian one when absent.
    pub description_en: String,
    /// Free-text category used for faceted listing.
    pub category: Option<String>,
    pub weight: f64,
    /// Units in stock; never negative, checkout clamps the decrement.
    pub quantity_on_hand: i64,
    pub price: f64,
    pub tax_rate: f64,
    pub brand: Option<String>,
    pub image_url: Option<String>,
}

/// Field set for creating or fully replacing a product.
///
/// Used by admin create/update and by the importer's upsert: an upsert
/// overwrites every field, it does not merge.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub sku: StockCode,
    pub ean: Option<String>,
    pub name: String,
    pub description_no: String,
    pub description_en: String,
    pub category: Option<String>,
    pub weight: f64,
    pub quantity_on_hand: i64,
    pub price: f64,
    pub tax_rate: f64,
    pub brand: Option<String>,
    pub image_url: Option<String>,
}
