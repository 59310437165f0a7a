//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use lakkeriet_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::product::Product;
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: i64,
    pub sku: String,
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

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.as_i64(),
            sku: product.sku.into_inner(),
            ean: product.ean,
            name: product.name,
            description_no: product.description_no,
            description_en: product.description_en,
            category: product.category,
            weight: product.weight,
            quantity_on_hand: product.quantity_on_hand,
            price: product.price,
            tax_rate: product.tax_rate,
            brand: product.brand,
            image_url: product.image_url,
        }
    }
}

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Exact-match category filter.
    pub category: Option<String>,
}

/// Product listing response with the available categories for faceting.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub products: Vec<ProductView>,
    pub categories: Vec<String>,
}

/// `GET /products` - List products, optionally filtered by category.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>> {
    let repo = ProductRepository::new(state.pool());

    let products = repo.list(query.category.as_deref()).await?;
    let categories = repo.distinct_categories().await?;

    Ok(Json(ListResponse {
        products: products.into_iter().map(ProductView::from).collect(),
        categories,
    }))
}

/// `GET /products/{id}` - Fetch one product.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductView>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ProductView::from(product)))
}
