//! Admin route handlers.
//!
//! Every handler takes `RequireAdmin`, so a request without an admin
//! session never reaches the body (401 for anonymous, 403 for
//! non-admins).

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use lakkeriet_core::{ProductId, StockCode};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::product::NewProduct;
use crate::routes::products::ProductView;
use crate::services::import::{ImportService, ImportSummary};
use crate::services::translate::translate;
use crate::state::AppState;

/// Full field set for creating or replacing a product.
///
/// `description_en` may be omitted; it is then derived from the Norwegian
/// description through the translation seam.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub sku: String,
    #[serde(default)]
    pub ean: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description_no: String,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub quantity_on_hand: i64,
    pub price: f64,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProductForm {
    fn into_new_product(self) -> Result<NewProduct> {
        let sku = StockCode::parse(&self.sku)
            .map_err(|e| AppError::BadRequest(format!("invalid sku: {e}")))?;

        let description_en = match self.description_en {
            Some(text) if !text.trim().is_empty() => text,
            _ => translate(&self.description_no),
        };

        Ok(NewProduct {
            sku,
            ean: self.ean,
            name: self.name,
            description_no: self.description_no,
            description_en,
            category: self.category,
            weight: self.weight,
            quantity_on_hand: self.quantity_on_hand,
            price: self.price,
            tax_rate: self.tax_rate,
            brand: self.brand,
            image_url: self.image_url,
        })
    }
}

/// `GET /admin/products` - List the full catalog.
pub async fn list_products(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductView>>> {
    let products = ProductRepository::new(state.pool()).list(None).await?;

    Ok(Json(products.into_iter().map(ProductView::from).collect()))
}

/// `POST /admin/products` - Create a product.
pub async fn create_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<ProductView>)> {
    let new_product = form.into_new_product()?;

    let product = ProductRepository::new(state.pool())
        .create(&new_product)
        .await?;

    tracing::info!(product_id = %product.id, admin = %admin.email, "product created");

    Ok((StatusCode::CREATED, Json(ProductView::from(product))))
}

/// `GET /admin/products/{id}` - Fetch one product.
pub async fn get_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductView>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".to_owned()))?;

    Ok(Json(ProductView::from(product)))
}

/// `PUT /admin/products/{id}` - Fully replace a product.
pub async fn update_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<ProductForm>,
) -> Result<Json<ProductView>> {
    let id = ProductId::new(id);
    let new_product = form.into_new_product()?;

    let repo = ProductRepository::new(state.pool());
    repo.update(id, &new_product).await?;

    let product = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".to_owned()))?;

    tracing::info!(product_id = %id, admin = %admin.email, "product updated");

    Ok(Json(ProductView::from(product)))
}

/// `DELETE /admin/products/{id}` - Delete a product.
///
/// Past order lines keep their copy of the product data, so deleting
/// here never touches order history.
pub async fn delete_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let deleted = ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound("product not found".to_owned()));
    }

    tracing::info!(product_id = id, admin = %admin.email, "product deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/import` - Upload a product feed and run one import batch.
///
/// Expects a multipart request with a `file` field holding the
/// semicolon-delimited feed.
pub async fn import_feed(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>> {
    let mut feed: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart request: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
            feed = Some(bytes.to_vec());
        }
    }

    let feed = feed.ok_or_else(|| AppError::BadRequest("missing 'file' field".to_owned()))?;

    tracing::info!(bytes = feed.len(), admin = %admin.email, "feed upload received");

    let summary = ImportService::new(state.pool()).import(&feed).await?;

    Ok(Json(summary))
}
