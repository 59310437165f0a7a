//! Product repository for catalog database operations.

use sqlx::SqlitePool;

use lakkeriet_core::{ProductId, StockCode};

use super::RepositoryError;
use crate::models::product::{NewProduct, Product};

/// Database row for a product.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    sku: String,
    ean: Option<String>,
    name: String,
    description_no: String,
    description_en: String,
    category: Option<String>,
    weight: f64,
    quantity_on_hand: i64,
    price: f64,
    tax_rate: f64,
    brand: Option<String>,
    image_url: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let sku = StockCode::parse(&row.sku).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid stock code in database: {e}"))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            sku,
            ean: row.ean,
            name: row.name,
            description_no: row.description_no,
            description_en: row.description_en,
            category: row.category,
            weight: row.weight,
            quantity_on_hand: row.quantity_on_hand,
            price: row.price,
            tax_rate: row.tax_rate,
            brand: row.brand,
            image_url: row.image_url,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, sku, ean, name, description_no, description_en, category, \
                               weight, quantity_on_hand, price, tax_rate, brand, image_url";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Get a product by its stock code.
    ///
    /// Returns `None` when absent; callers use this for existence checks.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_sku(&self, sku: &StockCode) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = ?"
        ))
        .bind(sku.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Fetch the products for a set of IDs, in ascending ID order.
    ///
    /// IDs with no matching row are simply absent from the result; the
    /// caller decides what a missing product means.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id IN ({placeholders}) ORDER BY id"
        );

        let mut query = sqlx::query_as::<_, ProductRow>(&sql);
        for id in ids {
            query = query.bind(id.as_i64());
        }

        let rows = query.fetch_all(self.pool).await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    /// List products, optionally restricted to one category.
    ///
    /// The category filter is a case-sensitive exact match. Results come
    /// back in ascending ID order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let rows = match category {
            Some(category) => {
                sqlx::query_as::<_, ProductRow>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE category = ? ORDER BY id"
                ))
                .bind(category)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProductRow>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Distinct non-empty categories, sorted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn distinct_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let categories = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM products \
             WHERE category IS NOT NULL AND category != '' \
             ORDER BY category",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the sku already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO products \
             (sku, ean, name, description_no, description_en, category, weight, \
              quantity_on_hand, price, tax_rate, brand, image_url) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING id",
        )
        .bind(product.sku.as_str())
        .bind(&product.ean)
        .bind(&product.name)
        .bind(&product.description_no)
        .bind(&product.description_en)
        .bind(&product.category)
        .bind(product.weight)
        .bind(product.quantity_on_hand)
        .bind(product.price)
        .bind(product.tax_rate)
        .bind(&product.brand)
        .bind(&product.image_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("sku already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        self.get_by_id(ProductId::new(id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Fully replace a product's fields by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new sku collides.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET \
             sku = ?, ean = ?, name = ?, description_no = ?, description_en = ?, \
             category = ?, weight = ?, quantity_on_hand = ?, price = ?, tax_rate = ?, \
             brand = ?, image_url = ? \
             WHERE id = ?",
        )
        .bind(product.sku.as_str())
        .bind(&product.ean)
        .bind(&product.name)
        .bind(&product.description_no)
        .bind(&product.description_en)
        .bind(&product.category)
        .bind(product.weight)
        .bind(product.quantity_on_hand)
        .bind(product.price)
        .bind(product.tax_rate)
        .bind(&product.brand)
        .bind(&product.image_url)
        .bind(id.as_i64())
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("sku already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a product by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Upsert a batch of products by stock code inside one transaction.
    ///
    /// An existing row with the same sku is fully replaced, otherwise a new
    /// product is inserted. Either the whole batch commits or none of it
    /// does.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction is rolled back and no rows are visible.
    pub async fn upsert_batch(&self, products: &[NewProduct]) -> Result<usize, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for product in products {
            let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM products WHERE sku = ?")
                .bind(product.sku.as_str())
                .fetch_optional(&mut *tx)
                .await?;

            match existing {
                Some(id) => {
                    sqlx::query(
                        "UPDATE products SET \
                         sku = ?, ean = ?, name = ?, description_no = ?, description_en = ?, \
                         category = ?, weight = ?, quantity_on_hand = ?, price = ?, \
                         tax_rate = ?, brand = ?, image_url = ? \
                         WHERE id = ?",
                    )
                    .bind(product.sku.as_str())
                    .bind(&product.ean)
                    .bind(&product.name)
                    .bind(&product.description_no)
                    .bind(&product.description_en)
                    .bind(&product.category)
                    .bind(product.weight)
                    .bind(product.quantity_on_hand)
                    .bind(product.price)
                    .bind(product.tax_rate)
                    .bind(&product.brand)
                    .bind(&product.image_url)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                }
                None => {
                    sqlx::query(
                        "INSERT INTO products \
                         (sku, ean, name, description_no, description_en, category, weight, \
                          quantity_on_hand, price, tax_rate, brand, image_url) \
                         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                    )
                    .bind(product.sku.as_str())
                    .bind(&product.ean)
                    .bind(&product.name)
                    .bind(&product.description_no)
                    .bind(&product.description_en)
                    .bind(&product.category)
                    .bind(product.weight)
                    .bind(product.quantity_on_hand)
                    .bind(product.price)
                    .bind(product.tax_rate)
                    .bind(&product.brand)
                    .bind(&product.image_url)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;

        Ok(products.len())
    }
}
