//! Bulk catalog import from delimited feeds.
//!
//! The feed is semicolon-delimited UTF-8 (a byte-order mark is tolerated)
//! with a header row naming the fields
//! `sku;EAN;name;description;category;weight;qty;price;tax;brand;images`.
//!
//! Rows are processed independently: a malformed or code-less row is
//! counted, logged with its contents, and skipped — it never aborts the
//! rest of the batch. Everything that survives normalization is upserted
//! by stock code in one transaction, so the batch becomes visible all at
//! once or not at all.

pub mod normalize;

use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::{ProductRepository, RepositoryError};

pub use normalize::{FeedRow, RowSkip, clean_html, normalize, to_f64, to_i64};

/// UTF-8 byte-order mark, emitted by spreadsheet exports.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Result of one import batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Rows upserted into the catalog.
    pub imported: usize,
    /// Rows skipped due to per-row problems.
    pub skipped: usize,
}

/// Errors that abort an import batch.
///
/// Only storage failures abort a batch; row-level problems are recovered
/// locally and reported through [`ImportSummary::skipped`].
#[derive(Debug, Error)]
pub enum ImportError {
    /// Storage failure; the transaction rolled back and no row of the
    /// batch is visible.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Service importing product feeds into the catalog.
pub struct ImportService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> ImportService<'a> {
    /// Create a new import service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// Import one feed batch.
    ///
    /// Re-importing an identical batch is idempotent: rows upsert by stock
    /// code, so no duplicates are created and the final catalog state is
    /// the same.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Repository` if the commit fails; in that case
    /// nothing from the batch is visible and the import can be retried.
    pub async fn import(&self, bytes: &[u8]) -> Result<ImportSummary, ImportError> {
        let input = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let mut staged = Vec::new();
        let mut skipped = 0usize;

        for (index, result) in reader.deserialize::<FeedRow>().enumerate() {
            let row_number = index + 1;
            let row = match result {
                Ok(row) => row,
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(row = row_number, error = %err, "skipping malformed feed row");
                    continue;
                }
            };

            match normalize(&row) {
                Ok(product) => staged.push(product),
                Err(reason) => {
                    skipped += 1;
                    tracing::warn!(
                        row = row_number,
                        contents = ?row,
                        reason = %reason,
                        "skipping feed row"
                    );
                }
            }
        }

        let imported = self.products.upsert_batch(&staged).await?;

        tracing::info!(imported, skipped, "feed import finished");

        Ok(ImportSummary { imported, skipped })
    }
}
