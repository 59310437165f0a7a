//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! lakk-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `LAKKERIET_DATABASE_URL` - `SQLite` connection string

use secrecy::SecretString;
use thiserror::Error;

use lakkeriet_storefront::db;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Run the schema migrations against the configured database.
///
/// # Errors
///
/// Returns `MigrationError` if the URL is absent, the connection fails or
/// a migration cannot be applied.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url: SecretString = std::env::var("LAKKERIET_DATABASE_URL")
        .map_err(|_| MigrationError::MissingEnvVar("LAKKERIET_DATABASE_URL"))?
        .into();

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
