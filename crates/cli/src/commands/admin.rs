//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! lakk-cli admin create -e admin@example.com -p "a strong password"
//! ```
//!
//! # Environment Variables
//!
//! - `LAKKERIET_DATABASE_URL` - `SQLite` connection string

use secrecy::SecretString;
use thiserror::Error;

use lakkeriet_core::{Email, EmailError};
use lakkeriet_storefront::db::{self, RepositoryError, UserRepository};
use lakkeriet_storefront::services::auth::{AuthError, hash_password, validate_password};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password rejected or hashing failed.
    #[error("Password error: {0}")]
    Password(#[from] AuthError),
}

/// Create an admin user, leaving an existing account untouched.
///
/// # Errors
///
/// Returns `AdminError` if the email or password is rejected or a
/// database step fails.
pub async fn create(email: &str, password: &str) -> Result<(), AdminError> {
    dotenvy::dotenv().ok();

    let database_url: SecretString = std::env::var("LAKKERIET_DATABASE_URL")
        .map_err(|_| AdminError::MissingEnvVar("LAKKERIET_DATABASE_URL"))?
        .into();

    let email = Email::parse(email)?;
    validate_password(password)?;
    let password_hash = hash_password(password)?;

    let pool = db::create_pool(&database_url).await?;

    let created = UserRepository::new(&pool)
        .ensure_admin(&email, &password_hash)
        .await?;

    if created {
        tracing::info!(%email, "admin user created");
    } else {
        tracing::info!(%email, "account already exists, left untouched");
    }

    Ok(())
}
