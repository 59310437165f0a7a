//! Session middleware configuration.
//!
//! Sets up `SQLite`-backed sessions using tower-sessions. The session holds
//! the cart and the logged-in identity.

use sqlx::SqlitePool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "lakkeriet_session";

/// Session expiry time in seconds (30 days; carts should survive a pause).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer with a `SQLite` store.
///
/// The store's own `sessions` table must be migrated before serving; see
/// [`SqliteStore::migrate`].
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table migration fails.
pub async fn create_session_layer(
    pool: &SqlitePool,
) -> Result<SessionManagerLayer<SqliteStore>, sqlx::Error> {
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/"))
}
