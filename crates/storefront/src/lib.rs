//! Lakkeriet storefront library.
//!
//! Everything except process startup lives here so the integration tests
//! can assemble the same application the binary serves.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application with its middleware stack.
///
/// The session store's table is migrated here; run the schema migrations
/// first (`lakk-cli migrate`).
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table migration fails.
pub async fn app(state: AppState) -> Result<Router, sqlx::Error> {
    let session_layer = middleware::create_session_layer(state.pool()).await?;

    Ok(routes::router()
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
