//! Lakkeriet storefront - JSON API for the nail-polish shop.
//!
//! Serves the public catalog, the session cart, checkout and the
//! admin-only product management and feed import endpoints.

#![cfg_attr(not(test), forbid(unsafe_code))]

use lakkeriet_storefront::config::StorefrontConfig;
use lakkeriet_storefront::state::AppState;
use lakkeriet_storefront::{app, db};

#[tokio::main]
async fn main() {
    // A missing .env is fine; production sets real environment variables.
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lakkeriet_storefront=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // Schema migrations are not run automatically on startup.
    // Run them explicitly via: cargo run -p lakk-cli -- migrate

    let addr = config.socket_addr();
    let state = AppState::new(config, pool);

    let app = app(state).await.expect("Failed to build application");

    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
