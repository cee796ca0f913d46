//! # Fitness Studio API
//!
//! The API crate provides the web server for the fitness studio booking
//! service: listing upcoming classes, booking a seat and reading a client's
//! booking history.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn HTTP requests into service calls
//! - **Services**: The booking engine and the read paths
//! - **Middleware**: Error mapping and panic handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Storage is reached through the
//! `Store` trait from `fitstudio-db`, so the same router runs over PostgreSQL
//! in production and over the in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping and panic handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Booking engine and query service
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, Router};
use eyre::{Result, WrapErr};
use fitstudio_db::store::Store;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// Handlers take the store from here and pass it explicitly into the
/// services; nothing request-scoped lives in globals.
pub struct ApiState<S> {
    pub store: S,
}

/// Builds the application router over `store`, without network-level layers.
pub fn build_router<S: Store>(store: S) -> Router {
    let state = Arc::new(ApiState { store });

    Router::new()
        // Root, health check and version endpoints
        .merge(routes::health::routes())
        // Class listing
        .merge(routes::classes::routes())
        // Booking and booking history
        .merge(routes::bookings::routes())
        .fallback(middleware::error_handling::not_found)
        .layer(CatchPanicLayer::custom(
            middleware::error_handling::panic_response,
        ))
        // Attach shared state to all routes
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_origin(origins))
}

/// Starts the API server with the provided configuration and store
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use fitstudio_api::config::ApiConfig;
/// use fitstudio_db::pg::PgStore;
///
/// let config = ApiConfig::from_env()?;
/// let pool = fitstudio_db::create_pool(&config.database_url, config.max_connections).await?;
/// fitstudio_api::start_server(config, PgStore::new(pool)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server<S: Store>(config: config::ApiConfig, store: S) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = build_router(store).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
