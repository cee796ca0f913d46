use axum::{
    routing::get,
    Json, Router,
};
use fitstudio_db::store::Store;
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

pub const WELCOME: &str =
    "Welcome to the Fitness Studio API! Visit /api/classes to see available classes.";

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct VersionResponse {
    version: String,
}

async fn index() -> &'static str {
    WELCOME
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn routes<S: Store>() -> Router<Arc<ApiState<S>>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/version", get(version))
}
