use axum::{routing::get, Router};
use fitstudio_db::store::Store;
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes<S: Store>() -> Router<Arc<ApiState<S>>> {
    Router::new().route("/api/classes", get(handlers::classes::list_classes::<S>))
}
