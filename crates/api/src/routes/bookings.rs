use axum::{
    routing::{get, post},
    Router,
};
use fitstudio_db::store::Store;
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes<S: Store>() -> Router<Arc<ApiState<S>>> {
    Router::new()
        .route("/api/book", post(handlers::bookings::book_class::<S>))
        .route("/api/bookings", get(handlers::bookings::list_bookings::<S>))
}
