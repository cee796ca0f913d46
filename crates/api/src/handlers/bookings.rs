use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitstudio_core::{
    models::booking::{BookingHistory, BookingRequest, BookingResponse, ListBookingsQuery},
    time::canonical_now,
};
use fitstudio_db::store::Store;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    middleware::error_handling::AppError,
    services::{booking, query},
    ApiState,
};

pub const NO_BOOKINGS_FOUND: &str = "No bookings found for this email.";

/// Books a seat. A body that is missing or isn't JSON is reported as missing data.
pub async fn book_class<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    payload: Option<Json<Value>>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let body = payload.map(|Json(body)| body);
    let request = BookingRequest::from_json(body.as_ref())?;

    let confirmation = booking::attempt_booking(&state.store, &request, canonical_now()).await?;

    Ok((StatusCode::CREATED, Json(confirmation.into())))
}

pub async fn list_bookings<S: Store>(
    State(state): State<Arc<ApiState<S>>>,
    Query(params): Query<ListBookingsQuery>,
) -> Result<Response, AppError> {
    let history = query::list_bookings_for_email(
        &state.store,
        params.email.as_deref(),
        params.timezone.as_deref(),
    )
    .await?;

    Ok(match history {
        BookingHistory::Found(bookings) => Json(bookings).into_response(),
        BookingHistory::NoBookings => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": NO_BOOKINGS_FOUND })),
        )
            .into_response(),
    })
}
