//! # Error Handling Middleware
//!
//! Maps the booking error taxonomy to HTTP responses. Every client-side and
//! business-rule failure is a 400 with an `error` message, keeping the
//! contract existing clients rely on (an unknown class id is also a 400).
//! Only unexpected failures become a 500, and their detail never leaves the
//! server.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitstudio_core::errors::BookingError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use fitstudio_api::middleware::error_handling::AppError;
/// use fitstudio_core::errors::BookingError;
///
/// async fn handler() -> Result<Json<Vec<String>>, AppError> {
///     Err(AppError(BookingError::InvalidTimezone))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::InvalidInput(_)
            | BookingError::InvalidTimezone
            | BookingError::NotFound(_)
            | BookingError::InvalidState(_)
            | BookingError::ConstraintViolation(_)
            | BookingError::Storage(_) => StatusCode::BAD_REQUEST,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.0.public_message() }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Response for unknown paths.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": "The requested URL was not found on the server."
        })),
    )
        .into_response()
}

/// Turns a panicking handler into a plain 500; the panic payload is only logged.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Internal Server Error: handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal Server Error" })),
    )
        .into_response()
}
