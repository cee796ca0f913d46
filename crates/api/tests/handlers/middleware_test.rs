use axum::{
    body::to_bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_test::TestServer;
use fitstudio_api::middleware::error_handling::{panic_response, AppError};
use fitstudio_core::errors::BookingError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;

use crate::test_utils::TestContext;

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case(BookingError::InvalidInput("Invalid email format.".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::InvalidTimezone, StatusCode::BAD_REQUEST)]
#[case(BookingError::NotFound("Class not found.".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::InvalidState("No available slots for this class.".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::ConstraintViolation("bookings_user_class_key".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Storage(eyre::eyre!("pool timed out")), StatusCode::BAD_REQUEST)]
#[case(BookingError::Internal(eyre::eyre!("boom")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).status(), expected);
}

#[tokio::test]
async fn test_business_errors_carry_their_message() {
    let response = AppError(BookingError::InvalidState(
        "You are already booked for this class.".to_string(),
    ))
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "You are already booked for this class." })
    );
}

#[tokio::test]
async fn test_storage_detail_is_hidden() {
    let constraint = AppError(BookingError::ConstraintViolation(
        "bookings_user_class_key".to_string(),
    ))
    .into_response();
    let storage = AppError(BookingError::Storage(eyre::eyre!(
        "connection reset by peer"
    )))
    .into_response();

    for response in [constraint, storage] {
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Booking failed. Please try again." })
        );
    }
}

#[tokio::test]
async fn test_internal_error_body() {
    let report = eyre::eyre!("relation \"classes\" does not exist");
    let response = AppError(BookingError::Internal(report)).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Internal Server Error" })
    );
}

#[tokio::test]
async fn test_panic_response() {
    let response = panic_response(Box::new("index out of bounds"));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Internal Server Error" })
    );
}

#[tokio::test]
async fn test_panicking_handler_is_caught() {
    async fn explode() -> &'static str {
        panic!("handler blew up")
    }
    let app = Router::new()
        .route("/explode", get(explode))
        .layer(CatchPanicLayer::custom(panic_response));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/explode").await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal Server Error" })
    );
}

#[tokio::test]
async fn test_unknown_path() {
    let server = TestContext::new().server();

    let response = server.get("/api/nope").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "error": "Not Found",
            "message": "The requested URL was not found on the server."
        })
    );
}

#[tokio::test]
async fn test_root_and_health() {
    let server = TestContext::new().server();

    let root = server.get("/").await;
    let health = server.get("/health").await;

    assert_eq!(root.status_code(), 200);
    assert_eq!(
        root.text(),
        "Welcome to the Fitness Studio API! Visit /api/classes to see available classes."
    );
    assert_eq!(health.json::<Value>(), json!({ "status": "ok" }));
}
