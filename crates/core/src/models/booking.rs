use serde::{Deserialize, Serialize};

/// A validated reservation request. Build it with [`BookingRequest::from_json`].
///
/// [`BookingRequest::from_json`]: crate::models::booking::BookingRequest::from_json
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub class_id: i64,
    pub client_name: String,
    pub client_email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub booking_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub booking_id: i64,
}

impl From<BookingConfirmation> for BookingResponse {
    fn from(confirmation: BookingConfirmation) -> Self {
        Self {
            success: true,
            message: "Booking confirmed!".to_string(),
            booking_id: confirmation.booking_id,
        }
    }
}

/// One entry of a client's booking history, localized to the caller's zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingView {
    pub name: String,
    pub instructor: String,
    pub start_time: String,
    pub booking_date: String,
}

/// Outcome of a booking history lookup.
///
/// `NoBookings` is not an error: the email was valid but nothing is booked under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingHistory {
    Found(Vec<BookingView>),
    NoBookings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBookingsQuery {
    pub email: Option<String>,
    pub timezone: Option<String>,
}
