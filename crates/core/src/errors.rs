use thiserror::Error;

/// Message returned to callers when a booking fails for a reason they can't act on.
pub const GENERIC_BOOKING_FAILURE: &str = "Booking failed. Please try again.";

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid timezone specified.")]
    InvalidTimezone,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Storage error: {0}")]
    Storage(eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] eyre::Report),
}

impl BookingError {
    /// The message that may be shown to the caller.
    ///
    /// Storage and internal failures never expose their cause; it is logged
    /// where the failure is handled instead.
    pub fn public_message(&self) -> String {
        match self {
            BookingError::InvalidInput(msg)
            | BookingError::NotFound(msg)
            | BookingError::InvalidState(msg) => msg.clone(),
            BookingError::InvalidTimezone => self.to_string(),
            BookingError::ConstraintViolation(_) | BookingError::Storage(_) => {
                GENERIC_BOOKING_FAILURE.to_string()
            }
            BookingError::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
