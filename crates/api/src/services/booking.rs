//! # Booking Engine
//!
//! Reserves one seat in one class. Every step after input validation runs in a
//! single unit of work, so a rejected or failed attempt leaves no trace: no new
//! user, no slot taken, no booking row.
//!
//! Concurrent attempts on the same class queue on the class row lock taken by
//! `get_class_for_update`. Whoever gets the lock second sees the slots and
//! bookings left by the first, so a lost race reports "No available slots" or
//! "already booked" rather than an internal error.

use chrono::NaiveDateTime;
use fitstudio_core::{
    errors::{BookingError, BookingResult},
    models::booking::{BookingConfirmation, BookingRequest},
};
use fitstudio_db::{
    error::StoreError,
    store::{Store, UnitOfWork},
};
use tracing::{debug, error, info, warn};

pub const CLASS_NOT_FOUND: &str = "Class not found.";
pub const CLASS_ALREADY_STARTED: &str = "Cannot book a class that has already started.";
pub const NO_AVAILABLE_SLOTS: &str = "No available slots for this class.";
pub const ALREADY_BOOKED: &str = "You are already booked for this class.";

/// Stored for users created by the booking flow; nobody logs in with it.
pub const CREDENTIAL_PLACEHOLDER: &str = "dummy_password";

/// Why a single booking transaction did not commit.
#[derive(Debug)]
pub enum BookingFailure {
    /// A business rule said no. The message goes back to the caller as is.
    Rejected(BookingError),
    /// Storage failed underneath the transaction.
    Store(StoreError),
}

impl From<StoreError> for BookingFailure {
    fn from(err: StoreError) -> Self {
        BookingFailure::Store(err)
    }
}

fn rejected_state(message: &str) -> BookingFailure {
    BookingFailure::Rejected(BookingError::InvalidState(message.to_string()))
}

/// Attempts a booking, opening and owning the unit of work.
///
/// A transient storage conflict is retried once in a fresh unit of work.
/// Storage failures are logged here with their cause; the returned error only
/// carries a generic message for the caller.
pub async fn attempt_booking<S: Store>(
    store: &S,
    request: &BookingRequest,
    now: NaiveDateTime,
) -> BookingResult<BookingConfirmation> {
    let mut retried = false;

    loop {
        let outcome = match store.begin().await {
            Ok(mut work) => book_in(&mut work, request, now).await,
            Err(err) => Err(BookingFailure::Store(err)),
        };

        match outcome {
            Ok(confirmation) => {
                info!(
                    "Booking successful for {} for class_id {}. ID: {}",
                    request.client_email, request.class_id, confirmation.booking_id
                );
                return Ok(confirmation);
            }
            Err(BookingFailure::Rejected(err)) => {
                warn!(
                    "Booking rejected for {} for class_id {}: {}",
                    request.client_email, request.class_id, err
                );
                return Err(err);
            }
            Err(BookingFailure::Store(err)) if err.is_transient() && !retried => {
                warn!(
                    "Booking for {} on class_id {} hit a transient conflict, retrying: {}",
                    request.client_email, request.class_id, err
                );
                retried = true;
            }
            Err(BookingFailure::Store(err)) => {
                error!(
                    operation = "attempt_booking",
                    class_id = request.class_id,
                    email = %request.client_email,
                    retried,
                    "Booking transaction failed: {}",
                    err
                );
                return Err(match err {
                    StoreError::ConstraintViolation(constraint) => {
                        BookingError::ConstraintViolation(constraint)
                    }
                    other => BookingError::Storage(eyre::Report::new(other)),
                });
            }
        }
    }
}

/// Runs the booking protocol inside a caller-provided unit of work and commits it.
///
/// On any error the unit of work is left uncommitted; the caller drops it to
/// roll back.
pub async fn book_in<W: UnitOfWork>(
    work: &mut W,
    request: &BookingRequest,
    now: NaiveDateTime,
) -> Result<BookingConfirmation, BookingFailure> {
    let user_id = find_or_create_user(work, &request.client_name, &request.client_email).await?;

    let class = work
        .get_class_for_update(request.class_id)
        .await?
        .ok_or_else(|| BookingFailure::Rejected(BookingError::NotFound(CLASS_NOT_FOUND.to_string())))?;

    if class.start_time <= now {
        return Err(rejected_state(CLASS_ALREADY_STARTED));
    }
    if class.available_slots <= 0 {
        return Err(rejected_state(NO_AVAILABLE_SLOTS));
    }
    if work.find_booking(user_id, request.class_id).await?.is_some() {
        return Err(rejected_state(ALREADY_BOOKED));
    }

    work.decrement_slot(request.class_id).await?;
    let booking_id = work.insert_booking(user_id, request.class_id).await?;
    work.commit().await?;

    Ok(BookingConfirmation { booking_id })
}

/// Returns the id of the user with `email`, creating the user if needed.
///
/// If another transaction registers the same email between the lookup and the
/// insert, the unique constraint fires and the committed row is read back.
pub async fn find_or_create_user<W: UnitOfWork>(
    work: &mut W,
    name: &str,
    email: &str,
) -> Result<i64, BookingFailure> {
    if let Some(user) = work.find_user_by_email(email).await? {
        return Ok(user.id);
    }

    match work.create_user(name, email, CREDENTIAL_PLACEHOLDER).await {
        Ok(id) => Ok(id),
        Err(StoreError::ConstraintViolation(constraint)) => {
            debug!("User {} was created concurrently, re-reading", email);
            work.find_user_by_email(email)
                .await?
                .map(|user| user.id)
                .ok_or(BookingFailure::Store(StoreError::ConstraintViolation(
                    constraint,
                )))
        }
        Err(err) => Err(err.into()),
    }
}
