//! Read paths. Nothing here writes or holds a lock.

use chrono::NaiveDateTime;
use fitstudio_core::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{BookingHistory, BookingView},
        class::ClassView,
    },
    time::{localize, parse_timezone},
    validation::{MISSING_EMAIL_PARAM, normalize_email},
};
use fitstudio_db::{error::StoreError, store::Store};
use tracing::error;

/// Zone used when the caller doesn't name one.
pub const DEFAULT_TIMEZONE: &str = "UTC";

fn read_failure(operation: &str, err: StoreError) -> BookingError {
    error!(operation, "Read failed: {}", err);
    BookingError::Internal(eyre::Report::new(err))
}

/// Lists classes that start after `now`, earliest first, in the caller's zone.
pub async fn list_classes<S: Store>(
    store: &S,
    timezone: Option<&str>,
    now: NaiveDateTime,
) -> BookingResult<Vec<ClassView>> {
    let tz = parse_timezone(timezone.unwrap_or(DEFAULT_TIMEZONE))?;

    let classes = store
        .list_future_classes(now)
        .await
        .map_err(|e| read_failure("list_classes", e))?;

    Ok(classes
        .into_iter()
        .map(|class| ClassView {
            class_id: class.id,
            name: class.name,
            start_time: localize(&class.start_time, &tz),
            instructor: class.instructor,
            available_slots: class.available_slots,
        })
        .collect())
}

/// Lists the bookings made under `email`, ordered by class start time.
pub async fn list_bookings_for_email<S: Store>(
    store: &S,
    email: Option<&str>,
    timezone: Option<&str>,
) -> BookingResult<BookingHistory> {
    let email = email
        .map(normalize_email)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| BookingError::InvalidInput(MISSING_EMAIL_PARAM.to_string()))?;
    let tz = parse_timezone(timezone.unwrap_or(DEFAULT_TIMEZONE))?;

    let user = store
        .find_user_by_email(&email)
        .await
        .map_err(|e| read_failure("find_user_by_email", e))?;
    let Some(user) = user else {
        return Ok(BookingHistory::NoBookings);
    };

    let bookings = store
        .list_bookings_for_user(user.id)
        .await
        .map_err(|e| read_failure("list_bookings_for_user", e))?;
    if bookings.is_empty() {
        return Ok(BookingHistory::NoBookings);
    }

    Ok(BookingHistory::Found(
        bookings
            .into_iter()
            .map(|booking| BookingView {
                name: booking.class_name,
                instructor: booking.instructor,
                start_time: localize(&booking.class_start_time, &tz),
                booking_date: localize(&booking.booking_date, &tz),
            })
            .collect(),
    ))
}
