//! # Time Conversion
//!
//! All timestamps are stored canonically as UTC wall-clock values with second
//! precision (`YYYY-MM-DD HH:MM:SS`). These helpers move values between that
//! canonical form and the wall-clock time of a named IANA zone.

use chrono::{LocalResult, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::errors::{BookingError, BookingResult};

/// Layout of a canonical timestamp.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout of a localized timestamp, e.g. `2025-07-08 10:00:00 EDT-0400`.
pub const LOCALIZED_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z%z";

/// Resolves an IANA zone name such as `America/New_York`, ignoring case.
pub fn parse_timezone(name: &str) -> BookingResult<Tz> {
    name.parse::<Tz>()
        .or_else(|_| Tz::from_str_insensitive(name))
        .map_err(|_| BookingError::InvalidTimezone)
}

/// The current canonical time, truncated to whole seconds.
pub fn canonical_now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn format_canonical(value: &NaiveDateTime) -> String {
    value.format(CANONICAL_FORMAT).to_string()
}

pub fn parse_canonical(value: &str) -> BookingResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, CANONICAL_FORMAT).map_err(|e| {
        BookingError::InvalidInput(format!("Invalid timestamp '{}': {}", value, e))
    })
}

/// Renders a canonical instant as wall-clock time in `tz`, including the zone
/// abbreviation and UTC offset in effect at that instant.
pub fn localize(canonical: &NaiveDateTime, tz: &Tz) -> String {
    Utc.from_utc_datetime(canonical)
        .with_timezone(tz)
        .format(LOCALIZED_FORMAT)
        .to_string()
}

/// Interprets `local` as wall-clock time in `tz` and returns the canonical instant.
///
/// A wall-clock time repeated by a DST fall-back resolves to its standard-time
/// occurrence. A time skipped by a spring-forward gap does not exist and is
/// rejected.
pub fn local_to_canonical(local: &NaiveDateTime, tz: &Tz) -> BookingResult<NaiveDateTime> {
    let resolved = match tz.from_local_datetime(local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_, standard) => standard,
        LocalResult::None => {
            return Err(BookingError::InvalidInput(format!(
                "{} does not exist in {}",
                local.format(CANONICAL_FORMAT),
                tz.name()
            )));
        }
    };

    Ok(resolved.naive_utc())
}

/// Converts a naive wall-clock time in the named zone to a canonical string.
pub fn to_canonical(local: &NaiveDateTime, source_timezone: &str) -> BookingResult<String> {
    let tz = parse_timezone(source_timezone)?;
    let canonical = local_to_canonical(local, &tz)?;
    Ok(format_canonical(&canonical))
}

/// Converts a canonical string to a localized string in the named zone.
///
/// Returns `Ok(None)` when there is nothing to convert.
pub fn from_canonical(
    canonical: Option<&str>,
    target_timezone: &str,
) -> BookingResult<Option<String>> {
    let value = match canonical {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Ok(None),
    };

    let tz = parse_timezone(target_timezone)?;
    let instant = parse_canonical(value)?;
    Ok(Some(localize(&instant, &tz)))
}
