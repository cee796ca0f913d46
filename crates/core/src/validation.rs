//! Request validation that runs before any storage work.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::errors::{BookingError, BookingResult};
use crate::models::booking::BookingRequest;

pub const MISSING_BOOKING_FIELDS: &str =
    "Missing data: class_id, client_name, client_email are required.";
pub const INVALID_CLASS_ID: &str = "Invalid class_id: must be an integer.";
pub const INVALID_EMAIL: &str = "Invalid email format.";
pub const INVALID_CLIENT_NAME: &str = "Invalid client_name: must be a string.";
pub const MISSING_EMAIL_PARAM: &str = "Email query parameter is required.";

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Lowercases and trims an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

impl BookingRequest {
    /// Builds a request from a raw JSON body.
    ///
    /// The checks run in a fixed order so the caller always sees the first
    /// problem: missing fields, then the class id, then the email. The email
    /// in the returned request is already normalized.
    pub fn from_json(body: Option<&Value>) -> BookingResult<Self> {
        let missing = || BookingError::InvalidInput(MISSING_BOOKING_FIELDS.to_string());

        let body = body.and_then(Value::as_object).ok_or_else(missing)?;
        let (class_id, client_name, client_email) = match (
            body.get("class_id"),
            body.get("client_name"),
            body.get("client_email"),
        ) {
            (Some(class_id), Some(name), Some(email)) => (class_id, name, email),
            _ => return Err(missing()),
        };

        let class_id = class_id
            .as_i64()
            .ok_or_else(|| BookingError::InvalidInput(INVALID_CLASS_ID.to_string()))?;

        let client_email = client_email
            .as_str()
            .map(normalize_email)
            .filter(|email| is_valid_email(email))
            .ok_or_else(|| BookingError::InvalidInput(INVALID_EMAIL.to_string()))?;

        let client_name = client_name
            .as_str()
            .map(|name| name.trim().to_string())
            .ok_or_else(|| BookingError::InvalidInput(INVALID_CLIENT_NAME.to_string()))?;

        Ok(Self {
            class_id,
            client_name,
            client_email,
        })
    }
}
