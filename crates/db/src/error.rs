use thiserror::Error;

/// Name of the unique constraint on `users.email`.
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Name of the unique constraint on `bookings(user_id, class_id)`.
pub const BOOKINGS_USER_CLASS_KEY: &str = "bookings_user_class_key";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unique constraint {0} violated")]
    ConstraintViolation(String),

    #[error("transaction conflict: {0}")]
    Conflict(String),

    #[error("class {0} must be read for update before its slots change")]
    NotLocked(i64),

    #[error("class {0} has no slots left to take")]
    SlotUnderflow(i64),

    #[error("unit of work already finished")]
    Finished,

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    /// Whether retrying the whole unit of work may succeed or change the outcome.
    ///
    /// Serialization failures and deadlocks qualify, as does losing an insert race
    /// on the booking pair: the retry sees the committed row and reports it.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Conflict(_) => true,
            StoreError::ConstraintViolation(constraint) => constraint == BOOKINGS_USER_CLASS_KEY,
            _ => false,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique").to_string();
                return StoreError::ConstraintViolation(constraint);
            }

            // serialization_failure, deadlock_detected
            if matches!(db_err.code().as_deref(), Some("40001") | Some("40P01")) {
                return StoreError::Conflict(db_err.message().to_string());
            }
        }

        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
