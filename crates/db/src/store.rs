//! # Persistence Store
//!
//! The booking engine talks to storage through two traits. A [`Store`] hands
//! out pool-level reads and opens units of work; a [`UnitOfWork`] is one
//! transaction. Dropping a unit of work without calling
//! [`UnitOfWork::commit`] rolls back everything done through it.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::StoreResult;
use crate::models::{DbBooking, DbClass, DbClassSlots, DbUser, DbUserBooking};

#[async_trait]
pub trait UnitOfWork: Send {
    async fn find_user_by_email(&mut self, email: &str) -> StoreResult<Option<DbUser>>;

    /// Inserts a user and returns its id.
    ///
    /// Fails with `StoreError::ConstraintViolation` when the email is already
    /// taken, including by a concurrent transaction that committed first. The
    /// unit of work stays usable after that failure.
    async fn create_user(
        &mut self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<i64>;

    /// Reads a class's slots and start time, locking the row until the unit
    /// of work ends. Concurrent callers for the same class wait here.
    async fn get_class_for_update(&mut self, class_id: i64) -> StoreResult<Option<DbClassSlots>>;

    /// Takes one slot. The class must have been read with
    /// [`UnitOfWork::get_class_for_update`] in this unit of work.
    async fn decrement_slot(&mut self, class_id: i64) -> StoreResult<()>;

    async fn find_booking(&mut self, user_id: i64, class_id: i64)
    -> StoreResult<Option<DbBooking>>;

    async fn insert_booking(&mut self, user_id: i64, class_id: i64) -> StoreResult<i64>;

    async fn commit(&mut self) -> StoreResult<()>;
}

#[async_trait]
pub trait Store: Send + Sync + 'static {
    type Work: UnitOfWork;

    async fn begin(&self) -> StoreResult<Self::Work>;

    /// Classes starting strictly after `now`, earliest first.
    async fn list_future_classes(&self, now: NaiveDateTime) -> StoreResult<Vec<DbClass>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<DbUser>>;

    /// A user's bookings ordered by class start time.
    async fn list_bookings_for_user(&self, user_id: i64) -> StoreResult<Vec<DbUserBooking>>;
}
