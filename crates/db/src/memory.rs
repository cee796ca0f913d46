//! In-process store with the same transactional guarantees as [`PgStore`].
//!
//! A unit of work holds the store-wide lock for its whole lifetime and works
//! on a private copy of the tables. Commit publishes the copy; dropping the
//! unit of work discards it. Transactions are therefore fully serialized,
//! which is stronger than the row locks Postgres takes.
//!
//! [`PgStore`]: crate::pg::PgStore

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use fitstudio_core::time::canonical_now;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::{BOOKINGS_USER_CLASS_KEY, StoreError, StoreResult, USERS_EMAIL_KEY};
use crate::models::{DbBooking, DbClass, DbClassSlots, DbUser, DbUserBooking};
use crate::store::{Store, UnitOfWork};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: Vec<DbUser>,
    classes: Vec<DbClass>,
    bookings: Vec<DbBooking>,
    next_user_id: i64,
    next_class_id: i64,
    next_booking_id: i64,
}

impl Tables {
    fn user_by_email(&self, email: &str) -> Option<&DbUser> {
        self.users.iter().find(|u| u.email == email)
    }

    fn class_mut(&mut self, id: i64) -> Option<&mut DbClass> {
        self.classes.iter_mut().find(|c| c.id == id)
    }

    fn insert_user(&mut self, name: &str, email: &str, password_hash: &str) -> StoreResult<i64> {
        if self.user_by_email(email).is_some() {
            return Err(StoreError::ConstraintViolation(USERS_EMAIL_KEY.to_string()));
        }

        self.next_user_id += 1;
        self.users.push(DbUser {
            id: self.next_user_id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        });
        Ok(self.next_user_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class directly, outside any unit of work.
    pub async fn insert_class(
        &self,
        name: &str,
        start_time: NaiveDateTime,
        instructor: &str,
        capacity: i32,
        available_slots: i32,
    ) -> i64 {
        let mut tables = self.tables.lock().await;
        tables.next_class_id += 1;
        let id = tables.next_class_id;
        tables.classes.push(DbClass {
            id,
            name: name.to_string(),
            start_time,
            instructor: instructor.to_string(),
            capacity,
            available_slots,
        });
        id
    }

    /// Adds a user directly, outside any unit of work.
    pub async fn insert_user(&self, name: &str, email: &str) -> StoreResult<i64> {
        self.tables
            .lock()
            .await
            .insert_user(name, email, "dummy_password")
    }

    pub async fn class(&self, id: i64) -> Option<DbClass> {
        self.tables
            .lock()
            .await
            .classes
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub async fn bookings_for_class(&self, class_id: i64) -> Vec<DbBooking> {
        self.tables
            .lock()
            .await
            .bookings
            .iter()
            .filter(|b| b.class_id == class_id)
            .cloned()
            .collect()
    }

    pub async fn users(&self) -> Vec<DbUser> {
        self.tables.lock().await.users.clone()
    }
}

pub struct MemoryWork {
    committed: OwnedMutexGuard<Tables>,
    staged: Tables,
    locked: HashSet<i64>,
    finished: bool,
}

impl MemoryWork {
    fn staged(&mut self) -> StoreResult<&mut Tables> {
        if self.finished {
            return Err(StoreError::Finished);
        }
        Ok(&mut self.staged)
    }
}

#[async_trait]
impl UnitOfWork for MemoryWork {
    async fn find_user_by_email(&mut self, email: &str) -> StoreResult<Option<DbUser>> {
        Ok(self.staged()?.user_by_email(email).cloned())
    }

    async fn create_user(
        &mut self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<i64> {
        self.staged()?.insert_user(name, email, password_hash)
    }

    async fn get_class_for_update(&mut self, class_id: i64) -> StoreResult<Option<DbClassSlots>> {
        let slots = self
            .staged()?
            .class_mut(class_id)
            .map(|c| DbClassSlots {
                available_slots: c.available_slots,
                start_time: c.start_time,
            });

        if slots.is_some() {
            self.locked.insert(class_id);
        }
        Ok(slots)
    }

    async fn decrement_slot(&mut self, class_id: i64) -> StoreResult<()> {
        if !self.locked.contains(&class_id) {
            return Err(StoreError::NotLocked(class_id));
        }

        let class = self
            .staged()?
            .class_mut(class_id)
            .ok_or(StoreError::NotLocked(class_id))?;
        if class.available_slots <= 0 {
            return Err(StoreError::SlotUnderflow(class_id));
        }
        class.available_slots -= 1;
        Ok(())
    }

    async fn find_booking(
        &mut self,
        user_id: i64,
        class_id: i64,
    ) -> StoreResult<Option<DbBooking>> {
        Ok(self
            .staged()?
            .bookings
            .iter()
            .find(|b| b.user_id == user_id && b.class_id == class_id)
            .cloned())
    }

    async fn insert_booking(&mut self, user_id: i64, class_id: i64) -> StoreResult<i64> {
        let tables = self.staged()?;
        if tables
            .bookings
            .iter()
            .any(|b| b.user_id == user_id && b.class_id == class_id)
        {
            return Err(StoreError::ConstraintViolation(
                BOOKINGS_USER_CLASS_KEY.to_string(),
            ));
        }

        tables.next_booking_id += 1;
        let id = tables.next_booking_id;
        tables.bookings.push(DbBooking {
            id,
            user_id,
            class_id,
            booking_date: canonical_now(),
        });
        Ok(id)
    }

    async fn commit(&mut self) -> StoreResult<()> {
        let staged = std::mem::take(self.staged()?);
        *self.committed = staged;
        self.finished = true;
        self.locked.clear();
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    type Work = MemoryWork;

    async fn begin(&self) -> StoreResult<MemoryWork> {
        let committed = self.tables.clone().lock_owned().await;
        let staged = committed.clone();
        Ok(MemoryWork {
            committed,
            staged,
            locked: HashSet::new(),
            finished: false,
        })
    }

    async fn list_future_classes(&self, now: NaiveDateTime) -> StoreResult<Vec<DbClass>> {
        let mut classes: Vec<DbClass> = self
            .tables
            .lock()
            .await
            .classes
            .iter()
            .filter(|c| c.start_time > now)
            .cloned()
            .collect();
        classes.sort_by_key(|c| c.start_time);
        Ok(classes)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<DbUser>> {
        Ok(self.tables.lock().await.user_by_email(email).cloned())
    }

    async fn list_bookings_for_user(&self, user_id: i64) -> StoreResult<Vec<DbUserBooking>> {
        let tables = self.tables.lock().await;
        let mut bookings: Vec<DbUserBooking> = tables
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter_map(|b| {
                tables
                    .classes
                    .iter()
                    .find(|c| c.id == b.class_id)
                    .map(|c| DbUserBooking {
                        class_name: c.name.clone(),
                        instructor: c.instructor.clone(),
                        class_start_time: c.start_time,
                        booking_date: b.booking_date,
                    })
            })
            .collect();
        bookings.sort_by_key(|b| b.class_start_time);
        Ok(bookings)
    }
}
