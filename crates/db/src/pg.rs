//! PostgreSQL-backed store.
//!
//! Concurrent bookings for one class are serialized with a row lock taken by
//! `SELECT ... FOR UPDATE` under the default READ COMMITTED isolation. Each
//! statement after the lock sees the rows committed by whoever held it before.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{Connection, Postgres, Transaction};

use crate::error::{StoreError, StoreResult};
use crate::models::{DbBooking, DbClass, DbClassSlots, DbUser, DbUserBooking};
use crate::repositories::{booking, class, user};
use crate::store::{Store, UnitOfWork};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// One booking transaction on a pooled connection.
pub struct PgWork {
    tx: Option<Transaction<'static, Postgres>>,
    locked: HashSet<i64>,
}

impl PgWork {
    fn tx(&mut self) -> StoreResult<&mut Transaction<'static, Postgres>> {
        self.tx.as_mut().ok_or(StoreError::Finished)
    }
}

#[async_trait]
impl UnitOfWork for PgWork {
    async fn find_user_by_email(&mut self, email: &str) -> StoreResult<Option<DbUser>> {
        let tx = self.tx()?;
        user::find_user_by_email(&mut **tx, email).await
    }

    async fn create_user(
        &mut self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<i64> {
        let tx = self.tx()?;

        // A failed statement aborts the whole Postgres transaction, so the
        // insert runs under a savepoint to keep the unit of work usable when
        // the email turns out to be taken.
        let mut savepoint = tx.begin().await?;
        match user::create_user(&mut *savepoint, name, email, password_hash).await {
            Ok(id) => {
                savepoint.commit().await?;
                Ok(id)
            }
            Err(err) => {
                savepoint.rollback().await?;
                Err(err)
            }
        }
    }

    async fn get_class_for_update(&mut self, class_id: i64) -> StoreResult<Option<DbClassSlots>> {
        let tx = self.tx()?;
        let slots = class::get_class_for_update(&mut **tx, class_id).await?;
        if slots.is_some() {
            self.locked.insert(class_id);
        }
        Ok(slots)
    }

    async fn decrement_slot(&mut self, class_id: i64) -> StoreResult<()> {
        if !self.locked.contains(&class_id) {
            return Err(StoreError::NotLocked(class_id));
        }

        let tx = self.tx()?;
        if class::decrement_slot(&mut **tx, class_id).await? {
            Ok(())
        } else {
            Err(StoreError::SlotUnderflow(class_id))
        }
    }

    async fn find_booking(
        &mut self,
        user_id: i64,
        class_id: i64,
    ) -> StoreResult<Option<DbBooking>> {
        let tx = self.tx()?;
        booking::find_booking(&mut **tx, user_id, class_id).await
    }

    async fn insert_booking(&mut self, user_id: i64, class_id: i64) -> StoreResult<i64> {
        let tx = self.tx()?;
        booking::insert_booking(&mut **tx, user_id, class_id).await
    }

    async fn commit(&mut self) -> StoreResult<()> {
        let tx = self.tx.take().ok_or(StoreError::Finished)?;
        tx.commit().await?;
        self.locked.clear();
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    type Work = PgWork;

    async fn begin(&self) -> StoreResult<PgWork> {
        let tx = self.pool.begin().await?;
        Ok(PgWork {
            tx: Some(tx),
            locked: HashSet::new(),
        })
    }

    async fn list_future_classes(&self, now: NaiveDateTime) -> StoreResult<Vec<DbClass>> {
        class::list_future_classes(&self.pool, now).await
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<DbUser>> {
        user::find_user_by_email(&self.pool, email).await
    }

    async fn list_bookings_for_user(&self, user_id: i64) -> StoreResult<Vec<DbUserBooking>> {
        booking::list_bookings_for_user(&self.pool, user_id).await
    }
}
