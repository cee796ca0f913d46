use async_trait::async_trait;
use mockall::mock;

use crate::error::StoreResult;
use crate::models::{DbBooking, DbClassSlots, DbUser};
use crate::store::UnitOfWork;

// Mock unit of work for testing failure paths that real stores rarely hit
mock! {
    pub Work {}

    #[async_trait]
    impl UnitOfWork for Work {
        async fn find_user_by_email(&mut self, email: &str) -> StoreResult<Option<DbUser>>;

        async fn create_user(
            &mut self,
            name: &str,
            email: &str,
            password_hash: &str,
        ) -> StoreResult<i64>;

        async fn get_class_for_update(&mut self, class_id: i64) -> StoreResult<Option<DbClassSlots>>;

        async fn decrement_slot(&mut self, class_id: i64) -> StoreResult<()>;

        async fn find_booking(
            &mut self,
            user_id: i64,
            class_id: i64,
        ) -> StoreResult<Option<DbBooking>>;

        async fn insert_booking(&mut self, user_id: i64, class_id: i64) -> StoreResult<i64>;

        async fn commit(&mut self) -> StoreResult<()>;
    }
}
