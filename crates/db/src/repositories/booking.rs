use crate::error::StoreResult;
use crate::models::{DbBooking, DbUserBooking};
use sqlx::PgExecutor;

pub async fn find_booking<'e, E>(
    executor: E,
    user_id: i64,
    class_id: i64,
) -> StoreResult<Option<DbBooking>>
where
    E: PgExecutor<'e>,
{
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, user_id, class_id, booking_date
        FROM bookings
        WHERE user_id = $1 AND class_id = $2
        "#,
    )
    .bind(user_id)
    .bind(class_id)
    .fetch_optional(executor)
    .await?;

    Ok(booking)
}

pub async fn insert_booking<'e, E>(executor: E, user_id: i64, class_id: i64) -> StoreResult<i64>
where
    E: PgExecutor<'e>,
{
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO bookings (user_id, class_id)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(class_id)
    .fetch_one(executor)
    .await?;

    Ok(id)
}

/// Number of booking rows for a class, for checking it against the slot count.
pub async fn count_bookings_for_class<'e, E>(executor: E, class_id: i64) -> StoreResult<i64>
where
    E: PgExecutor<'e>,
{
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM bookings
        WHERE class_id = $1
        "#,
    )
    .bind(class_id)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

pub async fn list_bookings_for_user<'e, E>(
    executor: E,
    user_id: i64,
) -> StoreResult<Vec<DbUserBooking>>
where
    E: PgExecutor<'e>,
{
    let bookings = sqlx::query_as::<_, DbUserBooking>(
        r#"
        SELECT c.name AS class_name, c.instructor, c.start_time AS class_start_time, b.booking_date
        FROM bookings b
        JOIN classes c ON b.class_id = c.id
        WHERE b.user_id = $1
        ORDER BY c.start_time ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    Ok(bookings)
}
