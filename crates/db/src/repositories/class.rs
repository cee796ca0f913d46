use crate::error::StoreResult;
use crate::models::{DbClass, DbClassSlots};
use chrono::NaiveDateTime;
use sqlx::PgExecutor;

pub async fn create_class<'e, E>(
    executor: E,
    name: &str,
    start_time: NaiveDateTime,
    instructor: &str,
    capacity: i32,
    available_slots: i32,
) -> StoreResult<i64>
where
    E: PgExecutor<'e>,
{
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO classes (name, start_time, instructor, capacity, available_slots)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(start_time)
    .bind(instructor)
    .bind(capacity)
    .bind(available_slots)
    .fetch_one(executor)
    .await?;

    Ok(id)
}

/// Reads a class without locking it, for inspecting state outside a booking.
pub async fn get_class_by_id<'e, E>(executor: E, id: i64) -> StoreResult<Option<DbClass>>
where
    E: PgExecutor<'e>,
{
    let class = sqlx::query_as::<_, DbClass>(
        r#"
        SELECT id, name, start_time, instructor, capacity, available_slots
        FROM classes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(class)
}

/// Row-locks the class until the surrounding transaction ends.
pub async fn get_class_for_update<'e, E>(executor: E, id: i64) -> StoreResult<Option<DbClassSlots>>
where
    E: PgExecutor<'e>,
{
    let slots = sqlx::query_as::<_, DbClassSlots>(
        r#"
        SELECT available_slots, start_time
        FROM classes
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(slots)
}

/// Takes one slot, returning `false` when there was none to take.
pub async fn decrement_slot<'e, E>(executor: E, id: i64) -> StoreResult<bool>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE classes
        SET available_slots = available_slots - 1
        WHERE id = $1 AND available_slots > 0
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn list_future_classes<'e, E>(executor: E, now: NaiveDateTime) -> StoreResult<Vec<DbClass>>
where
    E: PgExecutor<'e>,
{
    let classes = sqlx::query_as::<_, DbClass>(
        r#"
        SELECT id, name, start_time, instructor, capacity, available_slots
        FROM classes
        WHERE start_time > $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(now)
    .fetch_all(executor)
    .await?;

    Ok(classes)
}
