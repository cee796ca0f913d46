use crate::error::StoreResult;
use crate::models::DbUser;
use sqlx::PgExecutor;

pub async fn find_user_by_email<'e, E>(executor: E, email: &str) -> StoreResult<Option<DbUser>>
where
    E: PgExecutor<'e>,
{
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

pub async fn create_user<'e, E>(
    executor: E,
    name: &str,
    email: &str,
    password_hash: &str,
) -> StoreResult<i64>
where
    E: PgExecutor<'e>,
{
    tracing::debug!("Creating user: email={}", email);

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (name, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(executor)
    .await?;

    Ok(id)
}
