use chrono::{Days, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use eyre::{Result, WrapErr};
use fitstudio_core::time::local_to_canonical;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::repositories::class::create_class;
use crate::repositories::user::create_user;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(255) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            CONSTRAINT users_email_key UNIQUE (email)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create classes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS classes (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            start_time TIMESTAMP(0) WITHOUT TIME ZONE NOT NULL,
            instructor VARCHAR(100) NOT NULL,
            capacity INTEGER NOT NULL,
            available_slots INTEGER NOT NULL,
            CONSTRAINT positive_capacity CHECK (capacity > 0),
            CONSTRAINT slots_within_capacity CHECK (available_slots >= 0 AND available_slots <= capacity)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id),
            class_id BIGINT NOT NULL REFERENCES classes(id),
            booking_date TIMESTAMP(0) WITHOUT TIME ZONE NOT NULL DEFAULT (NOW() AT TIME ZONE 'UTC'),
            CONSTRAINT bookings_user_class_key UNIQUE (user_id, class_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_classes_start_time ON classes(start_time);")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_bookings_class_id ON bookings(class_id);")
        .execute(pool)
        .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

/// Drops every table and recreates the schema empty.
pub async fn reset_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Dropping existing tables...");

    sqlx::query("DROP TABLE IF EXISTS bookings, classes, users;")
        .execute(pool)
        .await?;

    initialize_database(pool).await
}

/// A sample class: name, days from today, local start time, instructor, capacity, free slots.
type SeedClass = (&'static str, i64, (u32, u32), &'static str, i32, i32);

const SEED_CLASSES: &[SeedClass] = &[
    ("Yoga Flow", 1, (8, 0), "Chloe", 20, 20),
    ("HIIT Blast", 1, (18, 30), "Mike", 15, 15),
    ("Spin Cycle", 2, (7, 0), "David", 25, 25),
    // some spots already taken
    ("CrossFit", 2, (19, 0), "Sarah", 12, 10),
    ("Meditation", 8, (20, 0), "Anya", 30, 30),
    ("Power Lifting", 3, (17, 0), "Mike", 5, 0),
    // already happened, never listed
    ("Morning Zumba", -1, (9, 0), "Isabella", 25, 5),
];

const SEED_USERS: &[(&str, &str)] = &[
    ("Alice Johnson", "alice@example.com"),
    ("Bob Williams", "bob@example.com"),
    ("Charlie Brown", "charlie@example.com"),
    ("Diana Prince", "diana@example.com"),
];

fn seed_date(today: NaiveDate, offset_days: i64) -> Option<NaiveDate> {
    let days = Days::new(offset_days.unsigned_abs());
    if offset_days >= 0 {
        today.checked_add_days(days)
    } else {
        today.checked_sub_days(days)
    }
}

/// Loads the sample studio. Class times are wall-clock times in `studio_tz`,
/// laid out around today's date in that zone.
pub async fn seed_data(pool: &Pool<Postgres>, studio_tz: &Tz) -> Result<()> {
    let today = Utc::now().with_timezone(studio_tz).date_naive();

    for (name, offset_days, (hour, minute), instructor, capacity, available) in SEED_CLASSES {
        let date = seed_date(today, *offset_days)
            .ok_or_else(|| eyre::eyre!("Seed date out of range for {}", name))?;
        let time = NaiveTime::from_hms_opt(*hour, *minute, 0)
            .ok_or_else(|| eyre::eyre!("Invalid seed time for {}", name))?;
        let start_time = local_to_canonical(&date.and_time(time), studio_tz)
            .map_err(|e| eyre::eyre!("Cannot place {} in {}: {}", name, studio_tz.name(), e))?;

        create_class(pool, name, start_time, instructor, *capacity, *available)
            .await
            .wrap_err_with(|| format!("Failed to seed class {}", name))?;
    }

    for (name, email) in SEED_USERS {
        create_user(pool, name, email, "dummy_hash")
            .await
            .wrap_err_with(|| format!("Failed to seed user {}", email))?;
    }

    info!(
        "Seeded {} classes and {} users",
        SEED_CLASSES.len(),
        SEED_USERS.len()
    );
    Ok(())
}
