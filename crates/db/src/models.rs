use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbClass {
    pub id: i64,
    pub name: String,
    pub start_time: NaiveDateTime,
    pub instructor: String,
    pub capacity: i32,
    pub available_slots: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: i64,
    pub user_id: i64,
    pub class_id: i64,
    pub booking_date: NaiveDateTime,
}

/// The part of a class row read under lock by the booking transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct DbClassSlots {
    pub available_slots: i32,
    pub start_time: NaiveDateTime,
}

/// A booking joined with the class it reserves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DbUserBooking {
    pub class_name: String,
    pub instructor: String,
    pub class_start_time: NaiveDateTime,
    pub booking_date: NaiveDateTime,
}
