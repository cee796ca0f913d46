pub mod booking;
pub mod query;
