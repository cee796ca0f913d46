#[path = "../test_utils.rs"]
mod test_utils;

mod pg_booking_test;
mod query_test;
