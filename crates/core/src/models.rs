pub mod booking;
pub mod class;
