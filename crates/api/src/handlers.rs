pub mod bookings;
pub mod classes;
