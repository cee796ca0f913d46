//! # Fitness Studio Core
//!
//! Shared building blocks for the booking service: the error taxonomy,
//! request and response models, input validation, and the time conversion
//! helpers that move timestamps between canonical UTC and a caller's zone.

pub mod errors;
pub mod models;
pub mod time;
pub mod validation;
