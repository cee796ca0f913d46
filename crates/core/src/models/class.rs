use serde::{Deserialize, Serialize};

/// A bookable class as shown to a caller, with its start time in the caller's zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassView {
    pub class_id: i64,
    pub name: String,
    pub start_time: String,
    pub instructor: String,
    pub available_slots: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListClassesQuery {
    pub timezone: Option<String>,
}
