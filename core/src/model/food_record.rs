use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One eaten-food entry.
///
/// The store persists whatever it is handed; validating `name` and
/// `calories` is the job of [`crate::input::parse_food_input`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FoodRecord {
    pub id: Uuid,
    #[serde(rename = "date", alias = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub calories: f64,
}

impl FoodRecord {
    /// `timestamp` is resolved by the caller, usually `Utc::now()` at the boundary.
    pub fn new(name: String, calories: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            name,
            calories,
        }
    }
}
