use serde::Serialize;

use crate::model::food_record::FoodRecord;

/// Sum of calories over `records`. Empty input is zero.
pub fn total(records: &[FoodRecord]) -> f64 {
    records.iter().map(|r| r.calories).sum()
}

/// `total / goal`, left unclamped: a day over goal reports a ratio above 1.
/// A goal that is not a positive finite number yields 0.
pub fn progress_ratio(total: f64, goal: f64) -> f64 {
    if !goal.is_finite() || goal <= 0.0 {
        return 0.0;
    }
    total / goal
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct IntakeSummary {
    pub total: f64,
    pub goal: f64,
    pub ratio: f64,
    pub remaining: f64,
    pub entries: usize,
}

impl IntakeSummary {
    pub fn new(records: &[FoodRecord], goal: f64) -> Self {
        let total = total(records);
        Self {
            total,
            goal,
            ratio: progress_ratio(total, goal),
            remaining: (goal - total).max(0.0),
            entries: records.len(),
        }
    }

    pub fn is_over_goal(&self) -> bool {
        self.total > self.goal
    }
}
