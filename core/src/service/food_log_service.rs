use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::model::daily_log::DailyLog;
use crate::model::food_record::FoodRecord;
use crate::repository::{FoodLogStore, KeyValueStore};
use crate::service::intake::IntakeSummary;
use crate::time::DayKey;

/// Drives the append, total and persist flow for a day's food log.
///
/// Appends to the same day are serialized so that two writers, each saving
/// the full list, cannot drop each other's records.
pub struct FoodLogService<S: KeyValueStore> {
    store: FoodLogStore<S>,
    goal: f64,
    day_locks: Mutex<HashMap<DayKey, Arc<Mutex<()>>>>,
}

impl<S: KeyValueStore> FoodLogService<S> {
    pub fn new(store: FoodLogStore<S>, goal: f64) -> Self {
        Self {
            store,
            goal,
            day_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn goal(&self) -> f64 {
        self.goal
    }

    pub fn store(&self) -> &FoodLogStore<S> {
        &self.store
    }

    fn lock_for(&self, day: DayKey) -> Result<Arc<Mutex<()>>> {
        let mut locks = self
            .day_locks
            .lock()
            .map_err(|_| anyhow!("day lock table poisoned"))?;
        Ok(locks.entry(day).or_default().clone())
    }

    /// Appends `record` to `day`, persists the full list and returns the
    /// day's updated summary.
    pub fn log_food(&self, day: DayKey, record: FoodRecord) -> Result<IntakeSummary> {
        let lock = self.lock_for(day)?;
        let _guard = lock
            .lock()
            .map_err(|_| anyhow!("lock for {} poisoned", day))?;

        let mut items = self
            .store
            .load(day)
            .with_context(|| format!("Could not load food log for {}", day))?;
        info!(%day, name = %record.name, calories = record.calories, "logging food");
        items.push(record);
        self.store
            .save(day, &items)
            .with_context(|| format!("Could not save food log for {}", day))?;

        Ok(IntakeSummary::new(&items, self.goal))
    }

    pub fn get_log(&self, day: DayKey) -> Result<DailyLog> {
        let items = self
            .store
            .load(day)
            .with_context(|| format!("Could not load food log for {}", day))?;
        Ok(DailyLog { day, items })
    }

    pub fn intake(&self, day: DayKey) -> Result<IntakeSummary> {
        let log = self.get_log(day)?;
        Ok(IntakeSummary::new(&log.items, self.goal))
    }

    /// Summary of every stored day, oldest first.
    pub fn history(&self) -> Result<Vec<(DayKey, IntakeSummary)>> {
        let mut history = Vec::new();
        for day in self.store.days()? {
            history.push((day, self.intake(day)?));
        }
        Ok(history)
    }
}
