use tracing::{debug, warn};

use crate::error::StoreError;
use crate::model::daily_log::{Envelope, StoredBlob, CURRENT_VERSION};
use crate::model::food_record::FoodRecord;
use crate::repository::traits::KeyValueStore;
use crate::time::DayKey;

pub const KEY_PREFIX: &str = "foodItems_";

pub fn storage_key(day: DayKey) -> String {
    format!("{}{}", KEY_PREFIX, day)
}

/// Persists each day's food records under `foodItems_<YYYY-MM-DD>`.
///
/// A save always replaces the whole list for the day.
pub struct FoodLogStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> FoodLogStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn save(&self, day: DayKey, records: &[FoodRecord]) -> Result<(), StoreError> {
        let key = storage_key(day);
        let envelope = Envelope {
            version: CURRENT_VERSION,
            items: records,
        };
        let encoded = serde_json::to_string(&envelope).map_err(|source| StoreError::Encode {
            key: key.clone(),
            source,
        })?;
        self.storage
            .set(&key, &encoded)
            .map_err(|source| StoreError::Write {
                key: key.clone(),
                source: source.into(),
            })?;
        debug!(%key, count = records.len(), "saved food log");
        Ok(())
    }

    /// An absent day is `Ok(vec![])`; an undecodable one is an error.
    pub fn load(&self, day: DayKey) -> Result<Vec<FoodRecord>, StoreError> {
        let key = storage_key(day);
        let raw = self
            .storage
            .get(&key)
            .map_err(|source| StoreError::Read {
                key: key.clone(),
                source: source.into(),
            })?;
        let Some(raw) = raw else {
            debug!(%key, "no food log stored");
            return Ok(Vec::new());
        };

        let blob = StoredBlob::parse(&raw).map_err(|source| StoreError::Corrupt {
            key: key.clone(),
            source,
        })?;
        let version = blob.version;
        if version > CURRENT_VERSION {
            return Err(StoreError::UnsupportedVersion { key, version });
        }
        let items = blob.into_records().map_err(|source| StoreError::Corrupt {
            key: key.clone(),
            source,
        })?;
        debug!(%key, version, count = items.len(), "loaded food log");
        Ok(items)
    }

    /// Like [`load`](Self::load) but treats any failure as an empty day.
    pub fn load_or_empty(&self, day: DayKey) -> Vec<FoodRecord> {
        match self.load(day) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "treating unreadable food log as empty");
                Vec::new()
            }
        }
    }

    /// Every day with a stored log, oldest first.
    pub fn days(&self) -> Result<Vec<DayKey>, StoreError> {
        let keys = self.storage.keys().map_err(|source| StoreError::Read {
            key: format!("{}*", KEY_PREFIX),
            source: source.into(),
        })?;
        let mut days: Vec<DayKey> = keys
            .iter()
            .filter_map(|k| k.strip_prefix(KEY_PREFIX))
            .filter_map(|d| d.parse().ok())
            .collect();
        days.sort();
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryKeyValueStore;
    use crate::repository::test_utils::FailingKeyValueStore;
    use chrono::{TimeZone, Utc};

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn record(name: &str, calories: f64) -> FoodRecord {
        let at = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();
        FoodRecord::new(name.to_string(), calories, at)
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(storage_key(day("2024-03-02")), "foodItems_2024-03-02");
    }

    #[test]
    fn test_round_trip() {
        let store = FoodLogStore::new(MemoryKeyValueStore::new());
        let records = vec![record("Apple", 95.0), record("Soup", 320.5)];
        store.save(day("2024-03-02"), &records).unwrap();
        assert_eq!(store.load(day("2024-03-02")).unwrap(), records);
    }

    #[test]
    fn test_save_twice_is_idempotent() {
        let store = FoodLogStore::new(MemoryKeyValueStore::new());
        let records = vec![record("Apple", 95.0)];
        store.save(day("2024-03-02"), &records).unwrap();
        store.save(day("2024-03-02"), &records).unwrap();
        assert_eq!(store.load(day("2024-03-02")).unwrap(), records);
    }

    #[test]
    fn test_save_replaces_whole_list() {
        let store = FoodLogStore::new(MemoryKeyValueStore::new());
        store
            .save(day("2024-03-02"), &[record("Apple", 95.0), record("Pie", 400.0)])
            .unwrap();
        let shorter = vec![record("Tea", 2.0)];
        store.save(day("2024-03-02"), &shorter).unwrap();
        assert_eq!(store.load(day("2024-03-02")).unwrap(), shorter);
    }

    #[test]
    fn test_absent_day_is_empty() {
        let store = FoodLogStore::new(MemoryKeyValueStore::new());
        assert!(store.load(day("1999-01-01")).unwrap().is_empty());
    }

    #[test]
    fn test_days_are_independent() {
        let store = FoodLogStore::new(MemoryKeyValueStore::new());
        store.save(day("2024-03-02"), &[record("Apple", 95.0)]).unwrap();
        assert!(store.load(day("2024-03-03")).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let kv = MemoryKeyValueStore::new();
        kv.set("foodItems_2024-03-02", "{not json").unwrap();
        let store = FoodLogStore::new(&kv);

        let err = store.load(day("2024-03-02")).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(store.load_or_empty(day("2024-03-02")).is_empty());
    }

    #[test]
    fn test_legacy_bare_array_loads() {
        let kv = MemoryKeyValueStore::new();
        kv.set(
            "foodItems_2024-03-02",
            r#"[{"id":"6f1c2b1e-4c55-4c8e-9a53-3d0f7d2a9b10","date":"2024-03-02T08:00:00Z","name":"Apple","calories":95.0}]"#,
        )
        .unwrap();
        let store = FoodLogStore::new(&kv);

        let items = store.load(day("2024-03-02")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Apple");
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let kv = MemoryKeyValueStore::new();
        kv.set("foodItems_2024-03-02", r#"{"version":99,"items":[]}"#)
            .unwrap();
        let store = FoodLogStore::new(&kv);

        let err = store.load(day("2024-03-02")).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedVersion { version: 99, .. }));
    }

    #[test]
    fn test_newer_version_with_new_record_shape_is_rejected() {
        let kv = MemoryKeyValueStore::new();
        kv.set(
            "foodItems_2024-03-02",
            r#"{"version":2,"items":[{"uid":"x","eatenAt":1709366400,"label":"Apple","kcal":95}]}"#,
        )
        .unwrap();
        let store = FoodLogStore::new(&kv);

        let err = store.load(day("2024-03-02")).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedVersion { version: 2, .. }));
    }

    #[test]
    fn test_bad_items_report_the_decode_error() {
        let kv = MemoryKeyValueStore::new();
        kv.set(
            "foodItems_2024-03-02",
            r#"{"version":1,"items":[{"id":"6f1c2b1e-4c55-4c8e-9a53-3d0f7d2a9b10","date":"2024-03-02T08:00:00Z","name":"Apple"}]}"#,
        )
        .unwrap();
        let store = FoodLogStore::new(&kv);

        let err = store.load(day("2024-03-02")).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.to_string().contains("calories"));
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let store = FoodLogStore::new(FailingKeyValueStore);
        let err = store.save(day("2024-03-02"), &[record("Apple", 95.0)]).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[test]
    fn test_read_failure_is_surfaced() {
        let store = FoodLogStore::new(FailingKeyValueStore);
        let err = store.load(day("2024-03-02")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
        assert!(matches!(store.days().unwrap_err(), StoreError::Read { .. }));
        assert!(store.load_or_empty(day("2024-03-02")).is_empty());
    }

    #[test]
    fn test_saved_value_carries_version() {
        let kv = MemoryKeyValueStore::new();
        let store = FoodLogStore::new(&kv);
        store.save(day("2024-03-02"), &[]).unwrap();

        let raw = kv.get("foodItems_2024-03-02").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], CURRENT_VERSION);
        assert_eq!(value["items"], serde_json::json!([]));
    }

    #[test]
    fn test_days_lists_only_food_logs() {
        let kv = MemoryKeyValueStore::new();
        kv.set("settings", "{}").unwrap();
        kv.set("foodItems_garbage", "[]").unwrap();
        let store = FoodLogStore::new(&kv);
        store.save(day("2024-03-02"), &[]).unwrap();
        store.save(day("2023-12-31"), &[]).unwrap();

        assert_eq!(
            store.days().unwrap(),
            vec![day("2023-12-31"), day("2024-03-02")]
        );
    }
}
