use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::food_record::FoodRecord;
use crate::time::DayKey;

/// Schema version written by this build.
pub const CURRENT_VERSION: u32 = 1;

/// The food records of one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLog {
    pub day: DayKey,
    pub items: Vec<FoodRecord>,
}

impl DailyLog {
    pub fn total_calories(&self) -> f64 {
        crate::service::intake::total(&self.items)
    }
}

/// On-disk shape of a day's value.
#[derive(Serialize, Debug)]
pub(crate) struct Envelope<'a> {
    pub version: u32,
    pub items: &'a [FoodRecord],
}

/// A stored day split into its version and still-undecoded items, so the
/// version can be checked before the record shape is trusted.
///
/// Version 0 is the unversioned bare array.
#[derive(Debug)]
pub(crate) struct StoredBlob {
    pub version: u32,
    items: Value,
}

#[derive(Deserialize)]
struct Header {
    version: u32,
    items: Value,
}

impl StoredBlob {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        if value.is_array() {
            return Ok(Self {
                version: 0,
                items: value,
            });
        }
        let header: Header = serde_json::from_value(value)?;
        Ok(Self {
            version: header.version,
            items: header.items,
        })
    }

    pub fn into_records(self) -> Result<Vec<FoodRecord>, serde_json::Error> {
        serde_json::from_value(self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array_is_version_zero() {
        let blob = StoredBlob::parse("[]").unwrap();
        assert_eq!(blob.version, 0);
        assert!(blob.into_records().unwrap().is_empty());
    }

    #[test]
    fn test_version_read_without_decoding_items() {
        let blob = StoredBlob::parse(r#"{"version":2,"items":[{"uid":"x","kcal":95}]}"#).unwrap();
        assert_eq!(blob.version, 2);
        assert!(blob.into_records().is_err());
    }

    #[test]
    fn test_missing_version_names_the_field() {
        let err = StoredBlob::parse(r#"{"items":[]}"#).unwrap_err();
        assert!(err.to_string().contains("version"));
    }
}
