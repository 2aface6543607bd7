use anyhow::{anyhow, Result};

use crate::repository::traits::KeyValueStore;

/// Storage whose every call fails, for exercising error propagation.
pub struct FailingKeyValueStore;

impl KeyValueStore for FailingKeyValueStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(anyhow!("storage unavailable"))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("storage full"))
    }

    fn keys(&self) -> Result<Vec<String>> {
        Err(anyhow!("storage unavailable"))
    }
}
