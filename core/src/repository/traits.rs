use anyhow::Result;

/// Process-wide key to string-blob storage, injected into the stores that
/// need it.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replaces any previous value in full.
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}
