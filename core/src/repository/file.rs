use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::repository::traits::KeyValueStore;

const VALUE_EXTENSION: &str = "json";

/// Key-value store keeping one file per key inside a data directory.
#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Opens (and creates) `base_dir`, or `~/.foodlog` when none is given.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match base_dir {
            Some(dir) => dir,
            None => crate::config::default_data_dir()?,
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Could not create data directory {}", dir.display()))?;
        Ok(FileKeyValueStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(anyhow!("Invalid storage key: '{}'", key));
        }
        Ok(self.dir.join(format!("{}.{}", key, VALUE_EXTENSION)))
    }
}

fn write_synced(path: &Path, value: &str) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    file.write_all(value.as_bytes())
        .with_context(|| format!("Could not write {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("Could not flush {}", path.display()))?;
    Ok(())
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Could not read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        // Write beside the target and rename so readers never see a partial value.
        let tmp_path = self.dir.join(format!(".{}.{}.tmp", key, VALUE_EXTENSION));
        let written = write_synced(&tmp_path, value).and_then(|()| {
            fs::rename(&tmp_path, &path)
                .with_context(|| format!("Could not replace {}", path.display()))
        });
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('.') {
                    keys.push(stem.to_string());
                }
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(Some(temp_dir.path().to_path_buf())).unwrap();
        store.set("foodItems_2024-03-02", "[]").unwrap();

        let reopened = FileKeyValueStore::new(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(
            reopened.get("foodItems_2024-03-02").unwrap(),
            Some("[]".to_string())
        );
        assert_eq!(reopened.keys().unwrap(), vec!["foodItems_2024-03-02".to_string()]);
    }

    #[test]
    fn test_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(store.get("foodItems_1999-01-01").unwrap(), None);
    }

    #[test]
    fn test_failed_replace_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(Some(temp_dir.path().to_path_buf())).unwrap();
        // A non-empty directory where the value file should go blocks the rename.
        let blocker = temp_dir.path().join("foodItems_2024-03-02.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        assert!(store.set("foodItems_2024-03-02", "[]").is_err());
        assert!(!temp_dir
            .path()
            .join(".foodItems_2024-03-02.json.tmp")
            .exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(Some(temp_dir.path().to_path_buf())).unwrap();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }
}
