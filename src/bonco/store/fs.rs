use super::DataStore;
use crate::error::{BoncoError, Result};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

const ITEM_EXT: &str = ".json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The file backing `key`. Keys become file names, so path separators are refused.
    pub fn item_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(BoncoError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}{}", key, ITEM_EXT)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(BoncoError::Io)?;
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(BoncoError::Io)?;
        Ok(Some(content))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        self.ensure_dir()?;

        let tmp_file = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_file, value).map_err(BoncoError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(BoncoError::Io(e));
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        if path.exists() {
            fs::remove_file(path).map_err(BoncoError::Io)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rejects_keys_with_separators() {
        let store = FileStore::new(PathBuf::from("/tmp/unused"));
        assert!(store.item_path("a/b").is_err());
        assert!(store.item_path("..").is_err());
        assert!(store.item_path("").is_err());
        assert!(store.item_path("bonco_wrong_answers").is_ok());
    }

    #[test]
    fn creates_root_on_first_write() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("data");
        let mut store = FileStore::new(root.clone());

        store.set_item("k", "v").unwrap();

        assert!(root.join("k.json").exists());
        assert_eq!(store.get_item("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.remove_item("nothing").unwrap();
        assert_eq!(store.get_item("nothing").unwrap(), None);
    }
}
