//! File-backed store.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::storage::{KeyValueStore, StorageError};

/// One JSON file per key inside a data directory.
///
/// Writes land in a sibling temp file that is renamed over the slot, so a
/// reader never observes a partial value.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory when needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();

        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(key)?) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn values_survive_reopening() -> TestResult {
        let dir = TempDir::new()?;

        FileStore::open(dir.path())?.set("auth_token", "abc")?;

        let reopened = FileStore::open(dir.path())?;

        assert_eq!(reopened.get("auth_token")?.as_deref(), Some("abc"));
        assert!(dir.path().join("auth_token.json").exists());
        assert!(!dir.path().join("auth_token.json.tmp").exists());

        Ok(())
    }

    #[test]
    fn missing_key_reads_as_none() -> TestResult {
        let dir = TempDir::new()?;
        let store = FileStore::open(dir.path())?;

        assert_eq!(store.get("lastOrder")?, None);

        Ok(())
    }

    #[test]
    fn remove_deletes_slot_and_tolerates_missing() -> TestResult {
        let dir = TempDir::new()?;
        let store = FileStore::open(dir.path())?;

        store.set("cart", "[]")?;
        store.remove("cart")?;
        store.remove("cart")?;

        assert_eq!(store.get("cart")?, None);

        Ok(())
    }

    #[test]
    fn path_like_keys_are_rejected() -> TestResult {
        let dir = TempDir::new()?;
        let store = FileStore::open(dir.path())?;

        for key in ["../escape", ".hidden", "", "a/b"] {
            let result = store.set(key, "x");

            assert!(
                matches!(result, Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected, got {result:?}"
            );
        }

        Ok(())
    }

    #[test]
    fn creates_nested_data_directory() -> TestResult {
        let dir = TempDir::new()?;
        let store = FileStore::open(dir.path().join("nested").join("data"))?;

        store.set("auth-storage", "{}")?;

        assert!(store.root().ends_with("nested/data"));
        assert_eq!(store.get("auth-storage")?.as_deref(), Some("{}"));

        Ok(())
    }
}
