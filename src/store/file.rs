use super::KeyValueStore;
use crate::error::StoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Native backend: one `<key>.json` file per key inside a data directory.
///
/// Writes go to a sibling `.tmp` file that is renamed over the target, so a
/// crash leaves either the old or the new document.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

/// Reversible file name for `key`: ASCII alphanumerics and `-` pass through,
/// every other byte becomes `_XX` (uppercase hex).
fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{byte:02X}"));
        }
    }
    stem
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let target = self.path(key);
        let tmp = target.with_extension("json.tmp");
        fs::write(&tmp, value)
            .and_then(|()| fs::rename(&tmp, &target))
            .map_err(|e| {
                let _ = fs::remove_file(&tmp);
                StoreError::Write {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
            })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path()).unwrap();
            store.set_item("user-progress", "{}").unwrap();
        }
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get_item("user-progress").unwrap().as_deref(), Some("{}"));
        assert!(dir.path().join("user-progress.json").exists());
    }

    #[test]
    fn missing_keys_read_as_none_and_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("nested")).unwrap();
        assert!(store.get_item("absent").unwrap().is_none());
        store.remove_item("absent").unwrap();
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set_item("../outside", "1").unwrap();
        assert!(dir.path().join("_2E_2E_2Foutside.json").exists());
    }

    #[test]
    fn similar_keys_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        let keys = ["beta:", "beta_", "a.b", "a_b", "a_2Eb"];
        for (i, key) in keys.iter().enumerate() {
            store.set_item(key, &i.to_string()).unwrap();
        }
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(store.get_item(key).unwrap(), Some(i.to_string()));
        }
    }

    #[test]
    fn writes_replace_the_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set_item("user-progress", r#"{"timeSpent":1}"#).unwrap();
        store.set_item("user-progress", r#"{"timeSpent":2}"#).unwrap();

        assert_eq!(
            store.get_item("user-progress").unwrap().as_deref(),
            Some(r#"{"timeSpent":2}"#)
        );
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["user-progress.json"]);
    }
}
