use super::KeyValueStore;
use crate::error::StoreError;
use std::collections::HashMap;

/// In-process backend. Also stands in when the real backend cannot be opened,
/// in which case progress lasts for the session only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following write fail as if the quota were exhausted.
    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Stores a value bypassing the write switch.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        self.items.remove(key);
        Ok(())
    }
}
