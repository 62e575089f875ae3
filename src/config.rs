// src/config.rs

use crate::store::{KeyValueStore, MemoryStore};
use log::warn;
use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "DIGITAL_LITERACY_DATA_DIR";
pub const KEY_PREFIX_VAR: &str = "DIGITAL_LITERACY_KEY_PREFIX";
pub const DEFAULT_DATA_DIR: &str = "digital_literacy_data";

/// Where progress lives. Native builds read the environment at start-up; the
/// web build takes the key prefix from the build environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory of the file backend and of exported snapshots.
    pub data_dir: PathBuf,
    pub key_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            key_prefix: String::new(),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl AppConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: lookup(DATA_DIR_VAR)
                .and_then(non_blank)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            key_prefix: lookup(KEY_PREFIX_VAR)
                .and_then(non_blank)
                .unwrap_or(defaults.key_prefix),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| match name {
            KEY_PREFIX_VAR => option_env!("DIGITAL_LITERACY_KEY_PREFIX").map(str::to_string),
            _ => None,
        })
    }

    /// Opens the persistent backend for this target. When it is unavailable
    /// the app keeps running on an in-memory store.
    pub fn open_backend(&self) -> Box<dyn KeyValueStore> {
        match self.open_persistent() {
            Ok(store) => store,
            Err(err) => {
                warn!("Storage unavailable, progress will not survive this session: {err}");
                Box::new(MemoryStore::new())
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn open_persistent(&self) -> Result<Box<dyn KeyValueStore>, crate::error::StoreError> {
        let store = crate::store::FileStore::open(self.data_dir.clone())?;
        log::info!("Progress stored in {}", store.dir().display());
        Ok(Box::new(store))
    }

    #[cfg(target_arch = "wasm32")]
    fn open_persistent(&self) -> Result<Box<dyn KeyValueStore>, crate::error::StoreError> {
        Ok(Box::new(crate::store::LocalStorage::open()?))
    }
}
