use crate::error::StoreError;
use crate::progress::{Timestamp, UserProgress};
use crate::settings::UserSettings;
use crate::store::{KeyValueStore, ProgressStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only snapshot a learner can download. There is no import path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub exported_at: Timestamp,
    pub progress: UserProgress,
    pub settings: UserSettings,
    /// Feature documents keyed by storage key.
    pub features: BTreeMap<String, serde_json::Value>,
}

impl ExportSnapshot {
    pub fn capture<S: KeyValueStore>(store: &ProgressStore<S>, now: Timestamp) -> Self {
        let features = store
            .feature_keys()
            .iter()
            .filter_map(|key| {
                store
                    .get_feature_raw(key)
                    .map(|value| (key.storage_key(), value))
            })
            .collect();
        Self {
            exported_at: now,
            progress: store.get_user_progress(),
            settings: store.get_user_settings(),
            features,
        }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn file_name(&self) -> String {
        format!(
            "digital-literacy-progress-{}.json",
            self.exported_at.format("%Y-%m-%d")
        )
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn write_to(&self, dir: &std::path::Path) -> Result<std::path::PathBuf, StoreError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.to_json()?)?;
        log::info!("Progress exported to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FeatureKey, MemoryStore};
    use chrono::{TimeZone, Utc};

    #[test]
    fn snapshot_includes_feature_documents() {
        let mut store = ProgressStore::new(MemoryStore::new());
        let mut progress = UserProgress::default();
        progress.time_spent = 5;
        store.save_user_progress(&progress);
        store.set_feature(&FeatureKey::GameXp("phish".into()), &30u64);

        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let snapshot = ExportSnapshot::capture(&store, now);

        assert_eq!(snapshot.progress.time_spent, 5);
        assert_eq!(snapshot.features["phish-xp"], serde_json::json!(30));
        assert_eq!(snapshot.file_name(), "digital-literacy-progress-2024-06-01.json");

        let json = snapshot.to_json().unwrap();
        let back: ExportSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn snapshot_is_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::new(MemoryStore::new());
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let path = ExportSnapshot::capture(&store, now).write_to(dir.path()).unwrap();
        let raw = std::fs::read_to_string(path).unwrap();
        assert!(raw.contains("\"exportedAt\""));
    }
}
