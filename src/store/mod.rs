//! Persistence of the progress and settings documents.
//!
//! `ProgressStore` never fails towards its callers: unreadable documents read
//! as defaults and failed writes are logged and dropped, so a learner in a
//! restricted browser keeps playing and simply loses progress at the end of
//! the session.

use crate::error::StoreError;
use crate::progress::UserProgress;
use crate::settings::{AccessibilitySettings, UserSettings};
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;

pub mod feature;
#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;

pub use feature::FeatureKey;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;
pub use memory::MemoryStore;

pub const PROGRESS_KEY: &str = "user-progress";
pub const SETTINGS_KEY: &str = "user-settings";
/// Lists every feature document ever written so reset and export can find them.
pub const FEATURE_INDEX_KEY: &str = "feature-index";

/// String key-value backend (browser local storage, files, memory).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

impl KeyValueStore for Box<dyn KeyValueStore> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

pub struct ProgressStore<S> {
    backend: S,
    prefix: String,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_prefix(backend, "")
    }

    /// Namespaces every key, e.g. to keep two deployments on one origin apart.
    pub fn with_prefix(backend: S, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    fn read_raw(&self, name: &str) -> Option<String> {
        let key = self.key(name);
        match self.backend.get_item(&key) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Could not read `{key}`: {err}");
                None
            }
        }
    }

    fn read_document<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let raw = self.read_raw(name)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Discarding unreadable `{name}` document: {err}");
                None
            }
        }
    }

    fn write_document<T: Serialize>(&mut self, name: &str, value: &T) -> bool {
        let key = self.key(name);
        let result = serde_json::to_string(value)
            .map_err(StoreError::from)
            .and_then(|raw| self.backend.set_item(&key, &raw));
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!("Progress not saved (`{key}`): {err}");
                false
            }
        }
    }

    fn remove_document(&mut self, name: &str) -> bool {
        let key = self.key(name);
        match self.backend.remove_item(&key) {
            Ok(()) => true,
            Err(err) => {
                warn!("Could not remove `{key}`: {err}");
                false
            }
        }
    }

    /// Stored progress, or a fresh default document when it is missing or
    /// cannot be parsed.
    pub fn get_user_progress(&self) -> UserProgress {
        self.read_document(PROGRESS_KEY).unwrap_or_default()
    }

    /// Overwrites the whole document. Returns whether the write went through.
    pub fn save_user_progress(&mut self, progress: &UserProgress) -> bool {
        self.write_document(PROGRESS_KEY, progress)
    }

    /// The accessibility toggles are owned by their own document and override
    /// the copy inside the settings document.
    pub fn get_user_settings(&self) -> UserSettings {
        let mut settings: UserSettings = self.read_document(SETTINGS_KEY).unwrap_or_default();
        let accessibility_key = FeatureKey::Accessibility.storage_key();
        if let Some(accessibility) = self.read_document::<AccessibilitySettings>(&accessibility_key)
        {
            settings.accessibility = accessibility;
        }
        settings
    }

    pub fn update_user_settings(&mut self, settings: &UserSettings) -> bool {
        let saved = self.write_document(SETTINGS_KEY, settings);
        self.set_feature(&FeatureKey::Accessibility, &settings.accessibility) && saved
    }

    /// Replaces the progress document with defaults and clears every progress
    /// feature document. Settings are left alone.
    pub fn reset_user_progress(&mut self) -> bool {
        let mut ok = self.save_user_progress(&UserProgress::default());
        let index = self.feature_keys();
        let (cleared, kept): (BTreeSet<FeatureKey>, BTreeSet<FeatureKey>) =
            index.into_iter().partition(FeatureKey::is_progress);
        for key in &cleared {
            ok &= self.remove_document(&key.storage_key());
        }
        ok &= self.write_document(FEATURE_INDEX_KEY, &kept);
        info!(
            "Progress reset ({} feature documents cleared)",
            cleared.len()
        );
        ok
    }

    pub fn feature_keys(&self) -> BTreeSet<FeatureKey> {
        self.read_document(FEATURE_INDEX_KEY).unwrap_or_default()
    }

    pub fn get_feature<T: DeserializeOwned + Default>(&self, key: &FeatureKey) -> T {
        self.read_document(&key.storage_key()).unwrap_or_default()
    }

    /// Raw JSON of a feature document, for export.
    pub fn get_feature_raw(&self, key: &FeatureKey) -> Option<serde_json::Value> {
        self.read_document(&key.storage_key())
    }

    pub fn set_feature<T: Serialize>(&mut self, key: &FeatureKey, value: &T) -> bool {
        let mut index = self.feature_keys();
        if index.insert(key.clone()) && !self.write_document(FEATURE_INDEX_KEY, &index) {
            return false;
        }
        debug!("Writing feature document `{}`", key.storage_key());
        self.write_document(&key.storage_key(), value)
    }

    pub fn clear_feature(&mut self, key: &FeatureKey) -> bool {
        let mut index = self.feature_keys();
        let removed = self.remove_document(&key.storage_key());
        if index.remove(key) {
            return self.write_document(FEATURE_INDEX_KEY, &index) && removed;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::progress::{
        BadgeProgress, CourseProgress, LearningPathProgress, ModuleProgress, QuizProgress,
    };
    use crate::settings::Theme;
    use chrono::{TimeZone, Utc};

    fn sample_progress() -> UserProgress {
        let when = Utc.with_ymd_and_hms(2024, 5, 17, 14, 5, 9).unwrap();
        let mut progress = UserProgress::default();
        progress.time_spent = 42;
        progress.last_active = Some(when);
        progress.courses.insert(
            "online-safety-basics".into(),
            CourseProgress {
                completed: false,
                progress: 33,
                modules: [(
                    "passwords".to_string(),
                    ModuleProgress {
                        completed: true,
                        completed_at: Some(when),
                    },
                )]
                .into(),
            },
        );
        progress.badges.insert(
            "password-guardian".into(),
            BadgeProgress {
                unlocked: true,
                progress: 100,
                date_unlocked: Some(when),
                category: Category::OnlineSafety,
            },
        );
        progress.learning_paths.insert(
            "safe-explorer".into(),
            LearningPathProgress {
                started: true,
                completed: false,
                completed_modules: 1,
                last_accessed: when,
            },
        );
        progress.quizzes.insert(
            "password-quiz".into(),
            QuizProgress {
                completed: true,
                score: 75,
                correct_answers: 3,
                total_questions: 4,
                attempts: 2,
            },
        );
        progress
    }

    #[test]
    fn empty_storage_yields_default_document() {
        let store = ProgressStore::new(MemoryStore::new());
        let progress = store.get_user_progress();
        assert_eq!(progress.time_spent, 0);
        assert!(progress.courses.is_empty());
        assert!(progress.quizzes.is_empty());
        assert!(progress.badges.values().all(|b| !b.unlocked));
    }

    #[test]
    fn save_then_get_round_trips() {
        let mut store = ProgressStore::new(MemoryStore::new());
        let progress = sample_progress();
        assert!(store.save_user_progress(&progress));
        assert_eq!(store.get_user_progress(), progress);
    }

    #[test]
    fn corrupt_document_reads_as_default() {
        let mut backend = MemoryStore::new();
        backend.insert_raw(PROGRESS_KEY, "{not json");
        let store = ProgressStore::new(backend);
        assert_eq!(store.get_user_progress(), UserProgress::default());
    }

    #[test]
    fn failed_writes_are_swallowed() {
        let mut store = ProgressStore::new(MemoryStore::new());
        store.backend_mut().set_reject_writes(true);
        assert!(!store.save_user_progress(&sample_progress()));
        assert_eq!(store.get_user_progress(), UserProgress::default());
    }

    #[test]
    fn prefix_namespaces_keys() {
        let mut store = ProgressStore::with_prefix(MemoryStore::new(), "beta:");
        store.save_user_progress(&sample_progress());
        assert!(store.backend().raw("beta:user-progress").is_some());
        assert!(store.backend().raw(PROGRESS_KEY).is_none());
    }

    #[test]
    fn settings_take_accessibility_from_its_own_document() {
        let mut store = ProgressStore::new(MemoryStore::new());
        let mut settings = UserSettings::default();
        settings.theme = Theme::Dark;
        settings.accessibility.large_text = true;
        store.update_user_settings(&settings);
        assert_eq!(store.get_user_settings(), settings);

        store
            .backend_mut()
            .insert_raw("accessibility-settings", r#"{"highContrast":true}"#);
        let loaded = store.get_user_settings();
        assert!(loaded.accessibility.high_contrast);
        assert!(!loaded.accessibility.large_text);
        assert_eq!(loaded.theme, Theme::Dark);
    }

    #[test]
    fn features_default_when_missing() {
        let store = ProgressStore::new(MemoryStore::new());
        let xp: u64 = store.get_feature(&FeatureKey::GameXp("phish".into()));
        assert_eq!(xp, 0);
    }

    #[test]
    fn reset_clears_progress_features_but_keeps_preferences() {
        let mut store = ProgressStore::new(MemoryStore::new());
        store.save_user_progress(&sample_progress());
        store.set_feature(&FeatureKey::GameXp("phish".into()), &120u64);
        store.set_feature(&FeatureKey::GameStreak("phish".into()), &3u32);
        let mut settings = UserSettings::default();
        settings.accessibility.reduced_motion = true;
        store.update_user_settings(&settings);

        assert!(store.reset_user_progress());

        assert_eq!(store.get_user_progress(), UserProgress::default());
        assert!(store.backend().raw("phish-xp").is_none());
        assert!(store.backend().raw("phish-streak").is_none());
        assert_eq!(
            store.feature_keys().into_iter().collect::<Vec<_>>(),
            vec![FeatureKey::Accessibility]
        );
        assert!(store.get_user_settings().accessibility.reduced_motion);
    }

    #[test]
    fn clearing_a_feature_drops_it_from_the_index() {
        let mut store = ProgressStore::new(MemoryStore::new());
        let key = FeatureKey::AssessmentProgress("safety".into());
        store.set_feature(&key, &vec![1, 2, 3]);
        assert!(store.feature_keys().contains(&key));

        assert!(store.clear_feature(&key));

        assert!(!store.feature_keys().contains(&key));
        assert!(store.get_feature_raw(&key).is_none());
    }
}
