use serde::{Deserialize, Serialize};

/// Per-feature documents that live next to the main progress document under
/// their own storage keys.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(tag = "kind", content = "id", rename_all = "kebab-case")]
pub enum FeatureKey {
    Accessibility,
    GameStreak(String),
    GameAchievements(String),
    GameXp(String),
    GameLevel(String),
    AssessmentProgress(String),
}

impl FeatureKey {
    pub fn storage_key(&self) -> String {
        match self {
            FeatureKey::Accessibility => "accessibility-settings".to_string(),
            FeatureKey::GameStreak(game) => format!("{game}-streak"),
            FeatureKey::GameAchievements(game) => format!("{game}-achievements"),
            FeatureKey::GameXp(game) => format!("{game}-xp"),
            FeatureKey::GameLevel(game) => format!("{game}-level"),
            FeatureKey::AssessmentProgress(course) => format!("assessment-progress-{course}"),
        }
    }

    /// Progress documents are wiped by a reset; preferences survive it.
    pub fn is_progress(&self) -> bool {
        !matches!(self, FeatureKey::Accessibility)
    }

    pub fn game_keys(game_id: &str) -> [FeatureKey; 4] {
        [
            FeatureKey::GameStreak(game_id.to_string()),
            FeatureKey::GameAchievements(game_id.to_string()),
            FeatureKey::GameXp(game_id.to_string()),
            FeatureKey::GameLevel(game_id.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_follow_the_legacy_layout() {
        assert_eq!(FeatureKey::Accessibility.storage_key(), "accessibility-settings");
        assert_eq!(FeatureKey::GameXp("phish".into()).storage_key(), "phish-xp");
        assert_eq!(
            FeatureKey::AssessmentProgress("safety".into()).storage_key(),
            "assessment-progress-safety"
        );
    }

    #[test]
    fn index_entries_serialize_as_tagged_objects() {
        let json = serde_json::to_string(&FeatureKey::GameLevel("phish".into())).unwrap();
        assert_eq!(json, r#"{"kind":"game-level","id":"phish"}"#);
        let back: FeatureKey = serde_json::from_str(r#"{"kind":"accessibility"}"#).unwrap();
        assert_eq!(back, FeatureKey::Accessibility);
    }
}
