use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SoundSettings {
    pub enabled: bool,
    /// 0..=100
    pub volume: u8,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 70,
        }
    }
}

impl SoundSettings {
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilitySettings {
    pub high_contrast: bool,
    pub large_text: bool,
    pub reduced_motion: bool,
    pub screen_reader: bool,
}

impl AccessibilitySettings {
    pub fn zoom_factor(&self) -> f32 {
        if self.large_text { 1.25 } else { 1.0 }
    }
}

/// Learner preferences. Every field defaults on its own so a document written
/// by an older build still loads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub theme: Theme,
    pub sound: SoundSettings,
    pub accessibility: AccessibilitySettings,
    pub auto_save: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            sound: SoundSettings::default(),
            accessibility: AccessibilitySettings::default(),
            auto_save: true,
        }
    }
}
