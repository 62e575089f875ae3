// src/progress.rs

use crate::model::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Timestamp = DateTime<Utc>;

/// Clamps any signed quantity into the 0..=100 percent range.
pub fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// `round(part / total * 100)` with halves rounded up; 0 when `total` is 0.
pub fn percent_of(part: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (part.saturating_mul(200) + total) / (total * 2);
    clamp_percent(i64::try_from(rounded).unwrap_or(i64::MAX))
}

/// The single progress document of one browser profile.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    pub courses: BTreeMap<String, CourseProgress>,
    pub quizzes: BTreeMap<String, QuizProgress>,
    pub games: BTreeMap<String, GameProgress>,
    pub learning_paths: BTreeMap<String, LearningPathProgress>,
    pub badges: BTreeMap<String, BadgeProgress>,
    /// Minutes, never decreases outside of a reset.
    pub time_spent: u32,
    pub last_active: Option<Timestamp>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseProgress {
    pub completed: bool,
    pub progress: u8,
    pub modules: BTreeMap<String, ModuleProgress>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleProgress {
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizProgress {
    pub completed: bool,
    pub score: u8,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub attempts: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GameProgress {
    pub completed: bool,
    pub score: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathProgress {
    pub started: bool,
    pub completed: bool,
    pub completed_modules: u32,
    pub last_accessed: Timestamp,
}

impl LearningPathProgress {
    pub fn new(now: Timestamp) -> Self {
        Self {
            started: false,
            completed: false,
            completed_modules: 0,
            last_accessed: now,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BadgeProgress {
    pub unlocked: bool,
    pub progress: u8,
    pub date_unlocked: Option<Timestamp>,
    pub category: Category,
}

impl BadgeProgress {
    pub fn new(category: Category) -> Self {
        Self {
            unlocked: false,
            progress: 0,
            date_unlocked: None,
            category,
        }
    }
}

/// In-flight state of a course assessment, kept under its own storage key so
/// a learner can leave and resume.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentProgress {
    pub quiz_id: String,
    pub current_question: usize,
    pub answers: Vec<Option<usize>>,
}

impl UserProgress {
    pub fn quiz_completed(&self, quiz_id: &str) -> bool {
        self.quizzes.get(quiz_id).is_some_and(|q| q.completed)
    }

    pub fn quiz_score(&self, quiz_id: &str) -> u8 {
        self.quizzes.get(quiz_id).map(|q| q.score).unwrap_or(0)
    }

    pub fn game_completed(&self, game_id: &str) -> bool {
        self.games.get(game_id).is_some_and(|g| g.completed)
    }

    pub fn course_completed(&self, course_id: &str) -> bool {
        self.courses.get(course_id).is_some_and(|c| c.completed)
    }

    pub fn learning_path_completed(&self, path_id: &str) -> bool {
        self.learning_paths.get(path_id).is_some_and(|p| p.completed)
    }

    pub fn badge_unlocked(&self, badge_id: &str) -> bool {
        self.badges.get(badge_id).is_some_and(|b| b.unlocked)
    }
}
