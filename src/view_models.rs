// src/view_models.rs

use crate::model::Category;
use crate::progress::Timestamp;

#[derive(Clone, Debug)]
pub struct CourseInfo {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub progress: u8,
    pub completed: bool,
    pub modules_done: usize,
    pub module_count: usize,
}

#[derive(Clone, Debug)]
pub struct PathInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub progress: u8,
    pub started: bool,
    pub completed: bool,
    pub completed_modules: u32,
    pub total_modules: u32,
}

#[derive(Clone, Debug)]
pub struct BadgeCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub unlocked: bool,
    pub progress: u8,
    pub date_unlocked: Option<Timestamp>,
}

/// One answered question on the quiz summary.
#[derive(Clone, Debug)]
pub struct QuestionRow {
    pub number: usize,
    pub prompt: String,
    pub chosen: Option<String>,
    pub correct: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

impl CourseInfo {
    pub fn label(&self) -> String {
        if self.completed {
            format!("{} ✅", self.title)
        } else if self.modules_done > 0 {
            format!(
                "{} ({}/{} modules)",
                self.title, self.modules_done, self.module_count
            )
        } else {
            self.title.clone()
        }
    }
}

impl PathInfo {
    pub fn label(&self) -> String {
        if self.completed {
            format!("{} ✅", self.title)
        } else if self.started {
            format!("{} {}%", self.title, self.progress)
        } else {
            format!("{} 🔓", self.title)
        }
    }
}

impl BadgeCard {
    pub fn label(&self) -> String {
        match (self.unlocked, self.date_unlocked) {
            (true, Some(date)) => format!("🏅 {} ({})", self.title, date.format("%Y-%m-%d")),
            (true, None) => format!("🏅 {}", self.title),
            (false, _) => format!("🔒 {} {}%", self.title, self.progress),
        }
    }
}

impl QuestionRow {
    pub fn label(&self) -> String {
        let mark = if self.is_correct { "✅" } else { "❌" };
        format!("{}. {} {}", self.number, self.prompt, mark)
    }
}
