//! Entry point for every progress mutation.
//!
//! Each operation reads the full document, changes it and writes it back.
//! Two trackers on the same storage partition (two browser tabs) overwrite each
//! other's changes; the last write wins.

use crate::activity::{self, PageVisit};
use crate::badges;
use crate::courses;
use crate::error::ValidationError;
use crate::export::ExportSnapshot;
use crate::games::{self, GameOutcome, GameStats};
use crate::learning_path::{self, LearningPathEntry};
use crate::model::{Catalog, Category};
use crate::progress::{AssessmentProgress, BadgeProgress, Timestamp, UserProgress};
use crate::scoring::{self, Answer, QuizResult};
use crate::settings::UserSettings;
use crate::store::{FeatureKey, KeyValueStore, ProgressStore};
use chrono::Utc;
use log::{debug, info};
use std::cell::Cell;
use std::time::Duration;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

/// A scored quiz attempt together with the badges it unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSubmission {
    pub result: QuizResult,
    pub time_bonus: u32,
    pub new_badges: Vec<String>,
}

pub struct Tracker<S, C = SystemClock> {
    store: ProgressStore<S>,
    catalog: Catalog,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> Tracker<S, C> {
    pub fn new(store: ProgressStore<S>, catalog: Catalog, clock: C) -> Self {
        Self {
            store,
            catalog,
            clock,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &ProgressStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProgressStore<S> {
        &mut self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn progress(&self) -> UserProgress {
        self.store.get_user_progress()
    }

    pub fn settings(&self) -> UserSettings {
        self.store.get_user_settings()
    }

    pub fn update_settings(&mut self, settings: &UserSettings) -> bool {
        self.store.update_user_settings(settings)
    }

    /// Recomputes every learning-path summary inside `progress`.
    fn refresh_paths_in(&self, progress: &mut UserProgress, now: Timestamp) {
        for path in &self.catalog.learning_paths {
            let entry = learning_path::entry_for(path, progress);
            let untouched = entry.progress == 0 && !progress.learning_paths.contains_key(&path.id);
            if !untouched {
                learning_path::save_learning_path_progress(progress, &entry, now);
            }
        }
    }

    /// Stores the attempt (last write wins), then evaluates badges. Returns the
    /// badges unlocked by this attempt.
    pub fn save_quiz_result(&mut self, result: &QuizResult) -> Vec<String> {
        let now = self.clock.now();
        let mut progress = self.store.get_user_progress();
        scoring::record_quiz_result(&mut progress, result);
        self.refresh_paths_in(&mut progress, now);
        self.store.save_user_progress(&progress);
        info!(
            "Quiz {} saved: {}% ({}/{})",
            result.quiz_id, result.score, result.correct_answers, result.total_questions
        );
        self.update_all_badge_progress()
    }

    /// Scores and stores an answer set for a catalog quiz. Quizzes with a time
    /// limit earn a bonus for time left.
    pub fn submit_quiz(
        &mut self,
        quiz_id: &str,
        answers: &[Answer],
        elapsed: Duration,
    ) -> Result<QuizSubmission, ValidationError> {
        let quiz = self
            .catalog
            .quiz(quiz_id)
            .ok_or_else(|| ValidationError::UnknownQuiz(quiz_id.to_string()))?;
        let bonus = quiz
            .time_limit
            .map(|limit| scoring::time_bonus(elapsed, Duration::from_secs(u64::from(limit))))
            .unwrap_or(0);
        let seconds = u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX);
        let result = scoring::calculate_quiz_score(quiz_id, answers, &quiz.questions, bonus)?
            .with_time_taken(seconds);

        if let Some(course) = self.catalog.course_for_assessment(quiz_id) {
            let key = FeatureKey::AssessmentProgress(course.id.clone());
            self.store.clear_feature(&key);
        }
        let new_badges = self.save_quiz_result(&result);
        Ok(QuizSubmission {
            result,
            time_bonus: bonus,
            new_badges,
        })
    }

    pub fn complete_module(
        &mut self,
        course_id: &str,
        module_id: &str,
    ) -> Result<Vec<String>, ValidationError> {
        let course = self
            .catalog
            .course(course_id)
            .ok_or_else(|| ValidationError::UnknownCourse(course_id.to_string()))?;
        let now = self.clock.now();
        let mut progress = self.store.get_user_progress();
        if courses::complete_module(&mut progress, course, module_id, now)? {
            self.store.save_user_progress(&progress);
            debug!("Module {course_id}/{module_id} completed");
        }
        Ok(self.update_all_badge_progress())
    }

    pub fn game_stats(&self, game_id: &str) -> GameStats {
        GameStats {
            streak: self.store.get_feature(&FeatureKey::GameStreak(game_id.into())),
            xp: self.store.get_feature(&FeatureKey::GameXp(game_id.into())),
            level: self
                .store
                .get_feature::<u32>(&FeatureKey::GameLevel(game_id.into()))
                .max(1),
            achievements: self
                .store
                .get_feature(&FeatureKey::GameAchievements(game_id.into())),
        }
    }

    pub fn record_game_result(
        &mut self,
        game_id: &str,
        score: u8,
    ) -> Result<GameOutcome, ValidationError> {
        let game = self
            .catalog
            .game(game_id)
            .ok_or_else(|| ValidationError::UnknownGame(game_id.to_string()))?;
        let now = self.clock.now();
        let mut progress = self.store.get_user_progress();
        let passed = games::apply_game_result(&mut progress, game, score);
        self.refresh_paths_in(&mut progress, now);
        self.store.save_user_progress(&progress);

        let mut stats = self.game_stats(game_id);
        let new_achievements = games::advance_stats(&mut stats, score, passed);
        let [streak, achievements, xp, level] = FeatureKey::game_keys(game_id);
        self.store.set_feature(&streak, &stats.streak);
        self.store.set_feature(&achievements, &stats.achievements);
        self.store.set_feature(&xp, &stats.xp);
        self.store.set_feature(&level, &stats.level);

        let new_badges = self.update_all_badge_progress();
        Ok(GameOutcome {
            game_id: game_id.to_string(),
            score: score.min(100),
            passed,
            stats,
            new_achievements,
            new_badges,
        })
    }

    pub fn update_adventure_time(&mut self, minutes: u32) {
        let mut progress = self.store.get_user_progress();
        activity::update_adventure_time(&mut progress, minutes, self.clock.now());
        self.store.save_user_progress(&progress);
    }

    pub fn begin_visit(&self) -> PageVisit {
        PageVisit::begin(self.clock.now())
    }

    /// Credits a finished page visit and returns the minutes recorded.
    pub fn finish_visit(&mut self, visit: PageVisit) -> u32 {
        let minutes = visit.minutes_until(self.clock.now());
        self.update_adventure_time(minutes);
        if minutes > 0 {
            // Time-based badges may have crossed their threshold.
            self.update_all_badge_progress();
        }
        minutes
    }

    pub fn learning_path_progress(&self, path_id: &str) -> Result<u8, ValidationError> {
        let path = self
            .catalog
            .learning_path(path_id)
            .ok_or_else(|| ValidationError::UnknownLearningPath(path_id.to_string()))?;
        let progress = self.store.get_user_progress();
        Ok(learning_path::calculate_learning_path_progress(
            &progress,
            &path.games,
            &path.quizzes,
        ))
    }

    /// Recomputes and stores the summary of one path; also marks it accessed.
    pub fn refresh_learning_path(
        &mut self,
        path_id: &str,
    ) -> Result<LearningPathEntry, ValidationError> {
        let path = self
            .catalog
            .learning_path(path_id)
            .ok_or_else(|| ValidationError::UnknownLearningPath(path_id.to_string()))?;
        let mut progress = self.store.get_user_progress();
        let entry = learning_path::entry_for(path, &progress);
        learning_path::save_learning_path_progress(&mut progress, &entry, self.clock.now());
        self.store.save_user_progress(&progress);
        Ok(entry)
    }

    /// Recomputes every path that has been started or has progress.
    pub fn refresh_all_learning_paths(&mut self) {
        let mut progress = self.store.get_user_progress();
        self.refresh_paths_in(&mut progress, self.clock.now());
        self.store.save_user_progress(&progress);
    }

    /// Runs the badge catalogue over the stored progress. Writes only when
    /// something changed, so repeated calls are free.
    pub fn update_all_badge_progress(&mut self) -> Vec<String> {
        let before = self.store.get_user_progress();
        let mut progress = before.clone();
        let unlocked = badges::update_all_badge_progress(
            &mut progress,
            &self.catalog.badges,
            self.clock.now(),
        );
        if progress != before {
            self.store.save_user_progress(&progress);
        }
        unlocked
    }

    pub fn overall_badge_progress(&self) -> u8 {
        badges::get_overall_progress(&self.store.get_user_progress(), &self.catalog.badges)
    }

    pub fn category_progress(&self, category: Category) -> u8 {
        badges::category_progress(
            &self.store.get_user_progress(),
            &self.catalog.badges,
            category,
        )
    }

    pub fn unlocked_badges(&self) -> Vec<(String, BadgeProgress)> {
        let progress = self.store.get_user_progress();
        badges::get_unlocked_badges(&progress)
            .into_iter()
            .map(|(id, badge)| (id.to_string(), badge.clone()))
            .collect()
    }

    pub fn assessment_progress(&self, course_id: &str) -> AssessmentProgress {
        self.store
            .get_feature(&FeatureKey::AssessmentProgress(course_id.to_string()))
    }

    pub fn save_assessment_progress(
        &mut self,
        course_id: &str,
        assessment: &AssessmentProgress,
    ) -> bool {
        self.store.set_feature(
            &FeatureKey::AssessmentProgress(course_id.to_string()),
            assessment,
        )
    }

    pub fn reset_progress(&mut self) -> bool {
        self.store.reset_user_progress()
    }

    pub fn export(&self) -> ExportSnapshot {
        ExportSnapshot::capture(&self.store, self.clock.now())
    }
}
