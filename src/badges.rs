//! Badge catalogue and unlock engine.
//!
//! Badges are declared as data (`BadgeRule`) and evaluated by one generic
//! loop. Rules that read other badges (meta badges) run in a second pass that
//! repeats until no meta badge unlocks, so declaration order never matters.

use crate::error::BadgeError;
use crate::model::Category;
use crate::progress::{BadgeProgress, Timestamp, UserProgress, percent_of};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unlock condition of a badge. Every rule evaluates to a 0..=100 percentage;
/// 100 unlocks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BadgeRule {
    QuizzesCompleted { quizzes: Vec<String> },
    QuizScoreAtLeast { quiz: String, score: u8 },
    AnyQuizScoreAtLeast { score: u8 },
    AverageQuizScoreAtLeast { quizzes: Vec<String>, score: u8 },
    CoursesCompleted { courses: Vec<String> },
    GamesCompleted { games: Vec<String> },
    LearningPathsCompleted { paths: Vec<String> },
    TimeSpentAtLeast { minutes: u32 },
    BadgesUnlocked { badges: Vec<String> },
    CategoryCompleted { category: Category },
}

impl BadgeRule {
    /// Meta rules depend on other badges.
    pub fn is_meta(&self) -> bool {
        matches!(
            self,
            BadgeRule::BadgesUnlocked { .. } | BadgeRule::CategoryCompleted { .. }
        )
    }

    /// `(kind, id)` pairs of the content this rule points at.
    pub fn references(&self) -> Vec<(&'static str, &str)> {
        fn tag<'a>(kind: &'static str, ids: &'a [String]) -> Vec<(&'static str, &'a str)> {
            ids.iter().map(|id| (kind, id.as_str())).collect()
        }
        match self {
            BadgeRule::QuizzesCompleted { quizzes }
            | BadgeRule::AverageQuizScoreAtLeast { quizzes, .. } => tag("quiz", quizzes),
            BadgeRule::QuizScoreAtLeast { quiz, .. } => vec![("quiz", quiz.as_str())],
            BadgeRule::CoursesCompleted { courses } => tag("course", courses),
            BadgeRule::GamesCompleted { games } => tag("game", games),
            BadgeRule::LearningPathsCompleted { paths } => tag("learning path", paths),
            BadgeRule::BadgesUnlocked { badges } => tag("badge", badges),
            BadgeRule::AnyQuizScoreAtLeast { .. }
            | BadgeRule::TimeSpentAtLeast { .. }
            | BadgeRule::CategoryCompleted { .. } => Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BadgeDefinition {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub rule: BadgeRule,
}

impl BadgeDefinition {
    pub fn evaluate(
        &self,
        progress: &UserProgress,
        catalogue: &BadgeCatalogue,
    ) -> Result<u8, BadgeError> {
        match &self.rule {
            BadgeRule::QuizzesCompleted { quizzes } => {
                share(quizzes, |id| progress.quiz_completed(id))
            }
            BadgeRule::QuizScoreAtLeast { quiz, score } => {
                toward(u64::from(progress.quiz_score(quiz)), u64::from(*score))
            }
            BadgeRule::AnyQuizScoreAtLeast { score } => {
                let best = progress
                    .quizzes
                    .values()
                    .filter(|q| q.completed)
                    .map(|q| q.score)
                    .max()
                    .unwrap_or(0);
                toward(u64::from(best), u64::from(*score))
            }
            BadgeRule::AverageQuizScoreAtLeast { quizzes, score } => {
                if quizzes.is_empty() {
                    return Err(BadgeError::EmptyRule);
                }
                let total: u64 = quizzes
                    .iter()
                    .map(|id| u64::from(progress.quiz_score(id)))
                    .sum();
                let average = total / quizzes.len() as u64;
                toward(average, u64::from(*score))
            }
            BadgeRule::CoursesCompleted { courses } => {
                share(courses, |id| progress.course_completed(id))
            }
            BadgeRule::GamesCompleted { games } => share(games, |id| progress.game_completed(id)),
            BadgeRule::LearningPathsCompleted { paths } => {
                share(paths, |id| progress.learning_path_completed(id))
            }
            BadgeRule::TimeSpentAtLeast { minutes } => {
                toward(u64::from(progress.time_spent), u64::from(*minutes))
            }
            BadgeRule::BadgesUnlocked { badges } => {
                share(badges, |id| progress.badge_unlocked(id))
            }
            BadgeRule::CategoryCompleted { category } => {
                // Sibling category rules would wait on each other forever.
                let ids: Vec<String> = catalogue
                    .in_category(*category)
                    .filter(|d| !matches!(d.rule, BadgeRule::CategoryCompleted { .. }))
                    .map(|d| d.id.clone())
                    .collect();
                share(&ids, |id| progress.badge_unlocked(id))
            }
        }
    }
}

fn share(ids: &[String], done: impl Fn(&str) -> bool) -> Result<u8, BadgeError> {
    if ids.is_empty() {
        return Err(BadgeError::EmptyRule);
    }
    let completed = ids.iter().filter(|id| done(id)).count();
    Ok(percent_of(completed as u64, ids.len() as u64))
}

/// Progress of `value` toward `threshold`; only reaching the threshold yields 100.
fn toward(value: u64, threshold: u64) -> Result<u8, BadgeError> {
    if threshold == 0 {
        return Err(BadgeError::ZeroThreshold);
    }
    if value >= threshold {
        Ok(100)
    } else {
        Ok(percent_of(value, threshold).min(99))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct BadgeCatalogue {
    definitions: Vec<BadgeDefinition>,
}

impl BadgeCatalogue {
    pub fn new(definitions: Vec<BadgeDefinition>) -> Self {
        Self { definitions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.definitions.iter()
    }

    pub fn get(&self, id: &str) -> Option<&BadgeDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &BadgeDefinition> {
        self.definitions.iter().filter(move |d| d.category == category)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Evaluates the whole catalogue against `progress`, primary rules first and
/// meta rules second, and returns the ids unlocked by this call.
///
/// Badges missing from `progress` get a default entry. A rule that fails to
/// evaluate is logged and skipped without affecting the rest.
pub fn update_all_badge_progress(
    progress: &mut UserProgress,
    catalogue: &BadgeCatalogue,
    now: Timestamp,
) -> Vec<String> {
    let mut unlocked = Vec::new();
    for definition in catalogue.iter().filter(|d| !d.rule.is_meta()) {
        if apply_badge(progress, catalogue, definition, now) {
            unlocked.push(definition.id.clone());
        }
    }

    // Every round either unlocks a meta badge or is the last one.
    let meta: Vec<&BadgeDefinition> = catalogue.iter().filter(|d| d.rule.is_meta()).collect();
    for _ in 0..=meta.len() {
        let before = unlocked.len();
        for definition in &meta {
            if apply_badge(progress, catalogue, definition, now) {
                unlocked.push(definition.id.clone());
            }
        }
        if unlocked.len() == before {
            break;
        }
    }
    unlocked
}

fn apply_badge(
    progress: &mut UserProgress,
    catalogue: &BadgeCatalogue,
    definition: &BadgeDefinition,
    now: Timestamp,
) -> bool {
    let evaluation = definition.evaluate(progress, catalogue);
    let entry = progress
        .badges
        .entry(definition.id.clone())
        .or_insert_with(|| BadgeProgress::new(definition.category));
    entry.category = definition.category;

    if entry.unlocked {
        entry.progress = 100;
        return false;
    }

    let value = match evaluation {
        Ok(value) => value,
        Err(err) => {
            warn!("Skipping badge `{}`: {err}", definition.id);
            return false;
        }
    };

    entry.progress = value;
    if value < 100 {
        return false;
    }
    entry.unlocked = true;
    entry.date_unlocked = Some(now);
    info!("Badge unlocked: {}", definition.id);
    true
}

pub fn get_all_badges(progress: &UserProgress) -> &BTreeMap<String, BadgeProgress> {
    &progress.badges
}

/// Unlocked share of the catalogue, 0..=100. Never stored.
pub fn get_overall_progress(progress: &UserProgress, catalogue: &BadgeCatalogue) -> u8 {
    let unlocked = catalogue
        .iter()
        .filter(|d| progress.badge_unlocked(&d.id))
        .count();
    percent_of(unlocked as u64, catalogue.len() as u64)
}

pub fn get_unlocked_badges(progress: &UserProgress) -> Vec<(&str, &BadgeProgress)> {
    progress
        .badges
        .iter()
        .filter(|(_, badge)| badge.unlocked)
        .map(|(id, badge)| (id.as_str(), badge))
        .collect()
}

pub fn category_progress(
    progress: &UserProgress,
    catalogue: &BadgeCatalogue,
    category: Category,
) -> u8 {
    let mut total = 0u64;
    let mut unlocked = 0u64;
    for definition in catalogue.in_category(category) {
        total += 1;
        if progress.badge_unlocked(&definition.id) {
            unlocked += 1;
        }
    }
    percent_of(unlocked, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::QuizProgress;
    use chrono::{TimeZone, Utc};

    fn badge(id: &str, category: Category, rule: BadgeRule) -> BadgeDefinition {
        BadgeDefinition {
            id: id.into(),
            category,
            title: id.into(),
            description: String::new(),
            rule,
        }
    }

    fn completed_quiz(score: u8) -> QuizProgress {
        QuizProgress {
            completed: true,
            score,
            correct_answers: 1,
            total_questions: 1,
            attempts: 1,
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    fn catalogue() -> BadgeCatalogue {
        BadgeCatalogue::new(vec![
            // Declared before its dependencies on purpose.
            badge(
                "champion",
                Category::SpecialAchievement,
                BadgeRule::BadgesUnlocked {
                    badges: vec!["first-quiz".into(), "ace".into()],
                },
            ),
            badge(
                "first-quiz",
                Category::InformationLiteracy,
                BadgeRule::QuizzesCompleted {
                    quizzes: vec!["sources".into()],
                },
            ),
            badge(
                "ace",
                Category::InformationLiteracy,
                BadgeRule::AnyQuizScoreAtLeast { score: 80 },
            ),
        ])
    }

    #[test]
    fn meta_badges_see_primary_unlocks_of_the_same_pass() {
        let mut progress = UserProgress::default();
        progress.quizzes.insert("sources".into(), completed_quiz(90));

        let unlocked = update_all_badge_progress(&mut progress, &catalogue(), now());

        assert_eq!(unlocked, vec!["first-quiz", "ace", "champion"]);
        assert!(progress.badge_unlocked("champion"));
        assert_eq!(progress.badges["champion"].date_unlocked, Some(now()));
    }

    #[test]
    fn second_run_changes_nothing() {
        let mut progress = UserProgress::default();
        progress.quizzes.insert("sources".into(), completed_quiz(90));
        update_all_badge_progress(&mut progress, &catalogue(), now());
        let snapshot = progress.clone();

        let later = now() + chrono::Duration::hours(1);
        let unlocked = update_all_badge_progress(&mut progress, &catalogue(), later);

        assert!(unlocked.is_empty());
        assert_eq!(progress, snapshot);
    }

    #[test]
    fn partial_progress_is_recorded_without_unlocking() {
        let mut progress = UserProgress::default();
        progress.quizzes.insert("sources".into(), completed_quiz(60));

        update_all_badge_progress(&mut progress, &catalogue(), now());

        let ace = &progress.badges["ace"];
        assert!(!ace.unlocked);
        assert_eq!(ace.progress, 75);
        assert!(ace.date_unlocked.is_none());
        assert_eq!(progress.badges["champion"].progress, 50);
    }

    #[test]
    fn threshold_just_missed_never_reports_full() {
        let mut progress = UserProgress::default();
        progress.time_spent = 199;
        let catalogue = BadgeCatalogue::new(vec![badge(
            "marathon",
            Category::SpecialAchievement,
            BadgeRule::TimeSpentAtLeast { minutes: 200 },
        )]);

        let unlocked = update_all_badge_progress(&mut progress, &catalogue, now());

        assert!(unlocked.is_empty());
        assert_eq!(progress.badges["marathon"].progress, 99);
    }

    #[test]
    fn unlocked_badges_stay_unlocked_when_progress_regresses() {
        let mut progress = UserProgress::default();
        progress.quizzes.insert("sources".into(), completed_quiz(90));
        update_all_badge_progress(&mut progress, &catalogue(), now());

        progress.quizzes.insert("sources".into(), completed_quiz(10));
        update_all_badge_progress(&mut progress, &catalogue(), now());

        let ace = &progress.badges["ace"];
        assert!(ace.unlocked);
        assert_eq!(ace.progress, 100);
        assert_eq!(ace.date_unlocked, Some(now()));
    }

    #[test]
    fn failing_rule_does_not_stop_the_catalogue() {
        let catalogue = BadgeCatalogue::new(vec![
            badge(
                "broken",
                Category::OnlineSafety,
                BadgeRule::AverageQuizScoreAtLeast {
                    quizzes: vec![],
                    score: 50,
                },
            ),
            badge(
                "zero",
                Category::OnlineSafety,
                BadgeRule::TimeSpentAtLeast { minutes: 0 },
            ),
            badge(
                "first-quiz",
                Category::InformationLiteracy,
                BadgeRule::QuizzesCompleted {
                    quizzes: vec!["sources".into()],
                },
            ),
        ]);
        let mut progress = UserProgress::default();
        progress.quizzes.insert("sources".into(), completed_quiz(50));

        let unlocked = update_all_badge_progress(&mut progress, &catalogue, now());

        assert_eq!(unlocked, vec!["first-quiz"]);
        assert_eq!(progress.badges["broken"], BadgeProgress::new(Category::OnlineSafety));
        assert!(!progress.badge_unlocked("zero"));
    }

    #[test]
    fn category_completion_excludes_itself() {
        let catalogue = BadgeCatalogue::new(vec![
            badge(
                "first-quiz",
                Category::InformationLiteracy,
                BadgeRule::QuizzesCompleted {
                    quizzes: vec!["sources".into()],
                },
            ),
            badge(
                "all-info",
                Category::InformationLiteracy,
                BadgeRule::CategoryCompleted {
                    category: Category::InformationLiteracy,
                },
            ),
        ]);
        let mut progress = UserProgress::default();
        progress.quizzes.insert("sources".into(), completed_quiz(50));

        update_all_badge_progress(&mut progress, &catalogue, now());

        assert!(progress.badge_unlocked("all-info"));
        assert_eq!(
            category_progress(&progress, &catalogue, Category::InformationLiteracy),
            100
        );
    }

    #[test]
    fn meta_badges_chain_regardless_of_declaration_order() {
        let catalogue = BadgeCatalogue::new(vec![
            badge(
                "all-special",
                Category::SpecialAchievement,
                BadgeRule::CategoryCompleted {
                    category: Category::SpecialAchievement,
                },
            ),
            badge(
                "first-quiz",
                Category::SpecialAchievement,
                BadgeRule::QuizzesCompleted {
                    quizzes: vec!["sources".into()],
                },
            ),
            badge(
                "citizen",
                Category::SpecialAchievement,
                BadgeRule::BadgesUnlocked {
                    badges: vec!["first-quiz".into()],
                },
            ),
        ]);
        let mut progress = UserProgress::default();
        progress.quizzes.insert("sources".into(), completed_quiz(50));

        let first = update_all_badge_progress(&mut progress, &catalogue, now());
        assert_eq!(first, vec!["first-quiz", "citizen", "all-special"]);

        let snapshot = progress.clone();
        let second = update_all_badge_progress(&mut progress, &catalogue, now());
        assert!(second.is_empty());
        assert_eq!(progress, snapshot);
    }

    #[test]
    fn sibling_category_badges_do_not_block_each_other() {
        let catalogue = BadgeCatalogue::new(vec![
            badge(
                "first-quiz",
                Category::DigitalCommunication,
                BadgeRule::QuizzesCompleted {
                    quizzes: vec!["sources".into()],
                },
            ),
            badge(
                "all-talk",
                Category::DigitalCommunication,
                BadgeRule::CategoryCompleted {
                    category: Category::DigitalCommunication,
                },
            ),
            badge(
                "all-talk-again",
                Category::DigitalCommunication,
                BadgeRule::CategoryCompleted {
                    category: Category::DigitalCommunication,
                },
            ),
        ]);
        let mut progress = UserProgress::default();
        progress.quizzes.insert("sources".into(), completed_quiz(50));

        let unlocked = update_all_badge_progress(&mut progress, &catalogue, now());

        assert_eq!(unlocked, vec!["first-quiz", "all-talk", "all-talk-again"]);
    }

    #[test]
    fn overall_progress_is_derived_from_the_catalogue() {
        let mut progress = UserProgress::default();
        assert_eq!(get_overall_progress(&progress, &catalogue()), 0);
        assert_eq!(get_overall_progress(&progress, &BadgeCatalogue::default()), 0);

        progress.quizzes.insert("sources".into(), completed_quiz(60));
        update_all_badge_progress(&mut progress, &catalogue(), now());

        assert_eq!(get_overall_progress(&progress, &catalogue()), 33);
        let unlocked = get_unlocked_badges(&progress);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].0, "first-quiz");
        assert_eq!(get_all_badges(&progress).len(), 3);
    }

    #[test]
    fn badges_added_later_are_populated_on_next_update() {
        let mut progress = UserProgress::default();
        progress.quizzes.insert("sources".into(), completed_quiz(60));
        let old = BadgeCatalogue::new(vec![badge(
            "first-quiz",
            Category::InformationLiteracy,
            BadgeRule::QuizzesCompleted {
                quizzes: vec!["sources".into()],
            },
        )]);
        update_all_badge_progress(&mut progress, &old, now());
        assert!(!progress.badges.contains_key("ace"));

        update_all_badge_progress(&mut progress, &catalogue(), now());

        assert!(progress.badges.contains_key("ace"));
        assert!(progress.badge_unlocked("first-quiz"));
    }

    #[test]
    fn rules_parse_from_yaml() {
        let yaml = r#"
- id: ace
  category: special-achievement
  title: Quiz Ace
  description: Score 80 or more
  rule: { kind: any_quiz_score_at_least, score: 80 }
- id: pro
  category: information-literacy
  title: Pro
  description: Both quizzes
  rule:
    kind: quizzes_completed
    quizzes: [a, b]
"#;
        let catalogue: BadgeCatalogue = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(catalogue.len(), 2);
        assert_eq!(
            catalogue.get("ace").unwrap().rule,
            BadgeRule::AnyQuizScoreAtLeast { score: 80 }
        );
        assert_eq!(catalogue.get("pro").unwrap().rule.references().len(), 2);
    }
}
