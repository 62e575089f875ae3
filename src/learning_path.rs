use crate::model::LearningPath;
use crate::progress::{LearningPathProgress, Timestamp, UserProgress, clamp_percent, percent_of};
use log::debug;

/// Denormalized summary written back into `UserProgress::learning_paths`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningPathEntry {
    pub path_id: String,
    pub progress: u8,
    pub completed_modules: u32,
    pub total_modules: u32,
}

/// Share of the related games and quizzes the learner has completed, rounded.
/// A path with nothing related reports 0.
pub fn calculate_learning_path_progress(
    progress: &UserProgress,
    related_game_ids: &[String],
    related_quiz_ids: &[String],
) -> u8 {
    let total = related_game_ids.len() + related_quiz_ids.len();
    if total == 0 {
        return 0;
    }
    let done = completed_items(progress, related_game_ids, related_quiz_ids);
    percent_of(done as u64, total as u64)
}

fn completed_items(progress: &UserProgress, game_ids: &[String], quiz_ids: &[String]) -> usize {
    let games = game_ids.iter().filter(|id| progress.game_completed(id)).count();
    let quizzes = quiz_ids.iter().filter(|id| progress.quiz_completed(id)).count();
    games + quizzes
}

/// Recomputes the summary of `path` from scratch.
pub fn entry_for(path: &LearningPath, progress: &UserProgress) -> LearningPathEntry {
    let percent = calculate_learning_path_progress(progress, &path.games, &path.quizzes);
    debug!("Learning path {} at {percent}%", path.id);
    LearningPathEntry {
        path_id: path.id.clone(),
        progress: percent,
        completed_modules: completed_items(progress, &path.games, &path.quizzes) as u32,
        total_modules: path.total_modules(),
    }
}

/// Upserts the path summary. `started` latches on the first non-zero
/// progress; `completed` holds only at exactly 100.
pub fn save_learning_path_progress(
    progress: &mut UserProgress,
    entry: &LearningPathEntry,
    now: Timestamp,
) {
    let percent = clamp_percent(i64::from(entry.progress));
    let record = progress
        .learning_paths
        .entry(entry.path_id.clone())
        .or_insert_with(|| LearningPathProgress::new(now));
    if percent > 0 {
        record.started = true;
    }
    record.completed = percent == 100;
    record.completed_modules = entry.completed_modules.min(entry.total_modules);
    record.last_accessed = now;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{GameProgress, QuizProgress};
    use chrono::{TimeZone, Utc};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap()
    }

    fn path() -> LearningPath {
        LearningPath {
            id: "safe-explorer".into(),
            title: "Safe Explorer".into(),
            description: String::new(),
            courses: vec![],
            quizzes: ids(&["password-quiz", "safety-quiz"]),
            games: ids(&["phish"]),
        }
    }

    #[test]
    fn empty_path_is_zero() {
        assert_eq!(
            calculate_learning_path_progress(&UserProgress::default(), &[], &[]),
            0
        );
    }

    #[test]
    fn counts_completed_games_and_quizzes() {
        let mut progress = UserProgress::default();
        progress.games.insert(
            "phish".into(),
            GameProgress {
                completed: true,
                score: 90,
            },
        );
        progress.quizzes.insert("password-quiz".into(), QuizProgress::default());

        let p = path();
        assert_eq!(calculate_learning_path_progress(&progress, &p.games, &p.quizzes), 33);

        progress.quizzes.get_mut("password-quiz").unwrap().completed = true;
        assert_eq!(calculate_learning_path_progress(&progress, &p.games, &p.quizzes), 67);
    }

    #[test]
    fn started_latches_and_completed_needs_full_progress() {
        let mut progress = UserProgress::default();
        let mut entry = LearningPathEntry {
            path_id: "safe-explorer".into(),
            progress: 0,
            completed_modules: 0,
            total_modules: 3,
        };
        save_learning_path_progress(&mut progress, &entry, now());
        assert!(!progress.learning_paths["safe-explorer"].started);

        entry.progress = 67;
        entry.completed_modules = 2;
        save_learning_path_progress(&mut progress, &entry, now());
        let record = &progress.learning_paths["safe-explorer"];
        assert!(record.started);
        assert!(!record.completed);

        entry.progress = 100;
        entry.completed_modules = 9;
        save_learning_path_progress(&mut progress, &entry, now());
        let record = &progress.learning_paths["safe-explorer"];
        assert!(record.completed);
        assert_eq!(record.completed_modules, 3);
        assert_eq!(record.last_accessed, now());
    }

    #[test]
    fn entry_recomputes_module_count() {
        let mut progress = UserProgress::default();
        progress.quizzes.insert(
            "safety-quiz".into(),
            QuizProgress {
                completed: true,
                ..QuizProgress::default()
            },
        );
        let entry = entry_for(&path(), &progress);
        assert_eq!(entry.completed_modules, 1);
        assert_eq!(entry.total_modules, 3);
        assert_eq!(entry.progress, 33);
    }
}
