//! Mini-game results: the shared `games` map of the progress document plus the
//! per-game streak, XP, level and achievement documents.

use crate::error::ValidationError;
use crate::model::Game;
use crate::progress::{UserProgress, clamp_percent, percent_of};
use serde::{Deserialize, Serialize};

pub const XP_PER_LEVEL: u64 = 100;

pub const FIRST_WIN: &str = "first-win";
pub const STREAK_THREE: &str = "streak-3";
pub const LEVEL_FIVE: &str = "level-5";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    pub streak: u32,
    pub xp: u64,
    pub level: u32,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub game_id: String,
    pub score: u8,
    pub passed: bool,
    pub stats: GameStats,
    pub new_achievements: Vec<String>,
    pub new_badges: Vec<String>,
}

/// Percentage of rounds where the learner's verdict matched the expected one.
pub fn score_rounds(game: &Game, verdicts: &[bool]) -> Result<u8, ValidationError> {
    if verdicts.len() != game.rounds.len() {
        return Err(ValidationError::RoundCountMismatch {
            expected: game.rounds.len(),
            actual: verdicts.len(),
        });
    }
    let correct = game
        .rounds
        .iter()
        .zip(verdicts)
        .filter(|(round, verdict)| round.safe == **verdict)
        .count();
    Ok(percent_of(correct as u64, game.rounds.len() as u64))
}

pub fn xp_for(score: u8, streak: u32) -> u64 {
    u64::from(score) / 10 + 5 * u64::from(streak)
}

pub fn level_for(xp: u64) -> u32 {
    u32::try_from(xp / XP_PER_LEVEL + 1).unwrap_or(u32::MAX)
}

/// Updates `games[game.id]`: the score is last-write-wins, `completed`
/// latches once a run reaches the pass score. Returns whether this run passed.
pub fn apply_game_result(progress: &mut UserProgress, game: &Game, score: u8) -> bool {
    let score = clamp_percent(i64::from(score));
    let passed = score >= game.pass_score;
    let entry = progress.games.entry(game.id.clone()).or_default();
    entry.score = score;
    entry.completed = entry.completed || passed;
    passed
}

/// Advances streak, XP and level for one run and returns the achievements
/// earned by it.
pub fn advance_stats(stats: &mut GameStats, score: u8, passed: bool) -> Vec<String> {
    stats.streak = if passed { stats.streak + 1 } else { 0 };
    stats.xp = stats.xp.saturating_add(xp_for(score, stats.streak));
    stats.level = level_for(stats.xp);

    let mut earned = Vec::new();
    let checks = [
        (FIRST_WIN, passed),
        (STREAK_THREE, stats.streak >= 3),
        (LEVEL_FIVE, stats.level >= 5),
    ];
    for (id, reached) in checks {
        if reached && !stats.achievements.iter().any(|a| a == id) {
            stats.achievements.push(id.to_string());
            earned.push(id.to_string());
        }
    }
    earned
}
