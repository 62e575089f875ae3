// src/scoring.rs

use crate::error::ValidationError;
use crate::model::QuizQuestion;
use crate::progress::{UserProgress, clamp_percent, percent_of};
use std::time::Duration;

/// Selected option of one question; `None` when skipped or timed out.
pub type Answer = Option<usize>;

/// Upper bound of the bonus `time_bonus` hands out.
pub const MAX_TIME_BONUS: u32 = 20;

/// Result of one quiz attempt. Not persisted as such: it is folded into the
/// quiz entry of `UserProgress`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub quiz_id: String,
    pub score: u8,
    pub correct_answers: u32,
    pub total_questions: u32,
    /// Seconds.
    pub time_taken: u32,
    pub completed: bool,
    pub per_question: Vec<bool>,
}

impl QuizResult {
    pub fn with_time_taken(mut self, seconds: u32) -> Self {
        self.time_taken = seconds;
        self
    }
}

/// Scores a full answer set. `score = round(correct / total * 100) + time_bonus`,
/// clamped to 100.
pub fn calculate_quiz_score(
    quiz_id: &str,
    answers: &[Answer],
    questions: &[QuizQuestion],
    time_bonus: u32,
) -> Result<QuizResult, ValidationError> {
    if questions.is_empty() {
        return Err(ValidationError::EmptyQuiz);
    }
    if answers.len() != questions.len() {
        return Err(ValidationError::AnswerCountMismatch {
            expected: questions.len(),
            actual: answers.len(),
        });
    }

    let per_question = questions
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(index, (question, answer))| {
            if question.correct_answer >= question.options.len() {
                return Err(ValidationError::InvalidCorrectAnswer {
                    index,
                    correct: question.correct_answer,
                    options: question.options.len(),
                });
            }
            Ok(*answer == Some(question.correct_answer))
        })
        .collect::<Result<Vec<bool>, ValidationError>>()?;

    let correct_answers = per_question.iter().filter(|ok| **ok).count() as u32;
    let total_questions = questions.len() as u32;
    let base = percent_of(u64::from(correct_answers), u64::from(total_questions));
    let score = clamp_percent(i64::from(base) + i64::from(time_bonus));

    Ok(QuizResult {
        quiz_id: quiz_id.to_string(),
        score,
        correct_answers,
        total_questions,
        time_taken: 0,
        completed: true,
        per_question,
    })
}

/// Bonus points for finishing early: up to `MAX_TIME_BONUS`, proportional to
/// the unused share of `limit`. Nothing once the limit is reached.
pub fn time_bonus(elapsed: Duration, limit: Duration) -> u32 {
    if limit.is_zero() || elapsed >= limit {
        return 0;
    }
    let remaining = (limit - elapsed).as_millis();
    let scaled = (remaining * u128::from(MAX_TIME_BONUS) * 2 + limit.as_millis())
        / (limit.as_millis() * 2);
    u32::try_from(scaled).unwrap_or(MAX_TIME_BONUS).min(MAX_TIME_BONUS)
}

/// Folds an attempt into the progress document. The latest attempt replaces
/// the stored score even when it is lower.
pub fn record_quiz_result(progress: &mut UserProgress, result: &QuizResult) {
    let entry = progress.quizzes.entry(result.quiz_id.clone()).or_default();
    entry.attempts = entry.attempts.saturating_add(1);
    entry.completed = entry.completed || result.completed;
    entry.score = result.score.min(100);
    entry.total_questions = result.total_questions;
    entry.correct_answers = result.correct_answers.min(result.total_questions);
}
