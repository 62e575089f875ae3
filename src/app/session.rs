use crate::model::{Game, Quiz};
use crate::progress::{AssessmentProgress, Timestamp};
use crate::scoring::Answer;
use std::time::Duration;

/// A quiz being answered. Questions are visited in order and each one is
/// answered or skipped exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    pub quiz_id: String,
    /// Set when the quiz is a course assessment; its answers are then saved
    /// after every question so the learner can resume.
    pub course_id: Option<String>,
    pub current: usize,
    pub answers: Vec<Answer>,
    pub started_at: Timestamp,
}

impl QuizSession {
    pub fn new(quiz: &Quiz, course_id: Option<String>, now: Timestamp) -> Self {
        Self {
            quiz_id: quiz.id.clone(),
            course_id,
            current: 0,
            answers: vec![None; quiz.questions.len()],
            started_at: now,
        }
    }

    /// Continues a saved assessment when it belongs to the same quiz and still
    /// fits its questions, otherwise starts over.
    pub fn resume(
        quiz: &Quiz,
        course_id: String,
        saved: &AssessmentProgress,
        now: Timestamp,
    ) -> Self {
        let fits = saved.quiz_id == quiz.id
            && saved.answers.len() == quiz.questions.len()
            && saved.current_question <= quiz.questions.len();
        if !fits {
            return Self::new(quiz, Some(course_id), now);
        }
        Self {
            quiz_id: quiz.id.clone(),
            course_id: Some(course_id),
            current: saved.current_question,
            answers: saved.answers.clone(),
            started_at: now,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.answers.len()
    }

    /// Records `answer` for the current question and moves on.
    pub fn answer(&mut self, answer: Answer) {
        if let Some(slot) = self.answers.get_mut(self.current) {
            *slot = answer;
            self.current += 1;
        }
    }

    pub fn elapsed(&self, now: Timestamp) -> Duration {
        (now - self.started_at).to_std().unwrap_or_default()
    }

    pub fn to_assessment(&self) -> AssessmentProgress {
        AssessmentProgress {
            quiz_id: self.quiz_id.clone(),
            current_question: self.current,
            answers: self.answers.clone(),
        }
    }

    /// Seconds left, or `None` for quizzes without a limit.
    pub fn remaining(&self, quiz: &Quiz, now: Timestamp) -> Option<u64> {
        let limit = u64::from(quiz.time_limit?);
        Some(limit.saturating_sub(self.elapsed(now).as_secs()))
    }
}

/// A mini-game run: one safe/unsafe verdict per round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub game_id: String,
    pub verdicts: Vec<bool>,
    pub rounds: usize,
    /// Explanation of the last round, shown before moving on.
    pub feedback: Option<(bool, String)>,
}

impl GameSession {
    pub fn new(game: &Game) -> Self {
        Self {
            game_id: game.id.clone(),
            verdicts: Vec::with_capacity(game.rounds.len()),
            rounds: game.rounds.len(),
            feedback: None,
        }
    }

    pub fn current(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_finished(&self) -> bool {
        self.verdicts.len() >= self.rounds
    }

    pub fn answer(&mut self, game: &Game, safe: bool) {
        let Some(round) = game.rounds.get(self.current()) else {
            return;
        };
        let correct = round.safe == safe;
        let explanation = round.explanation.clone().unwrap_or_else(|| {
            if round.safe {
                "This one was safe.".to_string()
            } else {
                "This one was not safe.".to_string()
            }
        });
        self.feedback = Some((correct, explanation));
        self.verdicts.push(safe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, GameRound, QuizQuestion};
    use chrono::{TimeZone, Utc};

    fn quiz() -> Quiz {
        Quiz {
            id: "safety".into(),
            title: "Safety".into(),
            category: Category::OnlineSafety,
            time_limit: Some(60),
            questions: (0..3)
                .map(|i| QuizQuestion {
                    id: format!("q{i}"),
                    prompt: String::new(),
                    options: vec!["a".into(), "b".into()],
                    correct_answer: 0,
                    explanation: None,
                })
                .collect(),
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap()
    }

    #[test]
    fn answers_and_skips_advance() {
        let mut session = QuizSession::new(&quiz(), None, now());
        session.answer(Some(1));
        session.answer(None);
        assert!(!session.is_finished());
        session.answer(Some(0));
        assert!(session.is_finished());
        session.answer(Some(0));
        assert_eq!(session.answers, vec![Some(1), None, Some(0)]);
    }

    #[test]
    fn resume_continues_a_matching_assessment() {
        let saved = AssessmentProgress {
            quiz_id: "safety".into(),
            current_question: 2,
            answers: vec![Some(0), Some(1), None],
        };
        let session = QuizSession::resume(&quiz(), "course".into(), &saved, now());
        assert_eq!(session.current, 2);
        assert_eq!(session.to_assessment(), saved);
    }

    #[test]
    fn resume_ignores_stale_assessments() {
        let saved = AssessmentProgress {
            quiz_id: "safety".into(),
            current_question: 1,
            answers: vec![Some(0)],
        };
        let session = QuizSession::resume(&quiz(), "course".into(), &saved, now());
        assert_eq!(session.current, 0);
        assert_eq!(session.answers.len(), 3);
    }

    #[test]
    fn remaining_time_counts_down_to_zero() {
        let session = QuizSession::new(&quiz(), None, now());
        assert_eq!(session.remaining(&quiz(), now() + chrono::Duration::seconds(20)), Some(40));
        assert_eq!(session.remaining(&quiz(), now() + chrono::Duration::seconds(90)), Some(0));
    }

    #[test]
    fn game_feedback_reports_the_verdict() {
        let game = Game {
            id: "g".into(),
            title: "G".into(),
            description: String::new(),
            pass_score: 70,
            rounds: vec![GameRound {
                prompt: String::new(),
                safe: false,
                explanation: Some("Scam".into()),
            }],
        };
        let mut session = GameSession::new(&game);
        session.answer(&game, true);
        assert_eq!(session.feedback, Some((false, "Scam".to_string())));
        assert!(session.is_finished());
    }
}
