use super::*;
use crate::error::ValidationError;
use crate::scoring::Answer;

impl LiteracyApp {
    fn announce_badges(&mut self, badges: &[String]) {
        let titles: Vec<&str> = badges
            .iter()
            .filter_map(|id| self.tracker.catalog().badges.get(id))
            .map(|badge| badge.title.as_str())
            .collect();
        if !titles.is_empty() {
            self.message = format!("🏅 New badge: {}", titles.join(", "));
        }
    }

    pub fn complete_module(&mut self, course_id: &str, module_id: &str) {
        match self.tracker.complete_module(course_id, module_id) {
            Ok(badges) => self.announce_badges(&badges),
            Err(err) => self.message = err.to_string(),
        }
    }

    /// Starts a quiz. Course assessments pick up where the learner left off.
    pub fn start_quiz(&mut self, quiz_id: &str) {
        let now = self.tracker.now();
        let Some(quiz) = self.tracker.catalog().quiz(quiz_id) else {
            self.message = format!("Unknown quiz `{quiz_id}`");
            return;
        };
        let session = match self.tracker.catalog().course_for_assessment(quiz_id) {
            Some(course) => {
                let saved = self.tracker.assessment_progress(&course.id);
                QuizSession::resume(quiz, course.id.clone(), &saved, now)
            }
            None => QuizSession::new(quiz, None, now),
        };
        let resumed = session.current > 0;
        self.session = Some(session);
        self.last_result = None;
        self.navigate(AppState::Quiz);
        if resumed {
            self.message = "Welcome back! Your answers were saved.".to_owned();
        }
        if self.session.as_ref().is_some_and(QuizSession::is_finished) {
            self.finish_quiz();
        }
    }

    pub fn select_answer(&mut self, option: usize) {
        self.record_answer(Some(option));
    }

    pub fn skip_question(&mut self) {
        self.record_answer(None);
    }

    fn record_answer(&mut self, answer: Answer) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.answer(answer);
        let finished = session.is_finished();
        let checkpoint = session
            .course_id
            .clone()
            .map(|course| (course, session.to_assessment()));

        if finished {
            self.finish_quiz();
        } else if let Some((course, assessment)) = checkpoint {
            self.tracker.save_assessment_progress(&course, &assessment);
        }
    }

    /// Called when the timer runs out: unanswered questions count as skipped.
    pub fn time_up(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.current = session.answers.len();
        }
        self.finish_quiz();
    }

    pub fn finish_quiz(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let elapsed = session.elapsed(self.tracker.now());
        match self
            .tracker
            .submit_quiz(&session.quiz_id, &session.answers, elapsed)
        {
            Ok(submission) => {
                let badges = submission.new_badges.clone();
                self.last_result = Some(submission);
                self.session = Some(session);
                self.navigate(AppState::QuizSummary);
                self.announce_badges(&badges);
            }
            Err(err) => {
                log::warn!("Quiz `{}` could not be scored: {err}", session.quiz_id);
                self.message = err.to_string();
                self.navigate(AppState::Dashboard);
            }
        }
    }

    pub fn start_game(&mut self, game_id: &str) {
        let Some(game) = self.tracker.catalog().game(game_id) else {
            self.message = format!("Unknown game `{game_id}`");
            return;
        };
        self.game_session = Some(GameSession::new(game));
        self.last_game = None;
        self.navigate(AppState::Game);
    }

    pub fn answer_round(&mut self, safe: bool) {
        let Some(session) = self.game_session.as_mut() else {
            return;
        };
        if let Some(game) = self.tracker.catalog().game(&session.game_id) {
            session.answer(game, safe);
        }
    }

    pub fn finish_game(&mut self) {
        let Some(session) = self.game_session.take() else {
            return;
        };
        let score = match self.tracker.catalog().game(&session.game_id) {
            Some(game) => crate::games::score_rounds(game, &session.verdicts),
            None => Err(ValidationError::UnknownGame(session.game_id.clone())),
        };
        let result =
            score.and_then(|score| self.tracker.record_game_result(&session.game_id, score));
        match result {
            Ok(outcome) => {
                let badges = outcome.new_badges.clone();
                self.message = if outcome.passed {
                    format!("You passed with {}%! Streak: {}", outcome.score, outcome.stats.streak)
                } else {
                    format!("You scored {}%. Try again to pass.", outcome.score)
                };
                self.last_game = Some(outcome);
                self.announce_badges(&badges);
            }
            Err(err) => self.message = err.to_string(),
        }
        self.game_session = Some(session);
    }

    pub fn save_settings(&mut self) {
        if self.tracker.update_settings(&self.settings) {
            self.message = "Settings saved".to_owned();
        } else {
            self.message =
                "Settings could not be saved; they apply to this session only.".to_owned();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_progress(&mut self, _ctx: &egui::Context) {
        let snapshot = self.tracker.export();
        let dir = self.config.data_dir.join("exports");
        self.message = match snapshot.write_to(&dir) {
            Ok(path) => format!("Progress exported to {}", path.display()),
            Err(err) => {
                log::warn!("Export failed: {err}");
                format!("Export failed: {err}")
            }
        };
    }

    /// The browser build hands the snapshot over through the clipboard.
    #[cfg(target_arch = "wasm32")]
    pub fn export_progress(&mut self, ctx: &egui::Context) {
        let snapshot = self.tracker.export();
        self.message = match snapshot.to_json() {
            Ok(json) => {
                ctx.copy_text(json);
                format!("{} copied to the clipboard", snapshot.file_name())
            }
            Err(err) => format!("Export failed: {err}"),
        };
    }
}
