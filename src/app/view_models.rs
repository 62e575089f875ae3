use super::*;
use crate::model::Category;

impl LiteracyApp {
    pub fn course_infos(&self) -> Vec<CourseInfo> {
        let progress = self.tracker.progress();
        self.catalog()
            .courses
            .iter()
            .map(|course| {
                let entry = progress.courses.get(&course.id);
                let modules_done = entry
                    .map(|c| {
                        course
                            .modules
                            .iter()
                            .filter(|m| c.modules.get(&m.id).is_some_and(|p| p.completed))
                            .count()
                    })
                    .unwrap_or(0);
                CourseInfo {
                    id: course.id.clone(),
                    title: course.title.clone(),
                    category: course.category,
                    progress: entry.map(|c| c.progress).unwrap_or(0),
                    completed: entry.is_some_and(|c| c.completed),
                    modules_done,
                    module_count: course.modules.len(),
                }
            })
            .collect()
    }

    pub fn path_infos(&self) -> Vec<PathInfo> {
        let progress = self.tracker.progress();
        self.catalog()
            .learning_paths
            .iter()
            .map(|path| {
                let entry = crate::learning_path::entry_for(path, &progress);
                let stored = progress.learning_paths.get(&path.id);
                PathInfo {
                    id: path.id.clone(),
                    title: path.title.clone(),
                    description: path.description.clone(),
                    progress: entry.progress,
                    started: stored.is_some_and(|p| p.started) || entry.progress > 0,
                    completed: entry.progress == 100,
                    completed_modules: entry.completed_modules,
                    total_modules: entry.total_modules,
                }
            })
            .collect()
    }

    pub fn badge_cards(&self, category: Category) -> Vec<BadgeCard> {
        let progress = self.tracker.progress();
        self.catalog()
            .badges
            .in_category(category)
            .map(|badge| {
                let state = progress.badges.get(&badge.id);
                BadgeCard {
                    id: badge.id.clone(),
                    title: badge.title.clone(),
                    description: badge.description.clone(),
                    category: badge.category,
                    unlocked: state.is_some_and(|b| b.unlocked),
                    progress: state.map(|b| b.progress).unwrap_or(0),
                    date_unlocked: state.and_then(|b| b.date_unlocked),
                }
            })
            .collect()
    }

    /// Rows of the last finished quiz, in question order.
    pub fn question_rows(&self) -> Vec<QuestionRow> {
        let (Some(submission), Some(session)) = (&self.last_result, &self.session) else {
            return Vec::new();
        };
        let Some(quiz) = self.catalog().quiz(&submission.result.quiz_id) else {
            return Vec::new();
        };
        quiz.questions
            .iter()
            .zip(&session.answers)
            .zip(&submission.result.per_question)
            .enumerate()
            .map(|(i, ((question, answer), correct))| QuestionRow {
                number: i + 1,
                prompt: question.prompt.clone(),
                chosen: answer.and_then(|a| question.options.get(a).cloned()),
                correct: question
                    .options
                    .get(question.correct_answer)
                    .cloned()
                    .unwrap_or_default(),
                is_correct: *correct,
                explanation: question.explanation.clone(),
            })
            .collect()
    }
}
