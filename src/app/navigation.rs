use super::*;

impl LiteracyApp {
    /// Credits the open page visit to the adventure time.
    pub fn end_visit(&mut self) {
        if let Some(visit) = self.visit.take() {
            let minutes = self.tracker.finish_visit(visit);
            if minutes > 0 {
                log::debug!("Visit of {:?} lasted {minutes} min", self.shell.state);
            }
        }
    }

    /// Every screen change closes the current visit and opens a new one.
    pub fn navigate(&mut self, state: AppState) {
        if state == self.shell.state {
            return;
        }
        self.end_visit();
        self.shell.state = state;
        self.visit = Some(self.tracker.begin_visit());
        self.message.clear();
    }

    pub fn go_home(&mut self) {
        self.navigate(AppState::Dashboard);
    }

    pub fn open_course(&mut self, course_id: &str) {
        if self.catalog().course(course_id).is_none() {
            self.message = format!("Unknown course `{course_id}`");
            return;
        }
        self.shell.selected_course = Some(course_id.to_string());
        self.navigate(AppState::Course);
    }

    pub fn open_learning_paths(&mut self) {
        self.navigate(AppState::LearningPaths);
    }

    /// Opening a path marks it as accessed.
    pub fn select_path(&mut self, path_id: &str) {
        match self.tracker.refresh_learning_path(path_id) {
            Ok(_) => self.shell.selected_path = Some(path_id.to_string()),
            Err(err) => self.message = err.to_string(),
        }
    }

    pub fn open_badges(&mut self) {
        self.tracker.update_all_badge_progress();
        self.navigate(AppState::Badges);
    }

    pub fn open_settings(&mut self) {
        self.settings = self.tracker.settings();
        self.navigate(AppState::Settings);
    }
}
