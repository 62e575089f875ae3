use super::*;

impl LiteracyApp {
    /// Wipes learning progress. Settings and accessibility preferences stay.
    pub fn reset_progress(&mut self) {
        // The running visit belongs to the old progress.
        self.visit = Some(self.tracker.begin_visit());
        self.session = None;
        self.game_session = None;
        self.last_result = None;
        self.last_game = None;
        self.confirm_reset = false;
        self.shell.selected_path = None;

        let ok = self.tracker.reset_progress();
        self.tracker.update_all_badge_progress();
        self.navigate(AppState::Dashboard);
        self.message = if ok {
            "Progress reset. Time for a fresh adventure!".to_owned()
        } else {
            "Progress could not be fully reset.".to_owned()
        };
    }

    pub fn confirm_reset(&mut self, ctx: &egui::Context) {
        egui::Window::new("Reset progress")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Delete all courses, quiz scores, games and badges?");
                ui.label("This cannot be undone.");
                ui.horizontal(|ui| {
                    if ui.button("Yes, delete").clicked() {
                        self.reset_progress();
                    }
                    if ui.button("No").clicked() {
                        self.confirm_reset = false;
                    }
                });
            });
    }
}
