use crate::LiteracyApp;
use crate::ui::helpers::{big_list_button, percent_bar};
use crate::ui::layout::simple_panel;
use egui::{Context, RichText};

pub fn ui_learning_paths(app: &mut LiteracyApp, ctx: &Context) {
    let infos = app.path_infos();
    let selected = app
        .shell
        .selected_path
        .as_deref()
        .and_then(|id| app.catalog().learning_path(id))
        .cloned();
    let progress = app.tracker.progress();

    simple_panel(ctx, 640.0, |ui| {
        ui.heading("🧭 Learning paths");
        ui.add_space(8.0);
        let width = ui.available_width();

        for info in &infos {
            if big_list_button(ui, info.label(), width, 36.0, true) {
                app.select_path(&info.id);
            }
            ui.horizontal(|ui| {
                percent_bar(ui, info.progress, width * 0.7);
                ui.label(format!("{}/{}", info.completed_modules, info.total_modules));
            });
            ui.add_space(6.0);
        }

        let Some(path) = &selected else {
            return;
        };
        ui.separator();
        ui.heading(&path.title);
        ui.label(&path.description);
        ui.add_space(8.0);

        for course_id in &path.courses {
            let Some(course) = app.catalog().course(course_id) else {
                continue;
            };
            let label = format!("📘 {}", course.title);
            if ui.button(label).clicked() {
                app.open_course(course_id);
            }
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Steps").strong());
        for quiz_id in &path.quizzes {
            let title = app
                .catalog()
                .quiz(quiz_id)
                .map(|q| q.title.clone())
                .unwrap_or_else(|| quiz_id.clone());
            let mark = if progress.quiz_completed(quiz_id) { "✅" } else { "⬜" };
            if ui.button(format!("{mark} 📝 {title}")).clicked() {
                app.start_quiz(quiz_id);
            }
        }
        for game_id in &path.games {
            let title = app
                .catalog()
                .game(game_id)
                .map(|g| g.title.clone())
                .unwrap_or_else(|| game_id.clone());
            let mark = if progress.game_completed(game_id) { "✅" } else { "⬜" };
            if ui.button(format!("{mark} 🎮 {title}")).clicked() {
                app.start_game(game_id);
            }
        }
    });
}
