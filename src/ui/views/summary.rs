use crate::LiteracyApp;
use crate::model::AppState;
use crate::ui::layout::simple_panel;
use crate::view_models::QuestionRow;
use egui::{Context, Grid, RichText};

pub fn ui_quiz_summary(app: &mut LiteracyApp, ctx: &Context) {
    let Some(submission) = app.last_result.clone() else {
        app.go_home();
        return;
    };
    let rows: Vec<QuestionRow> = app.question_rows();
    let result = &submission.result;

    simple_panel(ctx, 640.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("Quiz results");
            ui.add_space(6.0);
            ui.label(RichText::new(format!("{}%", result.score)).size(32.0).strong());
            ui.label(format!(
                "{} of {} correct",
                result.correct_answers, result.total_questions
            ));
            if submission.time_bonus > 0 {
                ui.label(format!("⚡ Time bonus: +{}", submission.time_bonus));
            }
        });
        ui.add_space(10.0);

        if rows.is_empty() {
            ui.label("No answers to show.");
        } else {
            Grid::new("quiz_results_grid")
                .striped(true)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("#");
                    ui.label("Your answer");
                    ui.label("Correct answer");
                    ui.end_row();

                    for row in &rows {
                        ui.label(row.label()).on_hover_text(
                            row.explanation.as_deref().unwrap_or("No explanation"),
                        );
                        ui.label(row.chosen.as_deref().unwrap_or("(skipped)"));
                        ui.label(&row.correct);
                        ui.end_row();
                    }
                });
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("⟲ Try again").clicked() {
                app.start_quiz(&result.quiz_id);
            }
            if ui.button("🧭 Learning paths").clicked() {
                app.navigate(AppState::LearningPaths);
            }
            if ui.button("🏠 Home").clicked() {
                app.go_home();
            }
        });
    });
}
