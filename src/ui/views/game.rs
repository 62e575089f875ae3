use crate::LiteracyApp;
use crate::ui::helpers::feedback_label;
use crate::ui::layout::centered_panel;
use egui::{Button, Context, RichText};

pub fn ui_game(app: &mut LiteracyApp, ctx: &Context) {
    let Some(session) = app.game_session.clone() else {
        app.go_home();
        return;
    };
    let Some(game) = app.catalog().game(&session.game_id).cloned() else {
        app.go_home();
        return;
    };
    let outcome = app.last_game.clone();

    centered_panel(ctx, 360.0, 560.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(&game.title);
            ui.label(&game.description);
        });
        ui.add_space(12.0);

        if let Some((correct, explanation)) = &session.feedback {
            feedback_label(ui, *correct, explanation);
            ui.add_space(8.0);
        }

        if let Some(outcome) = &outcome {
            ui.label(RichText::new(format!("{}%", outcome.score)).size(28.0).strong());
            ui.label(format!(
                "Level {} · {} XP · streak {}",
                outcome.stats.level, outcome.stats.xp, outcome.stats.streak
            ));
            for achievement in &outcome.new_achievements {
                ui.label(format!("⭐ Achievement: {achievement}"));
            }
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("⟲ Play again").clicked() {
                    app.start_game(&game.id);
                }
                if ui.button("🏠 Home").clicked() {
                    app.go_home();
                }
            });
            return;
        }

        if session.is_finished() {
            if ui.button("See my score").clicked() {
                app.finish_game();
            }
            return;
        }

        if let Some(round) = game.rounds.get(session.current()) {
            ui.label(format!("Round {} of {}", session.current() + 1, session.rounds));
            ui.add_space(6.0);
            ui.label(RichText::new(&round.prompt).size(18.0));
            ui.add_space(12.0);
            let half = (ui.available_width() - 8.0) / 2.0;
            ui.horizontal(|ui| {
                if ui.add_sized([half, 40.0], Button::new("✅ Safe")).clicked() {
                    app.answer_round(true);
                }
                if ui.add_sized([half, 40.0], Button::new("⚠ Not safe")).clicked() {
                    app.answer_round(false);
                }
            });
        }

        ui.add_space(10.0);
        if ui.button("Leave game").clicked() {
            app.game_session = None;
            app.go_home();
        }
    });
}
