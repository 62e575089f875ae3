use crate::LiteracyApp;
use crate::ui::helpers::big_list_button;
use crate::ui::layout::centered_panel;
use egui::{Context, RichText};
use std::time::Duration;

pub fn ui_quiz(app: &mut LiteracyApp, ctx: &Context) {
    let Some(session) = app.session.clone() else {
        app.go_home();
        return;
    };
    let Some(quiz) = app.catalog().quiz(&session.quiz_id).cloned() else {
        app.go_home();
        return;
    };
    let Some(question) = quiz.questions.get(session.current) else {
        app.finish_quiz();
        return;
    };

    let remaining = session.remaining(&quiz, app.tracker.now());
    if remaining == Some(0) {
        app.time_up();
        return;
    }
    if remaining.is_some() {
        ctx.request_repaint_after(Duration::from_secs(1));
    }

    centered_panel(ctx, 420.0, 600.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(&quiz.title);
            ui.label(format!(
                "Question {} of {}",
                session.current + 1,
                quiz.questions.len()
            ));
            if let Some(seconds) = remaining {
                ui.label(RichText::new(format!("⏱ {seconds}s left")).strong());
            }
        });
        ui.add_space(12.0);
        ui.label(RichText::new(&question.prompt).size(18.0));
        ui.add_space(12.0);

        let width = ui.available_width();
        for (index, option) in question.options.iter().enumerate() {
            if big_list_button(ui, option.clone(), width, 36.0, true) {
                app.select_answer(index);
            }
            ui.add_space(4.0);
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Skip question").clicked() {
                app.skip_question();
            }
            if ui.button("Leave quiz").clicked() {
                // Assessment answers are already saved; a plain quiz starts over.
                app.session = None;
                app.go_home();
            }
        });
        if !app.message.is_empty() {
            ui.add_space(6.0);
            ui.label(&app.message);
        }
    });
}
