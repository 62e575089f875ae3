use crate::LiteracyApp;
use crate::ui::helpers::{percent_bar, split_button_with_restart};
use crate::ui::layout::simple_panel;
use egui::{Context, RichText};

pub fn ui_course(app: &mut LiteracyApp, ctx: &Context) {
    let Some(course) = app
        .shell
        .selected_course
        .as_deref()
        .and_then(|id| app.catalog().course(id))
        .cloned()
    else {
        app.go_home();
        return;
    };
    let entry = app.tracker.progress().courses.get(&course.id).cloned();
    let assessment = course
        .assessment
        .as_deref()
        .and_then(|id| app.catalog().quiz(id))
        .map(|quiz| (quiz.id.clone(), quiz.title.clone()));
    let assessment_done = assessment
        .as_ref()
        .is_some_and(|(id, _)| app.tracker.progress().quiz_completed(id));

    simple_panel(ctx, 640.0, |ui| {
        ui.heading(&course.title);
        ui.label(RichText::new(course.category.label()).italics());
        ui.add_space(6.0);
        ui.label(&course.description);
        ui.add_space(8.0);
        let width = ui.available_width();
        percent_bar(ui, entry.as_ref().map(|c| c.progress).unwrap_or(0), width);
        ui.add_space(10.0);

        for module in &course.modules {
            let done = entry
                .as_ref()
                .and_then(|c| c.modules.get(&module.id))
                .is_some_and(|m| m.completed);
            egui::CollapsingHeader::new(if done {
                format!("✅ {}", module.title)
            } else {
                module.title.clone()
            })
            .id_salt(&module.id)
            .show(ui, |ui| {
                ui.label(&module.summary);
                ui.add_space(4.0);
                if !done && ui.button("Mark as completed").clicked() {
                    app.complete_module(&course.id, &module.id);
                }
            });
        }

        if let Some((quiz_id, title)) = &assessment {
            ui.add_space(12.0);
            ui.label(RichText::new("Assessment").strong());
            let (start, retry) =
                split_button_with_restart(ui, title, width, 36.0, assessment_done);
            if start || retry {
                app.start_quiz(quiz_id);
            }
        }

        ui.add_space(12.0);
        if ui.button("⬅ Back").clicked() {
            app.go_home();
        }
    });
}
