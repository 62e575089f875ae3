use crate::LiteracyApp;
use crate::model::Category;
use crate::ui::helpers::{big_list_button, percent_bar, split_button_with_restart};
use crate::ui::layout::simple_panel;
use egui::{Context, RichText};

pub fn ui_dashboard(app: &mut LiteracyApp, ctx: &Context) {
    let courses = app.course_infos();
    let games: Vec<(String, String, bool)> = {
        let progress = app.tracker.progress();
        app.catalog()
            .games
            .iter()
            .map(|g| (g.id.clone(), g.title.clone(), progress.game_completed(&g.id)))
            .collect()
    };
    let category_progress: Vec<(Category, u8)> = Category::ALL
        .iter()
        .map(|c| (*c, app.tracker.category_progress(*c)))
        .collect();

    simple_panel(ctx, 640.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🌐 Digital Literacy Quest");
            ui.label("Build the skills to explore the internet safely and wisely.");
        });
        ui.add_space(14.0);

        let width = ui.available_width();
        ui.label(RichText::new("Courses").strong());
        for info in &courses {
            if big_list_button(ui, info.label(), width, 36.0, true) {
                app.open_course(&info.id);
            }
            percent_bar(ui, info.progress, width);
            ui.add_space(6.0);
        }

        ui.add_space(10.0);
        ui.label(RichText::new("Mini-games").strong());
        for (id, title, completed) in &games {
            let (play, retry) = split_button_with_restart(ui, title, width, 32.0, *completed);
            if play || retry {
                app.start_game(id);
            }
        }

        ui.add_space(10.0);
        ui.label(RichText::new("Badges by category").strong());
        for (category, percent) in &category_progress {
            ui.horizontal(|ui| {
                ui.label(category.label());
                percent_bar(ui, *percent, width * 0.5);
            });
        }

        ui.add_space(14.0);
        ui.horizontal(|ui| {
            if ui.button("📤 Export progress").clicked() {
                app.export_progress(ctx);
            }
            if ui.button("🔄 Reset progress").clicked() {
                app.confirm_reset = true;
            }
        });
    });
}
