use crate::LiteracyApp;
use crate::model::Category;
use crate::ui::helpers::percent_bar;
use crate::ui::layout::simple_panel;
use egui::{Context, RichText};

pub fn ui_badges(app: &mut LiteracyApp, ctx: &Context) {
    let overall = app.tracker.overall_badge_progress();
    let sections: Vec<_> = Category::ALL
        .iter()
        .map(|category| {
            (
                *category,
                app.tracker.category_progress(*category),
                app.badge_cards(*category),
            )
        })
        .collect();

    simple_panel(ctx, 640.0, |ui| {
        ui.heading("🏅 Badges");
        let width = ui.available_width();
        ui.horizontal(|ui| {
            ui.label("Overall");
            percent_bar(ui, overall, width * 0.6);
        });
        ui.add_space(10.0);

        for (category, percent, cards) in &sections {
            ui.horizontal(|ui| {
                ui.label(RichText::new(category.label()).strong());
                ui.label(format!("{percent}%"));
            });
            for card in cards {
                let text = RichText::new(card.label());
                let text = if card.unlocked { text.strong() } else { text.weak() };
                ui.label(text).on_hover_text(&card.description);
                if !card.unlocked {
                    percent_bar(ui, card.progress, width * 0.5);
                }
            }
            ui.add_space(10.0);
        }
    });
}
