use crate::LiteracyApp;
use crate::model::AppState;
use crate::settings::Theme;
use egui::{CentralPanel, Context, Frame, Ui};

pub fn top_panel(app: &mut LiteracyApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            let current = app.state();
            let tabs = [
                (AppState::Dashboard, "🏠"),
                (AppState::LearningPaths, "🧭"),
                (AppState::Badges, "🏅"),
                (AppState::Settings, "⚙"),
            ];
            for (state, icon) in tabs {
                let label = format!("{icon} {}", state.title());
                if ui.selectable_label(current == state, label).clicked() {
                    match state {
                        AppState::Badges => app.open_badges(),
                        AppState::Settings => app.open_settings(),
                        other => app.navigate(other),
                    }
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let progress = app.tracker.progress();
                ui.label(format!("⏱ {} min", progress.time_spent));
                ui.label(format!("🏅 {}%", app.tracker.overall_badge_progress()));
            });
        });
    });
}

pub fn bottom_panel(app: &mut LiteracyApp, ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🌙 Dark").clicked() {
                app.settings.theme = Theme::Dark;
                app.save_settings();
            }
            if ui.button("☀ Light").clicked() {
                app.settings.theme = Theme::Light;
                app.save_settings();
            }

            if !app.message.is_empty() {
                ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                    ui.label(&app.message);
                });
            }
        });
    });
}

/// Panel centered both ways, with a capped content width.
pub fn centered_panel(
    ctx: &Context,
    est_height: f32,
    max_width: f32,
    inner: impl FnOnce(&mut Ui),
) {
    CentralPanel::default().show(ctx, |ui| {
        let extra = ((ui.available_height() - est_height) / 2.0).max(0.0);
        ui.add_space(extra);
        ui.vertical_centered(|ui| {
            Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    let w = ui.available_width().min(max_width);
                    ui.set_width(w);
                    inner(ui);
                });
        });
        ui.add_space(extra);
    });
}

/// Scrollable panel for long lists.
pub fn simple_panel(ctx: &Context, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        let w = ui.available_width().min(max_width);
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    Frame::default()
                        .fill(ui.visuals().window_fill())
                        .inner_margin(egui::Margin::symmetric(16, 12))
                        .show(ui, |ui| {
                            ui.set_width(w);
                            inner(ui);
                        });
                });
            });
    });
}
