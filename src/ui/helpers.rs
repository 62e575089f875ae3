// src/ui/helpers.rs
use egui::{Button, Color32, ProgressBar, RichText, Ui, Vec2};

pub fn big_list_button(ui: &mut Ui, label: String, width: f32, height: f32, enabled: bool) -> bool {
    ui.add_enabled(enabled, Button::new(label).min_size(Vec2::new(width, height)))
        .clicked()
}

/// Labelled bar for a 0..=100 percentage.
pub fn percent_bar(ui: &mut Ui, percent: u8, width: f32) {
    ui.add(
        ProgressBar::new(f32::from(percent) / 100.0)
            .desired_width(width)
            .show_percentage(),
    );
}

/// Returns (clicked_main, clicked_restart). Completed items get a second
/// button to play again.
pub fn split_button_with_restart(
    ui: &mut Ui,
    label: &str,
    total_width: f32,
    height: f32,
    is_completed: bool,
) -> (bool, bool) {
    if !is_completed {
        let clicked = ui
            .add_sized([total_width, height], Button::new(label))
            .clicked();
        return (clicked, false);
    }

    let gap = 8.0;
    let restart_w = (total_width / 4.0).max(80.0);
    let main_w = (total_width - restart_w - gap).max(120.0);

    let mut clicked_main = false;
    let mut clicked_restart = false;
    ui.horizontal(|ui| {
        let main_btn = Button::new(format!("{label}  ✅")).min_size(Vec2::new(main_w, height));
        clicked_main = ui.add(main_btn).on_hover_text("Completed").clicked();

        let restart_btn = Button::new("⟲ Retry").min_size(Vec2::new(restart_w, height));
        clicked_restart = ui.add(restart_btn).clicked();
    });
    (clicked_main, clicked_restart)
}

pub fn feedback_label(ui: &mut Ui, correct: bool, text: &str) {
    let (icon, color) = if correct {
        ("✅", Color32::from_rgb(0x2e, 0x9e, 0x44))
    } else {
        ("❌", Color32::from_rgb(0xd0, 0x3b, 0x3b))
    };
    ui.label(RichText::new(format!("{icon} {text}")).color(color).strong());
}
