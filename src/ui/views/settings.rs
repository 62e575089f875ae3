use crate::LiteracyApp;
use crate::settings::Theme;
use crate::ui::layout::centered_panel;
use egui::{Context, RichText, Slider};

pub fn ui_settings(app: &mut LiteracyApp, ctx: &Context) {
    centered_panel(ctx, 420.0, 520.0, |ui| {
        ui.heading("⚙ Settings");
        ui.add_space(10.0);

        ui.label(RichText::new("Theme").strong());
        ui.horizontal(|ui| {
            let theme = &mut app.settings.theme;
            ui.radio_value(theme, Theme::Light, "Light");
            ui.radio_value(theme, Theme::Dark, "Dark");
            ui.radio_value(theme, Theme::System, "System");
        });
        ui.add_space(8.0);

        ui.label(RichText::new("Sound").strong());
        let sound = &mut app.settings.sound;
        ui.checkbox(&mut sound.enabled, "Sound effects");
        let mut volume = sound.volume;
        if ui
            .add_enabled(sound.enabled, Slider::new(&mut volume, 0..=100).text("Volume"))
            .changed()
        {
            sound.set_volume(volume);
        }
        ui.add_space(8.0);

        ui.label(RichText::new("Accessibility").strong());
        let accessibility = &mut app.settings.accessibility;
        ui.checkbox(&mut accessibility.high_contrast, "High contrast");
        ui.checkbox(&mut accessibility.large_text, "Large text");
        ui.checkbox(&mut accessibility.reduced_motion, "Reduce motion");
        ui.checkbox(&mut accessibility.screen_reader, "Screen reader hints");
        ui.add_space(8.0);

        ui.checkbox(&mut app.settings.auto_save, "Save changes automatically");
        ui.add_space(12.0);

        let dirty = app.settings != app.tracker.settings();
        if dirty && app.settings.auto_save {
            app.save_settings();
        }
        ui.horizontal(|ui| {
            if ui.add_enabled(dirty, egui::Button::new("💾 Save")).clicked() {
                app.save_settings();
            }
            if ui.button("⬅ Back").clicked() {
                app.go_home();
            }
        });
    });
}
