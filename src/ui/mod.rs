mod helpers;
pub mod layout;
pub mod views;

use crate::app::LiteracyApp;
use crate::model::AppState;
use crate::settings::{Theme, UserSettings};
use eframe::{APP_KEY, App, Frame, set_value};
use egui::{Color32, Context, ThemePreference};
use layout::{bottom_panel, top_panel};

/// Pushes the stored preferences into the egui context.
pub fn apply_settings(ctx: &Context, settings: &UserSettings) {
    ctx.set_theme(match settings.theme {
        Theme::Light => ThemePreference::Light,
        Theme::Dark => ThemePreference::Dark,
        Theme::System => ThemePreference::System,
    });
    let accessibility = &settings.accessibility;
    ctx.all_styles_mut(|style| {
        style.visuals.override_text_color = accessibility.high_contrast.then(|| {
            if style.visuals.dark_mode {
                Color32::WHITE
            } else {
                Color32::BLACK
            }
        });
        style.animation_time = if accessibility.reduced_motion {
            0.0
        } else {
            1.0 / 12.0
        };
    });
    ctx.set_zoom_factor(accessibility.zoom_factor());
}

impl App for LiteracyApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        if self.applied_settings.as_ref() != Some(&self.settings) {
            apply_settings(ctx, &self.settings);
            self.applied_settings = Some(self.settings.clone());
        }

        // Quizzes and games keep the whole screen.
        if !matches!(self.state(), AppState::Quiz | AppState::Game) {
            top_panel(self, ctx);
        }
        bottom_panel(self, ctx);

        match self.state() {
            AppState::Dashboard => views::dashboard::ui_dashboard(self, ctx),
            AppState::Course => views::course::ui_course(self, ctx),
            AppState::Quiz => views::quiz::ui_quiz(self, ctx),
            AppState::QuizSummary => views::summary::ui_quiz_summary(self, ctx),
            AppState::LearningPaths => views::paths::ui_learning_paths(self, ctx),
            AppState::Badges => views::badges::ui_badges(self, ctx),
            AppState::Game => views::game::ui_game(self, ctx),
            AppState::Settings => views::settings::ui_settings(self, ctx),
        }

        if self.confirm_reset {
            self.confirm_reset(ctx);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        set_value(storage, APP_KEY, &self.shell);
    }
}
