use crate::activity::PageVisit;
use crate::config::AppConfig;
use crate::games::GameOutcome;
use crate::model::{AppState, Catalog};
use crate::settings::UserSettings;
use crate::store::{KeyValueStore, ProgressStore};
use crate::tracker::{QuizSubmission, SystemClock, Tracker};
use serde::{Deserialize, Serialize};

pub mod actions;
pub mod navigation;
pub mod resets;
pub mod session;
pub mod view_models;

pub use crate::view_models::{BadgeCard, CourseInfo, PathInfo, QuestionRow};
pub use session::{GameSession, QuizSession};

pub type AppTracker = Tracker<Box<dyn KeyValueStore>, SystemClock>;

/// What eframe persists between runs. Learning progress is not part of it; it
/// lives in the progress store.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ShellState {
    pub state: AppState,
    pub selected_course: Option<String>,
    pub selected_path: Option<String>,
}

pub struct LiteracyApp {
    pub tracker: AppTracker,
    pub config: AppConfig,
    pub shell: ShellState,
    pub session: Option<QuizSession>,
    pub game_session: Option<GameSession>,
    pub last_result: Option<QuizSubmission>,
    pub last_game: Option<GameOutcome>,
    pub message: String,
    pub confirm_reset: bool,
    pub visit: Option<PageVisit>,
    /// Settings as edited in the UI.
    pub settings: UserSettings,
    /// Settings last pushed into the egui context.
    pub applied_settings: Option<UserSettings>,
}

impl LiteracyApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, catalog: Catalog) -> Self {
        let shell = cc
            .storage
            .and_then(|storage| eframe::get_value::<ShellState>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        let store = ProgressStore::with_prefix(config.open_backend(), config.key_prefix.clone());
        let tracker = Tracker::new(store, catalog, SystemClock);
        Self::with_tracker(tracker, config, shell)
    }

    pub fn with_tracker(tracker: AppTracker, config: AppConfig, mut shell: ShellState) -> Self {
        // Sessions are not persisted, so their screens cannot be restored.
        if matches!(
            shell.state,
            AppState::Quiz | AppState::QuizSummary | AppState::Game
        ) {
            shell.state = AppState::Dashboard;
        }
        if matches!(shell.state, AppState::Course) && shell.selected_course.is_none() {
            shell.state = AppState::Dashboard;
        }

        let settings = tracker.settings();
        let visit = Some(tracker.begin_visit());
        let mut app = Self {
            tracker,
            config,
            shell,
            session: None,
            game_session: None,
            last_result: None,
            last_game: None,
            message: String::new(),
            confirm_reset: false,
            visit,
            settings,
            applied_settings: None,
        };
        // Badges added to the catalog since the last run start evaluated.
        app.tracker.update_all_badge_progress();
        app
    }

    pub fn state(&self) -> AppState {
        self.shell.state
    }

    pub fn catalog(&self) -> &Catalog {
        self.tracker.catalog()
    }
}

impl Drop for LiteracyApp {
    fn drop(&mut self) {
        self.end_visit();
    }
}
