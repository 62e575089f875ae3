use crate::badges::BadgeCatalogue;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    InformationLiteracy,
    OnlineSafety,
    DigitalCommunication,
    SpecialAchievement,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::InformationLiteracy,
        Category::OnlineSafety,
        Category::DigitalCommunication,
        Category::SpecialAchievement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::InformationLiteracy => "Information Literacy",
            Category::OnlineSafety => "Online Safety",
            Category::DigitalCommunication => "Digital Communication",
            Category::SpecialAchievement => "Special Achievement",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub category: Category,
    /// Seconds; quizzes without a limit earn no time bonus.
    #[serde(default)]
    pub time_limit: Option<u32>,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CourseModule {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub modules: Vec<CourseModule>,
    /// Quiz that closes the course; its in-flight answers are saved per course.
    #[serde(default)]
    pub assessment: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameRound {
    pub prompt: String,
    /// Expected verdict: `true` when the situation is safe.
    pub safe: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

fn default_pass_score() -> u8 {
    70
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Game {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default = "default_pass_score")]
    pub pass_score: u8,
    pub rounds: Vec<GameRound>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LearningPath {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub quizzes: Vec<String>,
    #[serde(default)]
    pub games: Vec<String>,
}

impl LearningPath {
    pub fn total_modules(&self) -> u32 {
        (self.quizzes.len() + self.games.len()) as u32
    }
}

/// Static content consumed by the engine.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Catalog {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub learning_paths: Vec<LearningPath>,
    #[serde(default)]
    pub badges: BadgeCatalogue,
}

impl Catalog {
    pub fn quiz(&self, id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == id)
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn game(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn learning_path(&self, id: &str) -> Option<&LearningPath> {
        self.learning_paths.iter().find(|p| p.id == id)
    }

    /// Course whose closing assessment is `quiz_id`.
    pub fn course_for_assessment(&self, quiz_id: &str) -> Option<&Course> {
        self.courses
            .iter()
            .find(|c| c.assessment.as_deref() == Some(quiz_id))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Dashboard,
    Course,
    Quiz,
    QuizSummary,
    LearningPaths,
    Badges,
    Game,
    Settings,
}

impl AppState {
    pub fn title(&self) -> &'static str {
        match self {
            AppState::Dashboard => "Home",
            AppState::Course => "Course",
            AppState::Quiz => "Quiz",
            AppState::QuizSummary => "Results",
            AppState::LearningPaths => "Learning paths",
            AppState::Badges => "Badges",
            AppState::Game => "Mini-game",
            AppState::Settings => "Settings",
        }
    }
}
