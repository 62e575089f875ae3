use thiserror::Error;

/// Failures of a key-value backend. They never leave the store: the store logs
/// them and falls back to defaults or drops the write.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage quota exceeded while writing `{key}`")]
    QuotaExceeded { key: String },
    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Programmer errors in engine inputs. The UI is never expected to produce them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },
    #[error("quiz has no questions")]
    EmptyQuiz,
    #[error("question {index} marks option {correct} as correct but has {options} options")]
    InvalidCorrectAnswer {
        index: usize,
        correct: usize,
        options: usize,
    },
    #[error("expected {expected} game answers, got {actual}")]
    RoundCountMismatch { expected: usize, actual: usize },
    #[error("unknown quiz `{0}`")]
    UnknownQuiz(String),
    #[error("unknown course `{0}`")]
    UnknownCourse(String),
    #[error("module `{module}` does not belong to course `{course}`")]
    UnknownModule { course: String, module: String },
    #[error("unknown game `{0}`")]
    UnknownGame(String),
    #[error("unknown learning path `{0}`")]
    UnknownLearningPath(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BadgeError {
    #[error("badge rule has nothing to evaluate")]
    EmptyRule,
    #[error("badge rule threshold must be greater than zero")]
    ZeroThreshold,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
    #[error("`{owner}` references unknown {kind} `{id}`")]
    UnknownReference {
        owner: String,
        kind: &'static str,
        id: String,
    },
    #[error("question `{question}` of quiz `{quiz}` is malformed: {reason}")]
    MalformedQuestion {
        quiz: String,
        question: String,
        reason: String,
    },
}
