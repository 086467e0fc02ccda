use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypecodeError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid question bank: {0}")]
    InvalidBank(String),

    #[error("invalid answer for question {question}: {reason}")]
    InvalidAnswer { question: u32, reason: String },

    #[error("unknown question id: {0}")]
    UnknownQuestion(String),

    #[error("answers incomplete: missing question(s) {0}")]
    IncompleteAnswers(String),

    #[error("unknown type code: {0}")]
    UnknownTypeCode(String),

    #[error("unknown quiz category: {0}")]
    UnknownCategory(u32),

    #[error("no questions available for category {0}")]
    EmptyPool(u32),

    #[error("nothing to review: session {0} has no incorrect answers")]
    NothingToReview(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TypecodeError>;
