use thiserror::Error;

/// Rejections raised before any model is contacted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Source and target languages must be different.")]
    SameLanguage,

    #[error("Please enter some text to translate.")]
    EmptyText,
}

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown language: {0}")]
    LanguageNotFound(String),

    #[error("No translation model published for {0}")]
    ModelNotFound(String),

    #[error("Model provider error: {0}")]
    Provider(String),
}

impl TranslateError {
    /// Short machine-readable name used by the JSON API.
    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::Validation(_) => "validation",
            TranslateError::LanguageNotFound(_) => "language_not_found",
            TranslateError::ModelNotFound(_) => "model_not_found",
            TranslateError::Provider(_) => "provider",
        }
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::Provider(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TranslateError>;
