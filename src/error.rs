//! Error handling for the resume ATS scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAtsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Could not extract usable text from this document ({length} characters, need at least {minimum})")]
    InsufficientText { length: usize, minimum: usize },

    #[error("{component} degraded: {reason}")]
    ComponentDegradation { component: String, reason: String },

    #[error("Skills catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ResumeAtsError {
    pub fn degraded(component: &str, reason: impl Into<String>) -> Self {
        ResumeAtsError::ComponentDegradation {
            component: component.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures that mean no usable resume text could be obtained.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            ResumeAtsError::Io(_)
                | ResumeAtsError::Extraction(_)
                | ResumeAtsError::UnsupportedFormat(_)
                | ResumeAtsError::InsufficientText { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ResumeAtsError>;

/// Convert anyhow errors (model2vec loading) to our custom error type
impl From<anyhow::Error> for ResumeAtsError {
    fn from(err: anyhow::Error) -> Self {
        ResumeAtsError::ModelError(err.to_string())
    }
}
