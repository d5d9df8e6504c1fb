use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Failures that abort an interaction.
///
/// An empty selection is not an error; it is reported through
/// [`crate::engine::Evaluation::NoPortfolio`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Could not load dataset '{source_ref}': {reason}")]
    DataLoad { source_ref: String, reason: String },

    #[error("Malformed dataset row: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to fetch dataset: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn data_load(source_ref: impl Into<String>, reason: impl ToString) -> Self {
        EngineError::DataLoad {
            source_ref: source_ref.into(),
            reason: reason.to_string(),
        }
    }
}
