//! Error types shared across quizgen crates.
//!
//! Provider errors live here rather than in `quizgen-providers` so the
//! generation pipeline can downcast and classify them for retry decisions
//! without string matching.

use thiserror::Error;

use crate::model::QuestionSchema;

/// Errors that can occur when talking to a quiz-generation backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (missing or invalid token/key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The backend answered but produced no quiz text.
    #[error("no quiz generated: {0}")]
    NoQuiz(String),
}

impl ProviderError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed(_)
                | ProviderError::ModelNotFound(_)
                | ProviderError::NoQuiz(_)
        )
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ProviderError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}

/// Invalid parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("option count must be at least 2, got {0}")]
    TooFewOptions(usize),

    #[error("the paragraph parser only supports multiple choice, not {0}")]
    UnsupportedSchema(QuestionSchema),
}

/// Errors raised by the generation pipeline before or after the backend call.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("please provide some text to generate a quiz from")]
    EmptyText,

    #[error("number of questions must be at least 1")]
    NoQuestionsRequested,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
