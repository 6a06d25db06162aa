//! LLM Error Types
//!
//! Failures talking to the model service. Every variant means the upstream
//! could not produce an answer; malformed model *content* is never an error.

/// Errors that can occur during model service calls
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[source] reqwest::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LLMError::Timeout
        } else {
            LLMError::HttpError(err)
        }
    }
}

/// Result type for model service operations
pub type Result<T> = std::result::Result<T, LLMError>;
