//! Error types for API calls and local session storage

use thiserror::Error;

/// Generic text shown when the API gives no message of its own
pub const MENSAGEM_GENERICA: &str = "request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Error reported by the API, with its own message
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Token missing, expired or rejected; the stored session was cleared
    #[error("authentication required, run `academia login`")]
    Unauthorized,

    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Client-side check failed before anything was sent
    #[error("{0}")]
    Validation(String),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("session storage: {0}")]
    Session(#[from] rusqlite::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
