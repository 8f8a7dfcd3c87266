use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum QuoteError {
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("No quotes found")]
    NoQuotesFound,

    #[error("No quotes found for author: {0}")]
    NoQuotesForAuthor(String),

    #[error("Lang \"{0}\" not supported")]
    UnsupportedLanguage(String),

    #[error("Translation failed after trying all endpoints.")]
    TranslationUnavailable,

    #[error("Failed to read {path}: {reason}")]
    StoreRead { path: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type QuoteResult<T> = Result<T, QuoteError>;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl QuoteError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuoteError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            QuoteError::NoQuotesFound
            | QuoteError::NoQuotesForAuthor(_)
            | QuoteError::UnsupportedLanguage(_) => StatusCode::NOT_FOUND,
            QuoteError::Validation(_) => StatusCode::BAD_REQUEST,
            QuoteError::TranslationUnavailable => StatusCode::BAD_GATEWAY,
            QuoteError::StoreRead { .. } | QuoteError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Plain-text rendition used by the SVG endpoint.
    pub fn into_text_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
