use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A dependency call failed outright (non-2xx, transport error, timeout)
    #[error("{context}: {details}")]
    UpstreamUnavailable { context: String, details: String },

    #[error("No movie suggestions generated")]
    NoSuggestions,

    #[error("No movies found")]
    NoMatches { searched_titles: Vec<String> },

    #[error("Unexpected upstream response: {0}")]
    UpstreamDataShape(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Generic failure of a metadata provider call
    pub fn provider(details: impl ToString) -> Self {
        AppError::UpstreamUnavailable {
            context: "Provider request failed".to_string(),
            details: details.to_string(),
        }
    }

    /// Failure of the completion service call
    pub fn completion(details: impl ToString) -> Self {
        AppError::UpstreamUnavailable {
            context: "Failed to process movie suggestions".to_string(),
            details: details.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::NoSuggestions | AppError::NoMatches { .. } => {
                StatusCode::NOT_FOUND
            }
            AppError::UpstreamUnavailable { .. }
            | AppError::UpstreamDataShape(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::InvalidArgument(msg) | AppError::NotFound(msg) => json!({ "error": msg }),
            AppError::UpstreamUnavailable { context, details } => json!({
                "error": context,
                "details": details
            }),
            AppError::NoSuggestions => json!({ "error": "No movie suggestions generated" }),
            AppError::NoMatches { searched_titles } => json!({
                "error": "No movies found",
                "searchedTitles": searched_titles
            }),
            AppError::UpstreamDataShape(details) => json!({
                "error": "Unexpected upstream response",
                "details": details
            }),
            AppError::Internal(details) => json!({
                "error": "Internal server error",
                "details": details
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidArgument(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
