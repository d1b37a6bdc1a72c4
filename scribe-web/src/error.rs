//! Error types for scribe-web
//!
//! Page handlers surface three user-visible classes: forbidden, not found,
//! and internal error. Each maps to a static rendered page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::ui;

/// Page handler error type
#[derive(Debug, Error)]
pub enum PageError {
    /// Role check failed (403)
    #[error("Forbidden")]
    Forbidden,

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<scribe_common::Error> for PageError {
    fn from(err: scribe_common::Error) -> Self {
        match err {
            scribe_common::Error::NotFound(what) => PageError::NotFound(what),
            scribe_common::Error::InvalidInput(what) => PageError::BadRequest(what),
            other => PageError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for PageError {
    fn from(err: sqlx::Error) -> Self {
        PageError::Internal(format!("Database error: {}", err))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, page) = match self {
            PageError::Forbidden => (StatusCode::FORBIDDEN, ui::forbidden_page()),
            PageError::NotFound(what) => {
                tracing::debug!(what = %what, "page not found");
                (StatusCode::NOT_FOUND, ui::not_found_page())
            }
            PageError::BadRequest(what) => {
                tracing::debug!(what = %what, "bad request");
                (StatusCode::BAD_REQUEST, ui::bad_request_page())
            }
            PageError::Internal(what) => {
                // The detail stays in the log; the page is static
                tracing::error!(what = %what, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, ui::internal_error_page())
            }
        };

        (status, Html(page)).into_response()
    }
}

/// Result type for page handlers
pub type PageResult<T> = Result<T, PageError>;

/// Error type for the JSON endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<scribe_common::Error> for ApiError {
    fn from(err: scribe_common::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Internal(message) = self;
        tracing::error!(what = %message, "api error");

        let body = axum::Json(serde_json::json!({
            "error": message,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
