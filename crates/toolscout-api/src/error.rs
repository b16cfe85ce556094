//! Error types for toolscout-api

use askama::Template;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::views::ErrorTemplate;

/// Result type alias for toolscout-api operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while serving a request
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// No page with this slug
    #[error("{kind} '{slug}' not found")]
    NotFound {
        /// "review" or "comparison"
        kind: &'static str,
        /// Requested slug
        slug: String,
    },

    /// Malformed request input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Error from toolscout-core
    #[error("Core error: {0}")]
    Core(#[from] toolscout_core::Error),

    /// Server I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Not-found error for a page kind.
    pub fn not_found(kind: &'static str, slug: impl Into<String>) -> Self {
        ApiError::NotFound {
            kind,
            slug: slug.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Render(_) | ApiError::Core(_) | ApiError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short error category for JSON bodies.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Render(_) | ApiError::Core(_) | ApiError::Io(_) => "internal",
        }
    }

    /// Render as a plain HTML page instead of JSON.
    pub fn into_html(self) -> HtmlError {
        HtmlError(self)
    }

    fn log(&self) {
        if self.status().is_server_error() {
            tracing::error!(category = self.category(), error = %self, "Request failed");
        } else {
            tracing::debug!(category = self.category(), error = %self, "Request rejected");
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let body = serde_json::json!({
            "error": {
                "category": self.category(),
                "message": self.to_string(),
            }
        });
        (
            self.status(),
            [(header::CONTENT_TYPE, "application/json")],
            serde_json::to_string(&body).unwrap_or_default(),
        )
            .into_response()
    }
}

/// An [`ApiError`] rendered for browsers.
#[derive(Debug)]
pub struct HtmlError(pub ApiError);

impl From<ApiError> for HtmlError {
    fn from(err: ApiError) -> Self {
        HtmlError(err)
    }
}

impl From<askama::Error> for HtmlError {
    fn from(err: askama::Error) -> Self {
        HtmlError(ApiError::Render(err))
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let err = self.0;
        err.log();
        let status = err.status();
        let page = ErrorTemplate {
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            message: err.to_string(),
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(render_err) => {
                tracing::error!(error = %render_err, "Failed to render error page");
                status.into_response()
            }
        }
    }
}
