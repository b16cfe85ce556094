//! Connect-flow errors.

use serde::Serialize;

/// Fallback when the redirect lacks `code` or `state`.
pub const MISSING_PARAMETERS_MESSAGE: &str = "missing code or state";
/// Fallback when the callback function rejects the request without a message.
pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect Instagram account";
/// Fallback when the complete function rejects the request without a message.
pub const COMPLETE_FAILED_MESSAGE: &str = "Failed to complete connection";
/// Fallback for transport failures without detail.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Ways the connect flow can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConnectError {
    /// The identity provider reported an error in the redirect.
    #[error("provider error: {error}")]
    ProviderError {
        /// The `error` query parameter.
        error: String,
        /// The `error_description` query parameter.
        description: Option<String>,
    },

    /// The redirect arrived without `code` or `state`.
    #[error("missing code or state")]
    MissingParameters,

    /// The callback function answered with a non-success status.
    #[error("callback rejected (HTTP {status})")]
    ServerRejected {
        /// HTTP status code.
        status: u16,
        /// The body's `error` field.
        message: Option<String>,
    },

    /// The complete function answered with a non-success status.
    #[error("completion rejected (HTTP {status})")]
    CompletionFailed {
        /// HTTP status code.
        status: u16,
        /// The body's `error` field.
        message: Option<String>,
    },

    /// Transport failure or unreadable response.
    #[error("network failure: {}", network_detail(.0))]
    Network(Option<String>),

    /// `select` was called outside `NeedsSelection`.
    #[error("no page selection is pending")]
    NotAwaitingSelection,

    /// `select` was called with an id that was not offered.
    #[error("page '{0}' was not offered for selection")]
    UnknownPage(String),
}

/// Result alias for the connect crate.
pub type Result<T> = std::result::Result<T, ConnectError>;

/// Stable failure code, carried in the JSON form of an error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Provider rejected or cancelled the authorization.
    ProviderError,
    /// Malformed or replayed redirect.
    MissingParameters,
    /// Callback function reported a failure.
    ServerRejected,
    /// Complete function reported a failure.
    CompletionFailed,
    /// Transport or parse failure.
    NetworkFailure,
    /// Illegal selection request.
    InvalidSelection,
}

impl FailureKind {
    /// The snake_case code.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ProviderError => "provider_error",
            FailureKind::MissingParameters => "missing_parameters",
            FailureKind::ServerRejected => "server_rejected",
            FailureKind::CompletionFailed => "completion_failed",
            FailureKind::NetworkFailure => "network_failure",
            FailureKind::InvalidSelection => "invalid_selection",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConnectError {
    /// Provider error from the redirect's query parameters.
    pub fn provider(error: impl Into<String>, description: Option<String>) -> Self {
        ConnectError::ProviderError {
            error: error.into(),
            description,
        }
    }

    /// Transport failure with detail.
    pub fn network(detail: impl Into<String>) -> Self {
        ConnectError::Network(Some(detail.into()))
    }

    /// Failure code.
    pub fn kind(&self) -> FailureKind {
        match self {
            ConnectError::ProviderError { .. } => FailureKind::ProviderError,
            ConnectError::MissingParameters => FailureKind::MissingParameters,
            ConnectError::ServerRejected { .. } => FailureKind::ServerRejected,
            ConnectError::CompletionFailed { .. } => FailureKind::CompletionFailed,
            ConnectError::Network(_) => FailureKind::NetworkFailure,
            ConnectError::NotAwaitingSelection | ConnectError::UnknownPage(_) => {
                FailureKind::InvalidSelection
            }
        }
    }

    /// The single line shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ConnectError::ProviderError { error, description } => match description {
                Some(d) if !d.is_empty() => format!("{error}: {d}"),
                _ => error.clone(),
            },
            ConnectError::MissingParameters => MISSING_PARAMETERS_MESSAGE.to_string(),
            ConnectError::ServerRejected { message, .. } => {
                non_empty_or(message, CONNECT_FAILED_MESSAGE)
            }
            ConnectError::CompletionFailed { message, .. } => {
                non_empty_or(message, COMPLETE_FAILED_MESSAGE)
            }
            ConnectError::Network(detail) => non_empty_or(detail, NETWORK_ERROR_MESSAGE),
            ConnectError::NotAwaitingSelection | ConnectError::UnknownPage(_) => self.to_string(),
        }
    }
}

fn network_detail(detail: &Option<String>) -> &str {
    detail.as_deref().unwrap_or(NETWORK_ERROR_MESSAGE)
}

fn non_empty_or(message: &Option<String>, fallback: &str) -> String {
    match message {
        Some(m) if !m.is_empty() => m.clone(),
        _ => fallback.to_string(),
    }
}
