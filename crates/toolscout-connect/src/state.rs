//! Connect-flow state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConnectError, FailureKind};

/// A page/account the user can pick when the connection is ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOption {
    /// Identifier sent back as `page_id`.
    pub id: String,
    /// Page name.
    pub name: String,
    /// Linked Instagram handle, when the page has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_username: Option<String>,
}

impl PageOption {
    /// Label shown in the picker: `name (@handle)` or just `name`.
    pub fn label(&self) -> String {
        match &self.instagram_username {
            Some(handle) if !handle.is_empty() => format!("{} (@{handle})", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Where the connect flow is.
///
/// `Error` and `Success` are terminal. The JSON form is tagged by
/// `status`:
///
/// ```json
/// {"status": "needs_selection", "pages": [...], "state": "tok"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConnectState {
    /// Waiting on the callback function.
    Loading,
    /// Failed; `message` is the line shown to the user.
    Error {
        /// User-facing message.
        message: String,
        /// Failure code.
        kind: FailureKind,
    },
    /// Several pages qualify and the user must pick one.
    NeedsSelection {
        /// Offered pages, in server order.
        pages: Vec<PageOption>,
        /// Correlation token for the complete call.
        state: String,
    },
    /// Account connected.
    Success,
}

impl ConnectState {
    /// Error state for a failure.
    pub fn from_error(err: &ConnectError) -> Self {
        ConnectState::Error {
            message: err.user_message(),
            kind: err.kind(),
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConnectState::Error { .. } | ConnectState::Success)
    }

    /// The error message, if this is an error state.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ConnectState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Short state name, matching the JSON `status` tag.
    pub fn name(&self) -> &'static str {
        match self {
            ConnectState::Loading => "loading",
            ConnectState::Error { .. } => "error",
            ConnectState::NeedsSelection { .. } => "needs_selection",
            ConnectState::Success => "success",
        }
    }
}

impl fmt::Display for ConnectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectState::Error { message, .. } => write!(f, "error: {message}"),
            ConnectState::NeedsSelection { pages, .. } => {
                write!(f, "needs_selection ({} pages)", pages.len())
            }
            other => f.write_str(other.name()),
        }
    }
}
