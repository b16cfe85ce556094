//! Account-connect callback flow.
//!
//! After the Instagram/Facebook authorization redirect, the site reads
//! `code` and `state` from the query and asks a serverless function to
//! finish the OAuth exchange. The function either succeeds, fails, or
//! answers `409` with a list of pages the user must choose from; the
//! choice is then posted to a second function.
//!
//! # Modules
//!
//! - [`params`]: redirect query parsing
//! - [`state`]: `ConnectState` and `PageOption`
//! - [`flow`]: the `ConnectFlow` state machine
//! - [`backend`]: `ConnectBackend` trait and the `reqwest` client
//! - [`error`]: `ConnectError` and its user-facing messages
//!
//! # Example
//!
//! ```rust,no_run
//! use toolscout_connect::{CallbackParams, ConnectFlow, HttpConnectBackend};
//!
//! # async fn run() {
//! let backend = HttpConnectBackend::new(
//!     "https://example.netlify.app/.netlify/functions/instagram-callback",
//!     "https://example.netlify.app/.netlify/functions/instagram-complete",
//! );
//! let mut flow = ConnectFlow::new(backend);
//! let state = flow.start(&CallbackParams::from_query("?code=abc&state=xyz")).await;
//! println!("{state}");
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod flow;
pub mod params;
pub mod state;

pub use backend::{BackendFuture, BackendResponse, ConnectBackend, HttpConnectBackend};
pub use error::{ConnectError, FailureKind, Result};
pub use flow::{ConnectFlow, SELECTION_REQUIRED_STATUS};
pub use params::CallbackParams;
pub use state::{ConnectState, PageOption};
