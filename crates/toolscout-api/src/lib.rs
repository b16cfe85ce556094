//! HTTP server for Toolscout.
//!
//! Serves the review and comparison pages from a [`Catalogue`], the
//! account-connect callback page, and a JSON mirror of the connect flow.
//!
//! | route | handler |
//! |-------|---------|
//! | `GET /` | [`handlers::pages::index`] |
//! | `GET /tools/{slug}` | [`handlers::pages::review`] |
//! | `GET /compare/{slug}` | [`handlers::pages::comparison`] |
//! | `GET /connect/instagram/callback` | [`handlers::connect::callback_page`] |
//! | `POST /connect/instagram/select` | [`handlers::connect::select_page`] |
//! | `GET /api/connect/instagram/callback` | [`handlers::connect::callback_json`] |
//! | `POST /api/connect/instagram/select` | [`handlers::connect::select_json`] |
//! | `GET /health` | [`handlers::health::health`] |
//!
//! [`Catalogue`]: toolscout_content::Catalogue

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod views;

pub use error::{ApiError, HtmlError, Result};
pub use handlers::health::HealthResponse;
pub use router::router;
pub use server::serve;
pub use state::AppState;
