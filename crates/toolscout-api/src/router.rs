//! Route table.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers::{connect, health, pages};
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/tools/{slug}", get(pages::review))
        .route("/compare/{slug}", get(pages::comparison))
        .route("/connect/instagram/callback", get(connect::callback_page))
        .route("/connect/instagram/select", post(connect::select_page))
        .route("/api/connect/instagram/callback", get(connect::callback_json))
        .route("/api/connect/instagram/select", post(connect::select_json))
        .route("/health", get(health::health))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
