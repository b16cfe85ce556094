//! Account-connect handlers.
//!
//! The HTML routes render the flow's end state as a page; the `/api`
//! routes return the same state as JSON. Each request runs its own
//! `ConnectFlow`.

use askama::Template;
use axum::Json;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Form, RawQuery, State};
use axum::response::Html;
use serde::Deserialize;
use toolscout_connect::{CallbackParams, ConnectFlow, ConnectState};

use crate::error::{ApiError, HtmlError};
use crate::state::AppState;
use crate::views::ConnectTemplate;

/// Body of the selection form and its JSON twin.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    /// Correlation token from the selection response.
    pub state: String,
    /// Chosen page.
    pub page_id: String,
}

impl SelectRequest {
    fn validate(self) -> Result<Self, ApiError> {
        if self.state.is_empty() {
            return Err(ApiError::BadRequest("state must not be empty".into()));
        }
        if self.page_id.is_empty() {
            return Err(ApiError::BadRequest("page_id must not be empty".into()));
        }
        Ok(self)
    }
}

async fn run_callback(state: &AppState, query: Option<String>) -> ConnectState {
    let params = CallbackParams::from_query(query.as_deref().unwrap_or_default());
    tracing::info!(
        has_code = params.code.is_some(),
        has_state = params.state.is_some(),
        provider_error = params.error.as_deref().unwrap_or(""),
        "Connect callback received"
    );
    let mut flow = ConnectFlow::new(state.backend.clone());
    flow.start(&params).await;
    flow.into_state()
}

async fn run_select(state: &AppState, request: SelectRequest) -> Result<ConnectState, ApiError> {
    let request = request.validate()?;
    tracing::info!(page_id = %request.page_id, "Connect selection received");
    let mut flow = ConnectFlow::awaiting_selection(state.backend.clone(), request.state, vec![]);
    flow.select(&request.page_id)
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(flow.into_state())
}

fn render(state: &AppState, connect: &ConnectState) -> Result<Html<String>, HtmlError> {
    let page = ConnectTemplate::new(connect, &state.config.connect.dashboard_url);
    Ok(Html(page.render()?))
}

/// `GET /connect/instagram/callback`
pub async fn callback_page(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, HtmlError> {
    let connect = run_callback(&state, query).await;
    render(&state, &connect)
}

/// `POST /connect/instagram/select`
pub async fn select_page(
    State(state): State<AppState>,
    form: Result<Form<SelectRequest>, FormRejection>,
) -> Result<Html<String>, HtmlError> {
    let Form(request) = form.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let connect = run_select(&state, request).await?;
    render(&state, &connect)
}

/// `GET /api/connect/instagram/callback`
pub async fn callback_json(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<ConnectState> {
    Json(run_callback(&state, query).await)
}

/// `POST /api/connect/instagram/select`
pub async fn select_json(
    State(state): State<AppState>,
    body: Result<Json<SelectRequest>, JsonRejection>,
) -> Result<Json<ConnectState>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(run_select(&state, request).await?))
}
