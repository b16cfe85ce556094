//! The account-connect state machine.
//!
//! ```text
//!            error param / missing code|state
//! Loading ─────────────────────────────────────────▶ Error
//!    │ GET callback
//!    ├── 409 + requires_selection ──▶ NeedsSelection ── POST complete ──┬─▶ Success
//!    ├── other non-2xx ─────────────▶ Error                             └─▶ Error
//!    ├── 2xx ───────────────────────▶ Success
//!    └── transport/parse failure ───▶ Error
//! ```
//!
//! A flow issues at most one GET and one POST. A failed POST is terminal;
//! the selection list is not offered again.

use serde_json::Value;

use crate::backend::{BackendResponse, ConnectBackend};
use crate::error::{ConnectError, Result};
use crate::params::CallbackParams;
use crate::state::{ConnectState, PageOption};

/// Status the callback function uses to ask for a page selection.
pub const SELECTION_REQUIRED_STATUS: u16 = 409;

type Identity = (Option<String>, Option<String>);

/// One run of the connect flow against a backend.
pub struct ConnectFlow<B> {
    backend: B,
    state: ConnectState,
    identity: Option<Identity>,
    callback_requests: usize,
    complete_requests: usize,
}

impl<B: ConnectBackend> ConnectFlow<B> {
    /// A fresh flow in `Loading`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: ConnectState::Loading,
            identity: None,
            callback_requests: 0,
            complete_requests: 0,
        }
    }

    /// A flow already waiting for a selection, rebuilt from a correlation
    /// token carried by a form post.
    ///
    /// With an empty `pages` list any `page_id` is forwarded to the
    /// complete function as-is.
    pub fn awaiting_selection(
        backend: B,
        token: impl Into<String>,
        pages: Vec<PageOption>,
    ) -> Self {
        Self {
            state: ConnectState::NeedsSelection {
                pages,
                state: token.into(),
            },
            ..Self::new(backend)
        }
    }

    /// Current state.
    pub fn state(&self) -> &ConnectState {
        &self.state
    }

    /// Consume the flow, keeping only its state.
    pub fn into_state(self) -> ConnectState {
        self.state
    }

    /// Number of GET callback requests issued.
    pub fn callback_requests(&self) -> usize {
        self.callback_requests
    }

    /// Number of POST complete requests issued.
    pub fn complete_requests(&self) -> usize {
        self.complete_requests
    }

    /// Run the callback step for a redirect.
    ///
    /// Runs once per distinct `(code, state)` pair: calling again with the
    /// same pair returns the current state untouched, a new pair resets
    /// the flow to `Loading` first.
    pub async fn start(&mut self, params: &CallbackParams) -> &ConnectState {
        let identity = params.identity();
        if self.identity.as_ref() == Some(&identity) {
            tracing::debug!(state = %self.state, "Connect flow already ran for this redirect");
            return &self.state;
        }
        self.identity = Some(identity);
        self.state = ConnectState::Loading;

        let next = match self.resolve_callback(params).await {
            Ok(state) => state,
            Err(err) => failed(&err),
        };
        self.transition(next);
        &self.state
    }

    /// Submit the user's page choice.
    ///
    /// Only legal from `NeedsSelection`; otherwise the state is left as is
    /// and `NotAwaitingSelection` is returned. An id outside the offered
    /// list is rejected with `UnknownPage` before any request is made.
    pub async fn select(&mut self, page_id: &str) -> Result<&ConnectState> {
        let token = match &self.state {
            ConnectState::NeedsSelection { pages, state } => {
                if !pages.is_empty() && !pages.iter().any(|p| p.id == page_id) {
                    return Err(ConnectError::UnknownPage(page_id.to_string()));
                }
                state.clone()
            }
            _ => return Err(ConnectError::NotAwaitingSelection),
        };

        self.complete_requests += 1;
        let next = match self.backend.complete(&token, page_id).await {
            Ok(resp) if resp.is_success() => ConnectState::Success,
            Ok(resp) => failed(&ConnectError::CompletionFailed {
                status: resp.status,
                message: resp.error_message(),
            }),
            Err(err) => failed(&err),
        };
        self.transition(next);
        Ok(&self.state)
    }

    async fn resolve_callback(&mut self, params: &CallbackParams) -> Result<ConnectState> {
        if let Some(error) = &params.error {
            return Err(ConnectError::provider(
                error.clone(),
                params.error_description.clone(),
            ));
        }
        let (Some(code), Some(url_state)) = (&params.code, &params.state) else {
            return Err(ConnectError::MissingParameters);
        };

        self.callback_requests += 1;
        let resp = self.backend.callback(code, url_state).await?;
        interpret_callback(resp, url_state)
    }

    fn transition(&mut self, next: ConnectState) {
        match &next {
            ConnectState::Error { message, kind } => {
                tracing::warn!(from = %self.state, kind = %kind, reason = %message, "Connect flow failed");
            }
            _ => tracing::debug!(from = %self.state, to = %next, "Connect flow transition"),
        }
        self.state = next;
    }
}

fn failed(err: &ConnectError) -> ConnectState {
    ConnectState::from_error(err)
}

/// Map a callback response to the next state.
fn interpret_callback(resp: BackendResponse, url_state: &str) -> Result<ConnectState> {
    if resp.status == SELECTION_REQUIRED_STATUS
        && resp.body.get("requires_selection") == Some(&Value::Bool(true))
    {
        // Absent and null both mean "no pages offered".
        let pages = match resp.body.get("pages") {
            None | Some(Value::Null) => Vec::new(),
            Some(pages) => parse_pages(pages)?,
        };
        let token = resp
            .body
            .get("state")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(url_state)
            .to_string();
        return Ok(ConnectState::NeedsSelection {
            pages,
            state: token,
        });
    }
    if !resp.is_success() {
        return Err(ConnectError::ServerRejected {
            status: resp.status,
            message: resp.error_message(),
        });
    }
    Ok(ConnectState::Success)
}

fn parse_pages(value: &Value) -> Result<Vec<PageOption>> {
    serde_json::from_value(value.clone())
        .map_err(|e| ConnectError::network(format!("invalid pages list: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::backend::BackendFuture;
    use crate::error::FailureKind;
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Replays canned responses and records every call.
    #[derive(Default)]
    struct FakeBackend {
        callback: Mutex<Option<Result<BackendResponse>>>,
        complete: Mutex<Option<Result<BackendResponse>>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn with_callback(status: u16, body: Value) -> Self {
            let fake = Self::default();
            *fake.callback.lock().unwrap() = Some(Ok(BackendResponse::new(status, body)));
            fake
        }

        fn then_complete(self, status: u16, body: Value) -> Self {
            *self.complete.lock().unwrap() = Some(Ok(BackendResponse::new(status, body)));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ConnectBackend for FakeBackend {
        fn callback<'a>(&'a self, code: &'a str, state: &'a str) -> BackendFuture<'a> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("GET code={code} state={state}"));
            let result = self
                .callback
                .lock()
                .unwrap()
                .clone()
                .unwrap_or(Ok(BackendResponse::new(200, json!({}))));
            Box::pin(async move { result })
        }

        fn complete<'a>(&'a self, state: &'a str, page_id: &'a str) -> BackendFuture<'a> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("POST state={state} page_id={page_id}"));
            let result = self
                .complete
                .lock()
                .unwrap()
                .clone()
                .unwrap_or(Ok(BackendResponse::new(200, json!({}))));
            Box::pin(async move { result })
        }
    }

    fn selection_body() -> Value {
        json!({
            "requires_selection": true,
            "pages": [
                {"id": "p1", "name": "Shop", "instagram_username": "shop"},
                {"id": "p2", "name": "Blog"},
            ],
            "state": "server-token",
        })
    }

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }

    // ------------------------------------------------------------------------
    // Redirect validation
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_provider_error_skips_request() {
        let backend = std::sync::Arc::new(FakeBackend::default());
        let mut flow = ConnectFlow::new(backend.clone());
        let params = CallbackParams::from_query(
            "error=access_denied&error_description=User+cancelled&code=abc&state=xyz",
        );
        let state = flow.start(&params).await;
        assert_eq!(state.error_message(), Some("access_denied: User cancelled"));
        assert_eq!(flow.callback_requests(), 0);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_state_skips_request() {
        let mut flow = ConnectFlow::new(FakeBackend::default());
        let state = flow.start(&CallbackParams::from_query("code=abc")).await;
        assert_eq!(state.error_message(), Some("missing code or state"));
        assert_eq!(flow.callback_requests(), 0);
    }

    // ------------------------------------------------------------------------
    // Callback responses
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_success_scenario() {
        let backend = std::sync::Arc::new(FakeBackend::with_callback(200, json!({})));
        let mut flow = ConnectFlow::new(backend.clone());
        let state = flow.start(&CallbackParams::from_query("?code=abc&state=xyz")).await;
        assert_eq!(state, &ConnectState::Success);
        assert_eq!(backend.calls(), vec!["GET code=abc state=xyz"]);
    }

    #[tokio::test]
    async fn test_selection_required() {
        let mut flow = ConnectFlow::new(FakeBackend::with_callback(409, selection_body()));
        let state = flow.start(&CallbackParams::new("abc", "xyz")).await;
        match state {
            ConnectState::NeedsSelection { pages, state } => {
                assert_eq!(pages.len(), 2);
                assert_eq!(pages[0].instagram_username.as_deref(), Some("shop"));
                assert_eq!(state, "server-token");
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_selection_falls_back_to_url_state() {
        let body = json!({"requires_selection": true, "pages": [{"id": "p1", "name": "Shop"}]});
        let mut flow = ConnectFlow::new(FakeBackend::with_callback(409, body));
        let state = flow.start(&CallbackParams::new("abc", "xyz")).await;
        assert!(matches!(state, ConnectState::NeedsSelection { state, .. } if state == "xyz"));
    }

    #[tokio::test]
    async fn test_409_without_flag_is_error() {
        let body = json!({"error": "Account already linked"});
        let mut flow = ConnectFlow::new(FakeBackend::with_callback(409, body));
        let state = flow.start(&CallbackParams::new("abc", "xyz")).await;
        assert_eq!(state.error_message(), Some("Account already linked"));
    }

    #[tokio::test]
    async fn test_server_error_fallback_message() {
        let mut flow = ConnectFlow::new(FakeBackend::with_callback(500, Value::Null));
        let state = flow.start(&CallbackParams::new("abc", "xyz")).await;
        assert_eq!(state.error_message(), Some("Failed to connect Instagram account"));
        assert!(matches!(
            state,
            ConnectState::Error {
                kind: FailureKind::ServerRejected,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let backend = FakeBackend::default();
        *backend.callback.lock().unwrap() = Some(Err(ConnectError::network("connection refused")));
        let mut flow = ConnectFlow::new(backend);
        let state = flow.start(&CallbackParams::new("abc", "xyz")).await;
        assert_eq!(state.error_message(), Some("connection refused"));
    }

    #[tokio::test]
    async fn test_absent_and_null_pages_are_equivalent() {
        let absent = json!({"requires_selection": true, "state": "tok"});
        let null = json!({"requires_selection": true, "pages": null, "state": "tok"});
        let expected = ConnectState::NeedsSelection {
            pages: Vec::new(),
            state: "tok".to_string(),
        };
        for body in [absent, null] {
            let mut flow = ConnectFlow::new(FakeBackend::with_callback(409, body));
            let state = flow.start(&CallbackParams::new("abc", "xyz")).await;
            assert_eq!(state, &expected);
        }
    }

    #[tokio::test]
    async fn test_malformed_pages_is_network_error() {
        let body = json!({"requires_selection": true, "pages": "nope"});
        let mut flow = ConnectFlow::new(FakeBackend::with_callback(409, body));
        let state = flow.start(&CallbackParams::new("abc", "xyz")).await;
        assert!(matches!(
            state,
            ConnectState::Error {
                kind: FailureKind::NetworkFailure,
                ..
            }
        ));
    }

    // ------------------------------------------------------------------------
    // Re-run guard
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_same_pair_runs_once() {
        let backend = std::sync::Arc::new(FakeBackend::with_callback(200, json!({})));
        let mut flow = ConnectFlow::new(backend.clone());
        let params = CallbackParams::new("abc", "xyz");
        flow.start(&params).await;
        flow.start(&params).await;
        assert_eq!(flow.callback_requests(), 1);
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_new_pair_reruns() {
        let backend = std::sync::Arc::new(FakeBackend::with_callback(200, json!({})));
        let mut flow = ConnectFlow::new(backend.clone());
        flow.start(&CallbackParams::new("abc", "xyz")).await;
        flow.start(&CallbackParams::new("def", "xyz")).await;
        assert_eq!(flow.callback_requests(), 2);
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_select_success() {
        let backend = std::sync::Arc::new(
            FakeBackend::with_callback(409, selection_body()).then_complete(200, json!({})),
        );
        let mut flow = ConnectFlow::new(backend.clone());
        flow.start(&CallbackParams::new("abc", "xyz")).await;
        let state = flow.select("p2").await.unwrap();
        assert_eq!(state, &ConnectState::Success);
        assert_eq!(
            backend.calls(),
            vec![
                "GET code=abc state=xyz",
                "POST state=server-token page_id=p2"
            ]
        );
    }

    #[tokio::test]
    async fn test_select_failure_is_terminal() {
        let backend = FakeBackend::with_callback(409, selection_body())
            .then_complete(400, json!({"error": "Page no longer available"}));
        let mut flow = ConnectFlow::new(backend);
        flow.start(&CallbackParams::new("abc", "xyz")).await;
        let state = flow.select("p1").await.unwrap().clone();
        assert_eq!(state.error_message(), Some("Page no longer available"));
        assert!(state.is_terminal());

        let err = flow.select("p1").await.unwrap_err();
        assert_eq!(err, ConnectError::NotAwaitingSelection);
        assert_eq!(flow.complete_requests(), 1);
    }

    #[tokio::test]
    async fn test_select_failure_fallback_message() {
        let backend =
            FakeBackend::with_callback(409, selection_body()).then_complete(502, Value::Null);
        let mut flow = ConnectFlow::new(backend);
        flow.start(&CallbackParams::new("abc", "xyz")).await;
        let state = flow.select("p1").await.unwrap();
        assert_eq!(state.error_message(), Some("Failed to complete connection"));
    }

    #[tokio::test]
    async fn test_select_from_loading_rejected() {
        let mut flow = ConnectFlow::new(FakeBackend::default());
        let err = flow.select("p1").await.unwrap_err();
        assert_eq!(err, ConnectError::NotAwaitingSelection);
        assert_eq!(flow.state(), &ConnectState::Loading);
        assert_eq!(flow.complete_requests(), 0);
    }

    #[tokio::test]
    async fn test_select_unknown_page_rejected() {
        let mut flow = ConnectFlow::new(FakeBackend::with_callback(409, selection_body()));
        flow.start(&CallbackParams::new("abc", "xyz")).await;
        let err = flow.select("p9").await.unwrap_err();
        assert_eq!(err, ConnectError::UnknownPage("p9".into()));
        assert!(matches!(flow.state(), ConnectState::NeedsSelection { .. }));
        assert_eq!(flow.complete_requests(), 0);
    }

    #[tokio::test]
    async fn test_awaiting_selection_forwards_any_id() {
        let backend = std::sync::Arc::new(FakeBackend::default());
        let mut flow = ConnectFlow::awaiting_selection(backend.clone(), "tok", vec![]);
        assert_eq!(flow.select("anything").await.unwrap(), &ConnectState::Success);
        assert_eq!(backend.calls(), vec!["POST state=tok page_id=anything"]);
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    proptest! {
        #[test]
        fn test_error_param_never_calls_backend(
            error in "[a-z_]{1,16}",
            code in proptest::option::of("[a-z0-9]{1,8}"),
            state in proptest::option::of("[a-z0-9]{1,8}"),
        ) {
            let params = CallbackParams { code, state, error: Some(error), error_description: None };
            let backend = std::sync::Arc::new(FakeBackend::default());
            let mut flow = ConnectFlow::new(backend.clone());
            let final_state = block_on(async { flow.start(&params).await.clone() });
            prop_assert!(
                matches!(final_state, ConnectState::Error { kind: FailureKind::ProviderError, .. }),
                "unexpected state {:?}", final_state
            );
            prop_assert!(backend.calls().is_empty());
        }

        #[test]
        fn test_missing_code_or_state_never_calls_backend(
            code in proptest::option::of("[a-z0-9]{1,8}"),
            state in proptest::option::of("[a-z0-9]{1,8}"),
        ) {
            prop_assume!(code.is_none() || state.is_none());
            let params = CallbackParams { code, state, error: None, error_description: None };
            let backend = std::sync::Arc::new(FakeBackend::default());
            let mut flow = ConnectFlow::new(backend.clone());
            let final_state = block_on(async { flow.start(&params).await.clone() });
            prop_assert_eq!(final_state.error_message(), Some("missing code or state"));
            prop_assert!(backend.calls().is_empty());
        }

        #[test]
        fn test_selection_offers_every_page(n in 0usize..12) {
            let pages: Vec<Value> = (0..n)
                .map(|i| json!({"id": format!("p{i}"), "name": format!("Page {i}")}))
                .collect();
            let body = json!({"requires_selection": true, "pages": pages});
            let mut flow = ConnectFlow::new(FakeBackend::with_callback(409, body));
            let final_state =
                block_on(async { flow.start(&CallbackParams::new("c", "s")).await.clone() });
            match final_state {
                ConnectState::NeedsSelection { pages, state } => {
                    prop_assert_eq!(pages.len(), n);
                    prop_assert_eq!(state, "s");
                }
                other => prop_assert!(false, "unexpected state {:?}", other),
            }
        }
    }
}
