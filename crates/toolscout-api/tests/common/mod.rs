//! Test harness: an app wired to an in-memory connect backend.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use serde_json::Value;
use toolscout_connect::{BackendFuture, BackendResponse, ConnectBackend};
use toolscout_content::Catalogue;
use toolscout_core::SiteConfig;
use tower::ServiceExt;

use toolscout_api::{AppState, router};

/// Answers every call with fixed responses and records what it was asked.
pub struct ScriptedBackend {
    callback: BackendResponse,
    complete: BackendResponse,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(callback: BackendResponse, complete: BackendResponse) -> Self {
        Self {
            callback,
            complete,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn ok() -> Self {
        Self::new(
            BackendResponse::new(200, serde_json::json!({})),
            BackendResponse::new(200, serde_json::json!({})),
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ConnectBackend for ScriptedBackend {
    fn callback<'a>(&'a self, code: &'a str, state: &'a str) -> BackendFuture<'a> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("GET {code} {state}"));
        let resp = self.callback.clone();
        Box::pin(async move { Ok(resp) })
    }

    fn complete<'a>(&'a self, state: &'a str, page_id: &'a str) -> BackendFuture<'a> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("POST {state} {page_id}"));
        let resp = self.complete.clone();
        Box::pin(async move { Ok(resp) })
    }
}

/// Router over the embedded catalogue and the given backend.
pub fn app(backend: Arc<ScriptedBackend>) -> Router {
    let state = AppState::with_backend(
        SiteConfig::default(),
        Catalogue::embedded().unwrap(),
        backend,
    );
    router(state)
}

pub async fn send(app: Router, req: Request<Body>) -> Response<Body> {
    app.oneshot(req).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
}
