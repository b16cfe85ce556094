//! Stand-in for the serverless connect functions.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::{Value, json};
use toolscout_connect::HttpConnectBackend;

/// A canned answer: status plus raw body text.
#[derive(Clone, Debug)]
pub struct Canned {
    pub status: u16,
    pub body: String,
}

impl Canned {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Default)]
struct Recorded {
    callback_queries: Vec<Value>,
    complete_bodies: Vec<Value>,
}

#[derive(Clone)]
struct StubState {
    callback: Canned,
    complete: Canned,
    recorded: Arc<Mutex<Recorded>>,
}

/// A running stand-in server.
pub struct FunctionsStub {
    pub addr: SocketAddr,
    recorded: Arc<Mutex<Recorded>>,
}

impl FunctionsStub {
    /// Serve `callback` on `/instagram-callback` and `complete` on
    /// `/instagram-complete`, bound to an ephemeral local port.
    pub async fn start(callback: Canned, complete: Canned) -> Self {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let state = StubState {
            callback,
            complete,
            recorded: recorded.clone(),
        };
        let app = Router::new()
            .route("/instagram-callback", get(callback_handler))
            .route("/instagram-complete", post(complete_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, recorded }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn backend(&self) -> HttpConnectBackend {
        HttpConnectBackend::new(
            format!("{}/instagram-callback", self.base_url()),
            format!("{}/instagram-complete", self.base_url()),
        )
    }

    pub fn callback_queries(&self) -> Vec<Value> {
        self.recorded.lock().unwrap().callback_queries.clone()
    }

    pub fn complete_bodies(&self) -> Vec<Value> {
        self.recorded.lock().unwrap().complete_bodies.clone()
    }
}

async fn callback_handler(
    State(state): State<StubState>,
    Query(query): Query<std::collections::BTreeMap<String, String>>,
) -> (StatusCode, String) {
    state
        .recorded
        .lock()
        .unwrap()
        .callback_queries
        .push(json!(query));
    reply(&state.callback)
}

async fn complete_handler(
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    state.recorded.lock().unwrap().complete_bodies.push(body);
    reply(&state.complete)
}

fn reply(canned: &Canned) -> (StatusCode, String) {
    let status = StatusCode::from_u16(canned.status).unwrap();
    (status, canned.body.clone())
}

/// A base URL nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
