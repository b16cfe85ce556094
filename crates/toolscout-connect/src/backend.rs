//! Client for the two serverless functions behind the connect flow.
//!
//! `ConnectBackend` is the seam: the flow only sees a status code and a
//! JSON body. `HttpConnectBackend` talks to the real functions over
//! `reqwest`; tests plug in fakes.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use toolscout_core::ConnectConfig;

use crate::error::{ConnectError, Result};

/// Boxed future returned by backend calls.
pub type BackendFuture<'a> = Pin<Box<dyn Future<Output = Result<BackendResponse>> + Send + 'a>>;

/// What came back from a function call.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body; `Null` for an empty body.
    pub body: Value,
}

impl BackendResponse {
    /// Build a response.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body's `error` field, when it is a string.
    pub fn error_message(&self) -> Option<String> {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// The two outbound calls of the connect flow.
///
/// Implementations return `Err` only for transport or parse failures.
/// A non-2xx answer is an `Ok` response.
pub trait ConnectBackend: Send + Sync + 'static {
    /// `GET {callback}?code=..&state=..`
    fn callback<'a>(&'a self, code: &'a str, state: &'a str) -> BackendFuture<'a>;

    /// `POST {complete}` with `{"state", "page_id"}`.
    fn complete<'a>(&'a self, state: &'a str, page_id: &'a str) -> BackendFuture<'a>;
}

impl<T: ConnectBackend + ?Sized> ConnectBackend for Arc<T> {
    fn callback<'a>(&'a self, code: &'a str, state: &'a str) -> BackendFuture<'a> {
        (**self).callback(code, state)
    }

    fn complete<'a>(&'a self, state: &'a str, page_id: &'a str) -> BackendFuture<'a> {
        (**self).complete(state, page_id)
    }
}

#[derive(Serialize)]
struct CompleteRequest<'a> {
    state: &'a str,
    page_id: &'a str,
}

/// `reqwest` client for the callback and complete functions.
#[derive(Debug, Clone)]
pub struct HttpConnectBackend {
    client: reqwest::Client,
    callback_url: String,
    complete_url: String,
}

impl HttpConnectBackend {
    /// Create a backend for the given endpoint URLs.
    pub fn new(callback_url: impl Into<String>, complete_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), callback_url, complete_url)
    }

    /// Create a backend that reuses an existing client.
    pub fn with_client(
        client: reqwest::Client,
        callback_url: impl Into<String>,
        complete_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            callback_url: callback_url.into(),
            complete_url: complete_url.into(),
        }
    }

    /// Create a backend from the `[connect]` config section.
    pub fn from_config(config: &ConnectConfig) -> Self {
        Self::new(config.callback_endpoint(), config.complete_endpoint())
    }

    /// Callback endpoint URL.
    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Complete endpoint URL.
    pub fn complete_url(&self) -> &str {
        &self.complete_url
    }

    async fn get_callback(&self, code: &str, state: &str) -> Result<BackendResponse> {
        let url = reqwest::Url::parse_with_params(
            &self.callback_url,
            &[("code", code), ("state", state)],
        )
        .map_err(|e| ConnectError::network(format!("invalid callback URL: {e}")))?;

        tracing::debug!(url = %self.callback_url, "Calling connect callback function");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ConnectError::network(e.to_string()))?;
        read_response(response).await
    }

    async fn post_complete(&self, state: &str, page_id: &str) -> Result<BackendResponse> {
        tracing::debug!(url = %self.complete_url, page_id, "Calling connect complete function");
        let response = self
            .client
            .post(&self.complete_url)
            .json(&CompleteRequest { state, page_id })
            .send()
            .await
            .map_err(|e| ConnectError::network(e.to_string()))?;
        read_response(response).await
    }
}

impl ConnectBackend for HttpConnectBackend {
    fn callback<'a>(&'a self, code: &'a str, state: &'a str) -> BackendFuture<'a> {
        Box::pin(self.get_callback(code, state))
    }

    fn complete<'a>(&'a self, state: &'a str, page_id: &'a str) -> BackendFuture<'a> {
        Box::pin(self.post_complete(state, page_id))
    }
}

async fn read_response(response: reqwest::Response) -> Result<BackendResponse> {
    let status = response.status().as_u16();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ConnectError::network(e.to_string()))?;
    Ok(BackendResponse::new(status, parse_body(&bytes)?))
}

/// Empty bodies become `Null`; anything else must be JSON.
pub(crate) fn parse_body(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| ConnectError::network(e.to_string()))
}
