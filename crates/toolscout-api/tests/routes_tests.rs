//! Route tests driven through `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{ScriptedBackend, app, body_json, body_text, get, post_form, post_json, send};
use serde_json::json;
use toolscout_connect::BackendResponse;

// ----------------------------------------------------------------------------
// Content pages
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_index_lists_pages() {
    let resp = send(app(Arc::new(ScriptedBackend::ok())), get("/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Appwrite"));
    assert!(html.contains("Rytr vs Jasper"));
}

#[tokio::test]
async fn test_review_page() {
    let resp = send(app(Arc::new(ScriptedBackend::ok())), get("/tools/salesforce")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Salesforce"));
    assert!(html.contains("Does Salesforce offer a free trial?"));
    assert!(!html.contains("most editions come with a 30-day trial"));
}

#[tokio::test]
async fn test_review_page_with_open_faqs() {
    let resp = send(
        app(Arc::new(ScriptedBackend::ok())),
        get("/tools/salesforce?open=0,1"),
    )
    .await;
    let html = body_text(resp).await;
    assert!(html.contains("most editions come with a 30-day trial"));
    assert!(html.contains("Starter suits small teams"));
}

#[tokio::test]
async fn test_review_page_with_repeated_open_param() {
    let resp = send(
        app(Arc::new(ScriptedBackend::ok())),
        get("/tools/salesforce?open=0&open=1"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("most editions come with a 30-day trial"));
    assert!(html.contains("Starter suits small teams"));
}

#[tokio::test]
async fn test_unknown_review_is_404() {
    let resp = send(app(Arc::new(ScriptedBackend::ok())), get("/tools/nope")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_review_slug_is_not_a_comparison() {
    let resp = send(app(Arc::new(ScriptedBackend::ok())), get("/compare/rytr")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comparison_page() {
    let resp = send(
        app(Arc::new(ScriptedBackend::ok())),
        get("/compare/rytr-vs-jasper"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Output quality"));
    assert!(html.contains("8.0"));
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let resp = send(app(Arc::new(ScriptedBackend::ok())), get("/pricing")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ----------------------------------------------------------------------------
// Connect flow, HTML
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_callback_success_page() {
    let backend = Arc::new(ScriptedBackend::ok());
    let resp = send(
        app(backend.clone()),
        get("/connect/instagram/callback?code=abc&state=xyz"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("connected"));
    assert!(html.contains("Back to dashboard"));
    assert_eq!(backend.calls(), vec!["GET abc xyz"]);
}

#[tokio::test]
async fn test_callback_provider_error_page() {
    let backend = Arc::new(ScriptedBackend::ok());
    let resp = send(
        app(backend.clone()),
        get("/connect/instagram/callback?error=access_denied&error_description=Permissions+error"),
    )
    .await;
    let html = body_text(resp).await;
    assert!(html.contains("access_denied: Permissions error"));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_callback_selection_form() {
    let backend = Arc::new(ScriptedBackend::new(
        BackendResponse::new(
            409,
            json!({
                "requires_selection": true,
                "pages": [{"id": "111", "name": "Coffee Shop", "instagram_username": "coffee"}],
                "state": "signed"
            }),
        ),
        BackendResponse::new(200, json!({})),
    ));
    let resp = send(
        app(backend),
        get("/connect/instagram/callback?code=abc&state=xyz"),
    )
    .await;
    let html = body_text(resp).await;
    assert!(html.contains("<form method=\"post\""));
    assert!(html.contains("Coffee Shop (@coffee)"));
    assert!(html.contains("value=\"signed\""));
}

#[tokio::test]
async fn test_callback_without_pages_offers_no_empty_form() {
    let bodies = [
        json!({"requires_selection": true, "state": "signed"}),
        json!({"requires_selection": true, "pages": null, "state": "signed"}),
        json!({"requires_selection": true, "pages": [], "state": "signed"}),
    ];
    for body in bodies {
        let backend = Arc::new(ScriptedBackend::new(
            BackendResponse::new(409, body),
            BackendResponse::new(200, json!({})),
        ));
        let resp = send(
            app(backend.clone()),
            get("/connect/instagram/callback?code=abc&state=xyz"),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains("No Facebook page with a linked Instagram business account"));
        assert!(html.contains("Back to dashboard"));
        assert!(!html.contains("<form"));
        assert!(!html.contains("<button"));
        assert_eq!(backend.calls(), vec!["GET abc xyz"]);
    }
}

#[tokio::test]
async fn test_select_form_posts_choice() {
    let backend = Arc::new(ScriptedBackend::ok());
    let resp = send(
        app(backend.clone()),
        post_form("/connect/instagram/select", "state=signed&page_id=111"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("connected"));
    assert_eq!(backend.calls(), vec!["POST signed 111"]);
}

#[tokio::test]
async fn test_select_form_failure_is_terminal() {
    let backend = Arc::new(ScriptedBackend::new(
        BackendResponse::new(200, json!({})),
        BackendResponse::new(500, json!({})),
    ));
    let resp = send(
        app(backend),
        post_form("/connect/instagram/select", "state=signed&page_id=111"),
    )
    .await;
    let html = body_text(resp).await;
    assert!(html.contains("Failed to complete connection"));
    assert!(!html.contains("<form"));
}

#[tokio::test]
async fn test_select_form_missing_field_is_400() {
    let backend = Arc::new(ScriptedBackend::ok());
    let resp = send(
        app(backend.clone()),
        post_form("/connect/instagram/select", "state=signed"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(backend.calls().is_empty());
}

// ----------------------------------------------------------------------------
// Connect flow, JSON
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_callback_json_missing_parameters() {
    let backend = Arc::new(ScriptedBackend::ok());
    let resp = send(
        app(backend.clone()),
        get("/api/connect/instagram/callback?code=abc"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"status": "error", "message": "missing code or state", "kind": "missing_parameters"})
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_callback_json_server_error() {
    let backend = Arc::new(ScriptedBackend::new(
        BackendResponse::new(400, json!({"error": "Invalid state"})),
        BackendResponse::new(200, json!({})),
    ));
    let resp = send(
        app(backend),
        get("/api/connect/instagram/callback?code=abc&state=xyz"),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Invalid state");
}

#[tokio::test]
async fn test_select_json_success() {
    let backend = Arc::new(ScriptedBackend::ok());
    let resp = send(
        app(backend.clone()),
        post_json(
            "/api/connect/instagram/select",
            &json!({"state": "signed", "page_id": "222"}),
        ),
    )
    .await;
    assert_eq!(body_json(resp).await, json!({"status": "success"}));
    assert_eq!(backend.calls(), vec!["POST signed 222"]);
}

#[tokio::test]
async fn test_select_json_empty_page_is_400() {
    let resp = send(
        app(Arc::new(ScriptedBackend::ok())),
        post_json(
            "/api/connect/instagram/select",
            &json!({"state": "signed", "page_id": ""}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"]["category"], "bad_request");
}

// ----------------------------------------------------------------------------
// Health
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let resp = send(app(Arc::new(ScriptedBackend::ok())), get("/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["name"], "toolscout");
    assert_eq!(body["pages"], 7);
    assert!(body["started_at"].is_string());
}
