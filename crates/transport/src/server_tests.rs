// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use axum::http::Request;
use tower::ServiceExt;

fn state_with(mode: VerificationMode) -> (Arc<AppState>, mpsc::UnboundedReceiver<WebhookEvent>) {
    let (sender, events) = mpsc::unbounded_channel();
    let config = TransportConfig { mode, platform: "linear".to_string() };
    (Arc::new(AppState { config, sender, started_at_ms: 0 }), events)
}

fn direct_mode(secret: &str) -> VerificationMode {
    VerificationMode::Direct { secret: secret.to_string(), header: "linear-signature" }
}

#[tokio::test]
async fn valid_hmac_signature_returns_200_and_forwards_event() {
    let (state, mut events) = state_with(direct_mode("s3cr3t"));
    let app = build_router(state);

    let body = br#"{"type":"AppUserNotification"}"#.to_vec();
    let digest = verify::hmac_hex_digest("s3cr3t", &body);

    let response = app
        .oneshot(
            Request::post("/webhook")
                .header("linear-signature", digest)
                .body(axum::body::Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let event = events.try_recv().unwrap();
    assert_eq!(event.payload["type"], "AppUserNotification");
}

#[tokio::test]
async fn wrong_signature_returns_401() {
    let (state, _events) = state_with(direct_mode("s3cr3t"));
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::post("/webhook")
                .header("linear-signature", "deadbeef")
                .body(axum::body::Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_signature_header_returns_401() {
    let (state, _events) = state_with(direct_mode("s3cr3t"));
    let app = build_router(state);

    let response = app
        .oneshot(Request::post("/webhook").body(axum::body::Body::from("{}")).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_json_returns_400_after_successful_verification() {
    let (state, _events) = state_with(direct_mode("s3cr3t"));
    let app = build_router(state);

    let body = b"not json".to_vec();
    let digest = verify::hmac_hex_digest("s3cr3t", &body);

    let response = app
        .oneshot(
            Request::post("/webhook")
                .header("linear-signature", digest)
                .body(axum::body::Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_post_method_returns_405() {
    let (state, _events) = state_with(direct_mode("s3cr3t"));
    let app = build_router(state);

    let response =
        app.oneshot(Request::get("/webhook").body(axum::body::Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn bearer_mode_requires_exact_token() {
    let (state, mut events) = state_with(VerificationMode::Proxy { token: "tok-abc".to_string() });
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::post("/webhook")
                .header("authorization", "Bearer tok-abc")
                .body(axum::body::Body::from(r#"{"ok":true}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(events.try_recv().is_ok());
}

#[tokio::test]
async fn bearer_mode_rejects_wrong_token() {
    let (state, _events) = state_with(VerificationMode::Proxy { token: "tok-abc".to_string() });
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::post("/webhook")
                .header("authorization", "Bearer wrong")
                .body(axum::body::Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_endpoint_reports_platform() {
    let (state, _events) = state_with(direct_mode("s3cr3t"));
    let app = build_router(state);

    let response =
        app.oneshot(Request::get("/cli/health").body(axum::body::Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
