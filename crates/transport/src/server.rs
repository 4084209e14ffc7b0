// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Axum-backed HTTP surface for the event transport.
//!
//! `POST /webhook` verifies the request (direct HMAC or proxy bearer) over
//! the raw body before any JSON parsing happens, then forwards the parsed
//! payload onto an internal channel and returns 200 without waiting on
//! downstream processing. `GET /cli/health` answers from process-start
//! metadata held in shared state; it never makes a downstream call.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::TransportError;
use crate::verify;

/// How this deployment expects incoming webhooks to be authenticated.
#[derive(Debug, Clone)]
pub enum VerificationMode {
    /// HMAC-SHA256 over the raw body, hex digest in `linear-signature`.
    Direct { secret: String, header: &'static str },
    /// `Authorization: Bearer <token>`, injected by a fronting proxy.
    Proxy { token: String },
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub mode: VerificationMode,
    pub platform: String,
}

impl TransportConfig {
    pub fn direct(secret: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            mode: VerificationMode::Direct { secret: secret.into(), header: "linear-signature" },
            platform: platform.into(),
        }
    }

    pub fn proxy(token: impl Into<String>, platform: impl Into<String>) -> Self {
        Self { mode: VerificationMode::Proxy { token: token.into() }, platform: platform.into() }
    }
}

/// One verified, parsed webhook payload handed to the edge worker.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInfo {
    pub status: String,
    pub platform: String,
    pub timestamp: u64,
}

struct AppState {
    config: TransportConfig,
    sender: mpsc::UnboundedSender<WebhookEvent>,
    started_at_ms: u64,
}

/// A running transport: the channel the edge worker drains events from,
/// plus the bound local address (useful for tests that bind to port 0).
pub struct TransportHandle {
    pub events: mpsc::UnboundedReceiver<WebhookEvent>,
    pub local_addr: std::net::SocketAddr,
    join: tokio::task::JoinHandle<()>,
}

impl TransportHandle {
    pub fn abort(&self) {
        self.join.abort();
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/cli/health", get(handle_health))
        .with_state(state)
}

/// Bind and serve the transport on `addr`, returning immediately with a
/// handle carrying the event receiver. Pass port `0` to bind an ephemeral
/// port for tests.
pub async fn serve(
    config: TransportConfig,
    addr: std::net::SocketAddr,
) -> Result<TransportHandle, std::io::Error> {
    let (sender, events) = mpsc::unbounded_channel();
    let started_at_ms =
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64;
    let state = Arc::new(AppState { config, sender, started_at_ms });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let router = build_router(state);

    let join = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "webhook transport server exited");
        }
    });

    Ok(TransportHandle { events, local_addr, join })
}

async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp =
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64;
    axum::Json(HealthInfo {
        status: "ok".to_string(),
        platform: state.config.platform.clone(),
        timestamp: timestamp.max(state.started_at_ms),
    })
}

async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, TransportError> {
    verify_request(&state.config.mode, &headers, &body)?;

    let payload: serde_json::Value =
        serde_json::from_slice(&body).map_err(TransportError::MalformedRequest)?;

    tracing::info!(bytes = body.len(), "webhook accepted");

    if state.sender.send(WebhookEvent { payload }).is_err() {
        // Receiver dropped (edge worker shut down); the request was still
        // authentic and well-formed, so this is a server-side fact, not
        // the caller's problem to retry indefinitely over.
        return Err(TransportError::Internal("event channel closed".to_string()));
    }

    Ok(StatusCode::OK)
}

fn verify_request(mode: &VerificationMode, headers: &HeaderMap, body: &[u8]) -> Result<(), TransportError> {
    match mode {
        VerificationMode::Direct { secret, header } => {
            let provided = headers
                .get(*header)
                .and_then(|v| v.to_str().ok())
                .ok_or(TransportError::MissingHeader(header))?;
            if !verify::verify_hmac_signature(secret, body, provided) {
                return Err(TransportError::AuthenticationFailure);
            }
            Ok(())
        }
        VerificationMode::Proxy { token } => {
            let provided = headers
                .get(axum::http::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .ok_or(TransportError::MissingHeader("authorization"))?;
            if !verify::verify_bearer_token(token, provided) {
                return Err(TransportError::AuthenticationFailure);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
