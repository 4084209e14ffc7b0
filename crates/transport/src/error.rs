// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transport-boundary errors and their HTTP rendering.

use ab_core::ErrorKind;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("missing or invalid webhook credentials")]
    AuthenticationFailure,

    #[error("request body is not valid JSON: {0}")]
    MalformedRequest(#[source] serde_json::Error),

    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("internal transport error: {0}")]
    Internal(String),
}

impl TransportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::AuthenticationFailure | TransportError::MissingHeader(_) => {
                ErrorKind::AuthenticationFailure
            }
            TransportError::MalformedRequest(_) => ErrorKind::MalformedRequest,
            TransportError::MethodNotAllowed => ErrorKind::MalformedRequest,
            TransportError::Internal(_) => ErrorKind::TrackerFailure,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            TransportError::AuthenticationFailure | TransportError::MissingHeader(_) => {
                StatusCode::UNAUTHORIZED
            }
            TransportError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            TransportError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            TransportError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TransportError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(error = %self, status = %status, "webhook request rejected");
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
