// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crate-boundary error type for the router/procedure/session-manager layer.

use crate::router::RouterError;
use crate::tracker::TrackerError;
use ab_core::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("routing failed: {0}")]
    Routing(#[from] RouterError),

    #[error("issue tracker call failed: {0}")]
    Tracker(#[from] TrackerError),

    #[error("repository configuration error: {0}")]
    Config(#[from] ab_core::repository::RepositoryConfigError),

    #[error("procedure catalog error: {0}")]
    ProcedureCatalog(#[from] crate::procedure_select::ProcedureCatalogError),

    #[error("session {0} not found")]
    SessionNotFound(ab_core::SessionId),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Routing(_) => ErrorKind::NotFound,
            EngineError::Tracker(e) => e.kind(),
            EngineError::Config(_) => ErrorKind::ConfigError,
            EngineError::ProcedureCatalog(_) => ErrorKind::ConfigError,
            EngineError::SessionNotFound(_) => ErrorKind::NotFound,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
