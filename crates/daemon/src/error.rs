// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Edge-worker error type: the daemon's own boundary, wrapping every
//! lower layer's error into one thing `tracing` and the top-level `main`
//! can render.

use ab_core::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum EdgeWorkerError {
    #[error(transparent)]
    Engine(#[from] ab_engine::EngineError),

    #[error(transparent)]
    Runner(#[from] ab_adapters::RunnerAdapterError),

    #[error(transparent)]
    Storage(#[from] ab_storage::StorageError),

    #[error(transparent)]
    Workspace(#[from] crate::workspace::WorkspaceError),

    #[error("no repository is routable for this issue")]
    Unroutable,

    #[error("procedure {0:?} is not configured")]
    UnknownProcedure(String),
}

impl EdgeWorkerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EdgeWorkerError::Engine(e) => e.kind(),
            EdgeWorkerError::Runner(_) => ErrorKind::RunnerSpawnFailure,
            EdgeWorkerError::Storage(_) => ErrorKind::ConfigError,
            EdgeWorkerError::Workspace(_) => ErrorKind::ConfigError,
            EdgeWorkerError::Unroutable => ErrorKind::NotFound,
            EdgeWorkerError::UnknownProcedure(_) => ErrorKind::ConfigError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
