// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner adapter error type.

use ab_core::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum RunnerAdapterError {
    #[error("failed to spawn runner process: {0}")]
    SpawnFailure(#[source] std::io::Error),

    #[error("runner exited without delivering a final response")]
    Abandoned,

    #[error("runner reported an error: {0}")]
    ReportedError(String),

    #[error("runner session {0} not found")]
    NotFound(String),

    #[error("failed to wait for runner exit: {0}")]
    Wait(#[source] std::io::Error),
}

impl RunnerAdapterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunnerAdapterError::SpawnFailure(_) => ErrorKind::RunnerSpawnFailure,
            RunnerAdapterError::Abandoned => ErrorKind::RunnerAbandoned,
            RunnerAdapterError::ReportedError(_) => ErrorKind::RunnerReportedError,
            RunnerAdapterError::NotFound(_) => ErrorKind::NotFound,
            RunnerAdapterError::Wait(_) => ErrorKind::RunnerAbandoned,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
