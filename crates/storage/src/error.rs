// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crate-boundary error type for snapshot persistence.

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read snapshot at {path}: {source}")]
    Read { path: String, #[source] source: std::io::Error },

    #[error("failed to write snapshot at {path}: {source}")]
    Write { path: String, #[source] source: std::io::Error },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    pub fn kind(&self) -> ab_core::ErrorKind {
        ab_core::ErrorKind::ConfigError
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
