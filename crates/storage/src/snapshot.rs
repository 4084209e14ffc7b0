// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort session snapshot: serialize `{sessions}` (session entries
//! travel inside each `AgentSession`) to a plain JSON file and restore it
//! on startup. No durability guarantee, no WAL, no compression — runner
//! subprocesses are never part of the payload, so a restore after a crash
//! always needs the reconciliation pass in [`reconcile_restored`].

use crate::error::StorageError;
use ab_core::{AgentSession, EntryKind, SessionEntry, SessionId, SessionStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Keyed by the session id's string form; a `HashMap<SessionId, _>`
    /// would serialize to a JSON object with non-string keys, which
    /// `serde_json` cannot represent.
    pub sessions: HashMap<String, AgentSession>,
    pub saved_at_ms: u64,
}

impl Snapshot {
    pub fn from_sessions(sessions: impl IntoIterator<Item = AgentSession>, saved_at_ms: u64) -> Self {
        Self {
            sessions: sessions.into_iter().map(|s| (s.id.to_string(), s)).collect(),
            saved_at_ms,
        }
    }

    pub fn into_sessions(self) -> HashMap<SessionId, AgentSession> {
        self.sessions.into_values().map(|s| (s.id, s)).collect()
    }
}

/// Serialize `snapshot` to `path`, writing to a sibling temp file first and
/// renaming over the target so a reader never observes a partial write.
pub async fn persist(path: &Path, snapshot: &Snapshot) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(snapshot)?;
    let tmp_path = path.with_extension("tmp");

    tokio::fs::write(&tmp_path, &body)
        .await
        .map_err(|source| StorageError::Write { path: tmp_path.display().to_string(), source })?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|source| StorageError::Write { path: path.display().to_string(), source })?;

    tracing::debug!(path = %path.display(), sessions = snapshot.sessions.len(), "snapshot persisted");
    Ok(())
}

/// Restore a snapshot from `path`. A missing file is not an error — it
/// means this is the first run — and yields an empty snapshot.
pub async fn restore(path: &Path) -> Result<Snapshot, StorageError> {
    let body = match tokio::fs::read(path).await {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Snapshot::default()),
        Err(source) => return Err(StorageError::Read { path: path.display().to_string(), source }),
    };
    let snapshot: Snapshot = serde_json::from_slice(&body)?;
    tracing::debug!(path = %path.display(), sessions = snapshot.sessions.len(), "snapshot restored");
    Ok(snapshot)
}

/// Mark every restored session that was not already terminal as `error`,
/// since its runner (if any) died with the process and cannot be resumed
/// from this layer alone. Terminal sessions are left untouched.
pub fn reconcile_restored(sessions: &mut HashMap<SessionId, AgentSession>, now_ms: u64) {
    for session in sessions.values_mut() {
        if session.status.is_terminal() {
            continue;
        }
        session.status = SessionStatus::Error;
        session.updated_at_ms = now_ms;
        session.push_entry(SessionEntry::new(
            EntryKind::System,
            "session interrupted by restart and could not be resumed".to_string(),
            now_ms,
        ));
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
