// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent-session manager: owns the `sessionId -> session` and
//! `sessionId -> entries` maps and turns incoming runner events into
//! session entries and (for Linear-style platforms) tracker activities.
//!
//! Single-writer table: external readers get clones, never a held lock
//! across an `.await` point.

use crate::tracker::{ActivityContent, CreateActivityRequest};
use ab_core::{AgentSession, EntryKind, Platform, RunnerEvent, SessionEntry, SessionId, SessionStatus};
use parking_lot::Mutex;
use std::collections::HashMap;

/// One in-flight tool invocation awaiting its result, keyed by the
/// vendor's `tool_use_id`. Cleared when the session completes.
#[derive(Debug, Clone)]
struct PendingToolUse {
    entry_index: usize,
    name: String,
    detail: String,
}

struct SessionState {
    session: AgentSession,
    /// tool_use_id -> pending action entry awaiting its result.
    pending_tool_uses: HashMap<String, PendingToolUse>,
    /// Index of the ephemeral status entry (compacting, ...), if any.
    status_entry_index: Option<usize>,
}

/// What the caller (decision/executor layer) should do in response to
/// ingesting one runner event.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// Event produced no externally visible effect (e.g. a dropped
    /// `thought` after `final`, or a `log` line).
    Noop,
    /// A subroutine completed; `result_text` is the content to hand the
    /// procedure engine.
    SubroutineSuccess { result_text: String },
    /// The subroutine failed; `recoverable` mirrors whether a `final` had
    /// already been seen (mirrors the adapter's own at-most-one-final and
    /// EOF rules, but the session manager only sees post-classification
    /// events so it trusts the adapter's framing).
    SubroutineError { message: String },
}

pub struct AgentSessionManager {
    sessions: Mutex<HashMap<SessionId, SessionState>>,
}

impl Default for AgentSessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentSessionManager {
    pub fn new() -> Self {
        Self { sessions: Mutex::new(HashMap::new()) }
    }

    pub fn insert(&self, session: AgentSession) {
        let id = session.id;
        self.sessions.lock().insert(
            id,
            SessionState { session, pending_tool_uses: HashMap::new(), status_entry_index: None },
        );
    }

    /// A clone of the session, for readers that don't need to mutate it.
    pub fn get(&self, id: &SessionId) -> Option<AgentSession> {
        self.sessions.lock().get(id).map(|s| s.session.clone())
    }

    pub fn remove(&self, id: &SessionId) -> Option<AgentSession> {
        self.sessions.lock().remove(id).map(|s| s.session)
    }

    /// All session ids currently tracked, for GC sweeps.
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.lock().keys().copied().collect()
    }

    /// Apply a pure mutation to the session's procedure/status fields
    /// under the lock, returning a clone of the updated session. Used by
    /// the procedure engine layer, which needs `&mut AgentSession`.
    pub fn mutate<R>(&self, id: &SessionId, f: impl FnOnce(&mut AgentSession) -> R) -> Option<R> {
        let mut sessions = self.sessions.lock();
        sessions.get_mut(id).map(|s| f(&mut s.session))
    }

    /// Ingest one runner event: append a session entry (unless it's pure
    /// telemetry) and build the tracker activity request to post, if any.
    /// `suppress_thought_posting` reflects the active subroutine's flag.
    pub fn ingest(
        &self,
        id: &SessionId,
        event: RunnerEvent,
        suppress_thought_posting: bool,
        now_ms: u64,
    ) -> (IngestOutcome, Option<CreateActivityRequest>) {
        let mut sessions = self.sessions.lock();
        let Some(state) = sessions.get_mut(id) else {
            return (IngestOutcome::Noop, None);
        };

        match event {
            RunnerEvent::Session { id: runner_session_id } => {
                state.session.set_runner_session_id(runner_session_id.clone());
                let entry = SessionEntry::new(EntryKind::System, format!("session {runner_session_id}"), now_ms);
                state.session.push_entry(entry);
                (IngestOutcome::Noop, None)
            }
            RunnerEvent::Thought { text } => {
                let entry = SessionEntry::new(EntryKind::Assistant, text.clone(), now_ms);
                state.session.push_entry(entry);
                if suppress_thought_posting {
                    return (IngestOutcome::Noop, None);
                }
                (IngestOutcome::Noop, activity_request(&state.session, ActivityContent::Thought { body: text }, false))
            }
            RunnerEvent::Response { text } => {
                let entry = SessionEntry::new(EntryKind::Assistant, text.clone(), now_ms);
                state.session.push_entry(entry);
                (IngestOutcome::Noop, activity_request(&state.session, ActivityContent::Response { body: text }, false))
            }
            RunnerEvent::Action { name, detail, .. } => {
                let entry = SessionEntry::new(
                    EntryKind::Assistant,
                    format!("{name}: {detail}"),
                    now_ms,
                );
                let entry_index = state.session.entries.len();
                state.session.push_entry(entry);

                if suppress_thought_posting {
                    return (IngestOutcome::Noop, None);
                }

                state.pending_tool_uses.insert(
                    format!("{name}-{entry_index}"),
                    PendingToolUse { entry_index, name: name.clone(), detail: detail.clone() },
                );
                (
                    IngestOutcome::Noop,
                    activity_request(
                        &state.session,
                        ActivityContent::Action { action: name, parameter: detail, result: None },
                        true,
                    ),
                )
            }
            RunnerEvent::Log { text } => {
                tracing::debug!(session_id = %id, text, "runner log line");
                (IngestOutcome::Noop, None)
            }
            RunnerEvent::Final { text } => {
                let entry = SessionEntry::new(EntryKind::Result, text.clone(), now_ms);
                state.session.push_entry(entry);
                let activity =
                    activity_request(&state.session, ActivityContent::Response { body: text.clone() }, false);
                (IngestOutcome::SubroutineSuccess { result_text: text }, activity)
            }
            RunnerEvent::Error { error } => {
                let entry = SessionEntry::new(EntryKind::Result, error.clone(), now_ms);
                state.session.push_entry(entry);
                let activity =
                    activity_request(&state.session, ActivityContent::Error { body: error.clone() }, false);
                (IngestOutcome::SubroutineError { message: error }, activity)
            }
        }
    }

    /// Correlate a tool-result entry by the vendor's `tool_use_id`,
    /// upgrading the matching ephemeral action to a non-ephemeral one with
    /// its rendered result.
    pub fn correlate_tool_result(
        &self,
        id: &SessionId,
        tool_use_id: &str,
        result_text: String,
        now_ms: u64,
    ) -> Option<CreateActivityRequest> {
        let mut sessions = self.sessions.lock();
        let state = sessions.get_mut(id)?;
        let pending = state.pending_tool_uses.remove(tool_use_id)?;

        if let Some(entry) = state.session.entries.get_mut(pending.entry_index) {
            entry.metadata.tool_result_error = Some(false);
        }
        state.session.updated_at_ms = now_ms;

        activity_request(
            &state.session,
            ActivityContent::Action {
                action: pending.name,
                parameter: pending.detail,
                result: Some(result_text),
            },
            false,
        )
    }

    /// Emit (or clear) a status activity, e.g. `compacting`.
    pub fn set_status(
        &self,
        id: &SessionId,
        status_text: Option<String>,
        now_ms: u64,
    ) -> Option<CreateActivityRequest> {
        let mut sessions = self.sessions.lock();
        let state = sessions.get_mut(id)?;

        match status_text {
            Some(text) => {
                let entry = SessionEntry::new(EntryKind::System, text.clone(), now_ms);
                state.status_entry_index = Some(state.session.entries.len());
                state.session.push_entry(entry);
                activity_request(&state.session, ActivityContent::Thought { body: text }, true)
            }
            None => {
                state.status_entry_index = None;
                activity_request(
                    &state.session,
                    ActivityContent::Thought { body: "status cleared".to_string() },
                    false,
                )
            }
        }
    }

    /// Mark a session complete or errored and clear its correlation table.
    pub fn complete(&self, id: &SessionId, status: SessionStatus, now_ms: u64) {
        let mut sessions = self.sessions.lock();
        if let Some(state) = sessions.get_mut(id) {
            state.session.status = status;
            state.session.updated_at_ms = now_ms;
            state.pending_tool_uses.clear();
        }
    }

    pub fn entry_count(&self, id: &SessionId) -> usize {
        self.sessions.lock().get(id).map(|s| s.session.entries.len()).unwrap_or(0)
    }
}

fn activity_request(
    session: &AgentSession,
    content: ActivityContent,
    ephemeral: bool,
) -> Option<CreateActivityRequest> {
    if session.platform != Platform::Linear {
        return None;
    }
    Some(CreateActivityRequest {
        agent_session_id: session.id,
        content,
        ephemeral,
        signal: None,
        signal_metadata: None,
    })
}

#[cfg(test)]
#[path = "session_manager_tests.rs"]
mod tests;
