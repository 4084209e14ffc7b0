// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent session: the central entity owned exclusively by the
//! agent-session manager.

use crate::issue::IssueContext;
use crate::procedure::ValidationLoopState;
use crate::workspace::Workspace;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for an agent session.
    pub struct SessionId("ses-");
}

/// Which issue-tracker platform a session is reporting back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Linear,
    GitHub,
}

/// How the session was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionType {
    CommentThread,
    IssueAssignment,
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Active,
    Complete,
    Error,
    AwaitingApproval,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Complete | SessionStatus::Error)
    }
}

crate::simple_display! {
    SessionStatus {
        Active => "active",
        Complete => "complete",
        Error => "error",
        AwaitingApproval => "awaitingApproval",
    }
}

/// The central per-issue session entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSession {
    pub id: SessionId,
    /// Equal to `id` for Linear; tracker-assigned for other platforms.
    pub external_session_id: String,
    pub platform: Platform,
    pub session_type: SessionType,
    pub status: SessionStatus,
    pub issue_context: IssueContext,
    pub workspace: Workspace,
    pub repository_id: String,
    /// Name of the `Procedure` governing this session's subroutine sequence.
    pub procedure_name: String,

    /// Set once the runner emits its first `session` event; used to resume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner_session_id: Option<String>,

    pub current_subroutine: usize,
    #[serde(default)]
    pub subroutine_results: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_loop: Option<ValidationLoopState>,

    #[serde(default)]
    pub entries: Vec<SessionEntry>,

    /// Set at creation, never changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_session_id: Option<SessionId>,

    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl AgentSession {
    /// `runner_session_id` is set exactly once; later calls are no-ops so
    /// replaying the same `Session` runner event twice stays idempotent.
    pub fn set_runner_session_id(&mut self, id: impl Into<String>) {
        if self.runner_session_id.is_none() {
            self.runner_session_id = Some(id.into());
        }
    }

    pub fn push_entry(&mut self, entry: SessionEntry) {
        self.entries.push(entry);
    }

    pub fn is_child(&self) -> bool {
        self.parent_session_id.is_some()
    }
}

/// One append-only row in a session's activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    User,
    Assistant,
    System,
    Result,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub timestamp_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_use_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_result_error: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_tool_use_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    pub kind: EntryKind,
    pub content: String,
    pub metadata: EntryMetadata,
    /// Set once this entry has been echoed to the tracker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_activity_id: Option<String>,
}

impl SessionEntry {
    pub fn new(kind: EntryKind, content: impl Into<String>, timestamp_ms: u64) -> Self {
        Self {
            kind,
            content: content.into(),
            metadata: EntryMetadata { timestamp_ms, ..Default::default() },
            external_activity_id: None,
        }
    }

    pub fn is_posted(&self) -> bool {
        self.external_activity_id.is_some()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
