// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test-only builders, gated behind `test-support` so dependent crates'
//! test code can construct fixtures without duplicating field lists.

use crate::issue::IssueContext;
use crate::procedure::ValidationLoopState;
use crate::session::{AgentSession, Platform, SessionId, SessionStatus, SessionType};
use crate::workspace::Workspace;

crate::builder! {
    pub struct AgentSessionBuilder => AgentSession {
        into {
            external_session_id: String = "ext-1",
            repository_id: String = "alpha",
        }
        set {
            id: SessionId = SessionId::new(),
            platform: Platform = Platform::Linear,
            session_type: SessionType = SessionType::IssueAssignment,
            status: SessionStatus = SessionStatus::Active,
            issue_context: IssueContext = IssueContext::new("tracker-1", "issue-1", "TEAM-1"),
            workspace: Workspace = Workspace::new("/tmp/ws", "main"),
            current_subroutine: usize = 0,
            subroutine_results: Vec<String> = Vec::new(),
            validation_loop: Option<ValidationLoopState> = None,
            entries: Vec<crate::session::SessionEntry> = Vec::new(),
            parent_session_id: Option<SessionId> = None,
            created_at_ms: u64 = 0,
            updated_at_ms: u64 = 0,
        }
        option {
            runner_session_id: String = None,
        }
    }
}
