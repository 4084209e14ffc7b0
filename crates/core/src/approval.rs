// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Approval gate: the procedure engine's human-in-the-loop checkpoint.

use crate::session::SessionId;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a pending approval.
    pub struct ApprovalId("apr-");
}

/// An approval awaiting (or resolved by) human input.
///
/// `url` is the external approval-page link posted to the tracker as an
/// elicitation signal; rendering that page is out of scope here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingApproval {
    pub id: ApprovalId,
    pub session_id: SessionId,
    pub url: String,
    pub created_at_ms: u64,
}

impl PendingApproval {
    pub fn new(session_id: SessionId, url: impl Into<String>, created_at_ms: u64) -> Self {
        Self { id: ApprovalId::new(), session_id, url: url.into(), created_at_ms }
    }

    /// Whether this approval has outlived the 30-minute wait window.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        const TIMEOUT_MS: u64 = 30 * 60 * 1000;
        now_ms.saturating_sub(self.created_at_ms) >= TIMEOUT_MS
    }
}

/// How a pending approval was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalOutcome {
    Approved { feedback: Option<String> },
    Rejected { feedback: Option<String> },
    TimedOut,
}

impl ApprovalOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, ApprovalOutcome::Approved { .. })
    }
}

#[cfg(test)]
#[path = "approval_tests.rs"]
mod tests;
