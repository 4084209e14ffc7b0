// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Issue context: the minimal pointer back into the tracker.

use serde::{Deserialize, Serialize};

/// Identifies the issue a session was created for.
///
/// `issue_identifier` is the human-facing display key (e.g. `TEAM-123`);
/// `issue_id` is the tracker's opaque internal id, used for API calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueContext {
    pub tracker_id: String,
    pub issue_id: String,
    pub issue_identifier: String,
}

impl IssueContext {
    pub fn new(
        tracker_id: impl Into<String>,
        issue_id: impl Into<String>,
        issue_identifier: impl Into<String>,
    ) -> Self {
        Self {
            tracker_id: tracker_id.into(),
            issue_id: issue_id.into(),
            issue_identifier: issue_identifier.into(),
        }
    }

    /// The team-key prefix of the issue identifier (`TEAM-123` -> `TEAM`).
    pub fn team_key(&self) -> Option<&str> {
        self.issue_identifier.split_once('-').map(|(team, _)| team)
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
