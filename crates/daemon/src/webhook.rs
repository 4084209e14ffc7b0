// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Webhook payload parsing: turns the arbitrary JSON a platform posts into
//! the handful of fields the edge worker actually needs. Cosmetic and
//! platform-specific fields are ignored; an unrecognised shape yields
//! `None` rather than an error, since C2 already accepted the request by
//! the time this runs (§2: a single `event` with the parsed payload).

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundKind {
    /// The agent was assigned the issue directly.
    IssueAssignment,
    /// A comment mentioned or replied to the agent; `body` is the comment
    /// text, used to seed the first subroutine's prompt or to resolve a
    /// pending approval/repository-selection elicitation.
    CommentThread { body: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub issue_id: String,
    pub team_key: Option<String>,
    pub kind: InboundKind,
}

#[derive(Debug, Deserialize)]
struct RawWebhook {
    #[serde(rename = "type")]
    kind: String,
    action: Option<String>,
    #[serde(rename = "issueId")]
    issue_id: Option<String>,
    #[serde(rename = "teamKey")]
    team_key: Option<String>,
    comment: Option<RawComment>,
}

#[derive(Debug, Deserialize)]
struct RawComment {
    body: Option<String>,
}

/// Parse a raw webhook JSON payload into an [`InboundEvent`], or `None` if
/// it isn't a shape the edge worker routes (health-check pings, activity
/// echoes the daemon itself generated, unrelated notification types, ...).
pub fn parse_webhook(payload: &serde_json::Value) -> Option<InboundEvent> {
    let raw: RawWebhook = serde_json::from_value(payload.clone()).ok()?;
    if raw.kind != "AppUserNotification" {
        return None;
    }
    let issue_id = raw.issue_id?;
    let action = raw.action.unwrap_or_default();

    let kind = if action.contains("comment") || action.contains("Comment") {
        InboundKind::CommentThread { body: raw.comment.and_then(|c| c.body).unwrap_or_default() }
    } else if action == "issueAssignedToYou" || action.contains("Assigned") {
        InboundKind::IssueAssignment
    } else {
        return None;
    };

    Some(InboundEvent { issue_id, team_key: raw.team_key, kind })
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
