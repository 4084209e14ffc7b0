// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `CliTracker`: the in-memory issue-tracker stand-in used when the daemon
//! runs without a real Linear/GitHub client wired in.
//!
//! Real platform SDK wrappers are out of scope for this system (§1); this
//! is the minimal local double the binary needs to be runnable end to end.
//! It seeds issues from a JSON fixture file and logs every posted activity
//! through `tracing` instead of calling out to a real API.

use std::collections::HashMap;
use std::path::Path;

use ab_engine::tracker::{
    Comment, CommentPage, CreateActivityRequest, CreatedActivity, EventTransportConfig, FileUpload,
    IssuePatch, IssueSummary, IssueTrackerService, Label, NewAgentSessionOnComment,
    NewAgentSessionOnIssue, NewComment, RemoteAgentSession, Team, TrackerError, TrackerUser,
    WorkflowState,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliTrackerFixture {
    #[serde(default)]
    pub issues: Vec<IssueSummary>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl CliTrackerFixture {
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }
}

pub struct CliTracker {
    issues: Mutex<HashMap<String, IssueSummary>>,
    labels: Mutex<Vec<Label>>,
    next_activity_id: Mutex<u64>,
}

impl CliTracker {
    pub fn new(fixture: CliTrackerFixture) -> Self {
        let issues = fixture.issues.into_iter().map(|i| (i.id.clone(), i)).collect();
        Self {
            issues: Mutex::new(issues),
            labels: Mutex::new(fixture.labels),
            next_activity_id: Mutex::new(0),
        }
    }

    pub fn seed_issue(&self, issue: IssueSummary) {
        self.issues.lock().insert(issue.id.clone(), issue);
    }
}

#[async_trait]
impl IssueTrackerService for CliTracker {
    async fn fetch_issue(&self, id_or_identifier: &str) -> Result<IssueSummary, TrackerError> {
        self.issues
            .lock()
            .values()
            .find(|i| i.id == id_or_identifier || i.identifier == id_or_identifier)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(id_or_identifier.to_string()))
    }

    async fn fetch_issue_children(
        &self,
        _id: &str,
        _include_completed: bool,
        _include_archived: bool,
        _limit: u32,
    ) -> Result<Vec<IssueSummary>, TrackerError> {
        Ok(Vec::new())
    }

    async fn update_issue(&self, id: &str, patch: IssuePatch) -> Result<(), TrackerError> {
        tracing::info!(issue = id, ?patch, "cli tracker: update_issue (no-op)");
        Ok(())
    }

    async fn fetch_comments(
        &self,
        _issue_id: &str,
        _page: CommentPage,
    ) -> Result<Vec<Comment>, TrackerError> {
        Ok(Vec::new())
    }

    async fn fetch_comment(&self, id: &str) -> Result<Comment, TrackerError> {
        Err(TrackerError::NotFound(id.to_string()))
    }

    async fn create_comment(&self, issue_id: &str, comment: NewComment) -> Result<Comment, TrackerError> {
        tracing::info!(issue = issue_id, body = %comment.body, "cli tracker: create_comment");
        Ok(Comment {
            id: format!("comment-{issue_id}"),
            issue_id: issue_id.to_string(),
            body: comment.body,
            parent_id: comment.parent_id,
        })
    }

    async fn fetch_teams(&self) -> Result<Vec<Team>, TrackerError> {
        Ok(Vec::new())
    }

    async fn fetch_team(&self, id: &str) -> Result<Team, TrackerError> {
        Err(TrackerError::NotFound(id.to_string()))
    }

    async fn fetch_labels(&self) -> Result<Vec<Label>, TrackerError> {
        Ok(self.labels.lock().clone())
    }

    async fn fetch_label(&self, id: &str) -> Result<Label, TrackerError> {
        self.labels.lock().iter().find(|l| l.id == id).cloned().ok_or_else(|| TrackerError::NotFound(id.to_string()))
    }

    async fn fetch_workflow_states(&self, _team_id: &str) -> Result<Vec<WorkflowState>, TrackerError> {
        Ok(Vec::new())
    }

    async fn fetch_workflow_state(&self, id: &str) -> Result<WorkflowState, TrackerError> {
        Err(TrackerError::NotFound(id.to_string()))
    }

    async fn fetch_user(&self, id: &str) -> Result<TrackerUser, TrackerError> {
        Err(TrackerError::NotFound(id.to_string()))
    }

    async fn fetch_current_user(&self) -> Result<TrackerUser, TrackerError> {
        Ok(TrackerUser { id: "cli-user".to_string(), name: "CLI User".to_string() })
    }

    async fn create_agent_session_on_issue(
        &self,
        req: NewAgentSessionOnIssue,
    ) -> Result<RemoteAgentSession, TrackerError> {
        Ok(RemoteAgentSession { id: format!("agent-session-{}", req.issue_id), issue_id: req.issue_id })
    }

    async fn create_agent_session_on_comment(
        &self,
        req: NewAgentSessionOnComment,
    ) -> Result<RemoteAgentSession, TrackerError> {
        Ok(RemoteAgentSession { id: format!("agent-session-{}", req.comment_id), issue_id: String::new() })
    }

    async fn fetch_agent_session(&self, id: &str) -> Result<RemoteAgentSession, TrackerError> {
        Err(TrackerError::NotFound(id.to_string()))
    }

    async fn create_agent_activity(
        &self,
        req: CreateActivityRequest,
    ) -> Result<CreatedActivity, TrackerError> {
        let id = {
            let mut next = self.next_activity_id.lock();
            *next += 1;
            *next
        };
        tracing::info!(
            session = %req.agent_session_id,
            ephemeral = req.ephemeral,
            content = ?req.content,
            "activity"
        );
        Ok(CreatedActivity { external_activity_id: format!("act-{id}") })
    }

    async fn request_file_upload(&self, filename: &str) -> Result<FileUpload, TrackerError> {
        Ok(FileUpload {
            upload_url: format!("https://uploads.invalid/{filename}"),
            asset_url: format!("https://assets.invalid/{filename}"),
        })
    }

    fn get_platform_type(&self) -> &'static str {
        "cli"
    }

    fn get_platform_metadata(&self) -> serde_json::Value {
        serde_json::json!({ "platform": "cli" })
    }

    async fn create_event_transport(&self, _config: EventTransportConfig) -> Result<(), TrackerError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "cli_tracker_tests.rs"]
mod tests;
