// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory `IssueTrackerService` double for tests.
//!
//! Records every posted activity so tests can assert on the exact
//! sequence, and lets callers inject canned `fetch_issue`/`fetch_labels`
//! responses. Performs no I/O and implements no vendor protocol.

use crate::tracker::{
    ActivityContent, Comment, CommentPage, CreateActivityRequest, CreatedActivity,
    EventTransportConfig, FileUpload, IssuePatch, IssueSummary, IssueTrackerService, Label,
    NewAgentSessionOnComment, NewAgentSessionOnIssue, NewComment, RemoteAgentSession, Team,
    TrackerError, TrackerUser, WorkflowState,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
pub struct FakeTracker {
    issues: Mutex<HashMap<String, IssueSummary>>,
    labels: Mutex<Vec<Label>>,
    activities: Mutex<Vec<CreateActivityRequest>>,
    next_activity_id: Mutex<u64>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a fixture so `fetch_issue` returns it by id or identifier.
    pub fn seed_issue(&self, issue: IssueSummary) {
        self.issues.lock().insert(issue.id.clone(), issue);
    }

    pub fn seed_labels(&self, labels: Vec<Label>) {
        *self.labels.lock() = labels;
    }

    /// Every activity posted so far, in posting order.
    pub fn posted_activities(&self) -> Vec<CreateActivityRequest> {
        self.activities.lock().clone()
    }

    pub fn activity_count(&self) -> usize {
        self.activities.lock().len()
    }
}

#[async_trait]
impl IssueTrackerService for FakeTracker {
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

    async fn update_issue(&self, _id: &str, _patch: IssuePatch) -> Result<(), TrackerError> {
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
        self.labels
            .lock()
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))
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
        Ok(TrackerUser { id: "fake-user".to_string(), name: "Fake User".to_string() })
    }

    async fn create_agent_session_on_issue(
        &self,
        req: NewAgentSessionOnIssue,
    ) -> Result<RemoteAgentSession, TrackerError> {
        Ok(RemoteAgentSession { id: format!("session-{}", req.issue_id), issue_id: req.issue_id })
    }

    async fn create_agent_session_on_comment(
        &self,
        req: NewAgentSessionOnComment,
    ) -> Result<RemoteAgentSession, TrackerError> {
        Ok(RemoteAgentSession { id: format!("session-{}", req.comment_id), issue_id: String::new() })
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
        self.activities.lock().push(req);
        Ok(CreatedActivity { external_activity_id: format!("act-{id}") })
    }

    async fn request_file_upload(&self, filename: &str) -> Result<FileUpload, TrackerError> {
        Ok(FileUpload {
            upload_url: format!("https://uploads.invalid/{filename}"),
            asset_url: format!("https://assets.invalid/{filename}"),
        })
    }

    fn get_platform_type(&self) -> &'static str {
        "fake"
    }

    fn get_platform_metadata(&self) -> serde_json::Value {
        serde_json::json!({ "platform": "fake" })
    }

    async fn create_event_transport(&self, _config: EventTransportConfig) -> Result<(), TrackerError> {
        Ok(())
    }
}

/// Convenience constructor matching the `content` shape out of an
/// `ActivityContent` variant, useful for assertions in tests.
pub fn activity_body(content: &ActivityContent) -> &str {
    match content {
        ActivityContent::Thought { body }
        | ActivityContent::Response { body }
        | ActivityContent::Elicitation { body, .. }
        | ActivityContent::Error { body }
        | ActivityContent::Prompt { body } => body,
        ActivityContent::Action { parameter, .. } => parameter,
    }
}

#[cfg(test)]
#[path = "fake_tracker_tests.rs"]
mod tests;
