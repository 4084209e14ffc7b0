// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Issue-tracker abstraction.
//!
//! The router, procedure engine, and session manager never talk to a
//! platform SDK directly; they go through `IssueTrackerService`. A
//! concrete Linear/GitHub implementation is out of scope for this crate —
//! see `FakeTracker` (behind `test-support`) for the in-memory double used
//! by this crate's own tests and by downstream integration tests.

use ab_core::SessionId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub description: String,
    pub labels: Vec<String>,
    pub project: Option<String>,
    pub team_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IssuePatch {
    pub state: Option<String>,
    pub fields: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub issue_id: String,
    pub body: String,
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPage {
    pub first: u32,
    pub after: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub body: String,
    pub parent_id: Option<String>,
    pub attachment_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerUser {
    pub id: String,
    pub name: String,
}

/// Content posted to an agent session's activity feed.
///
/// Variant names match the tracker contract's `content.type` union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityContent {
    Thought { body: String },
    Response { body: String },
    Action { action: String, parameter: String, result: Option<String> },
    Elicitation { body: String, options: Vec<String> },
    Error { body: String },
    Prompt { body: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateActivityRequest {
    pub agent_session_id: SessionId,
    pub content: ActivityContent,
    #[serde(default)]
    pub ephemeral: bool,
    #[serde(default)]
    pub signal: Option<String>,
    #[serde(default)]
    pub signal_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedActivity {
    pub external_activity_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAgentSessionOnIssue {
    pub issue_id: String,
    pub external_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAgentSessionOnComment {
    pub comment_id: String,
    pub external_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAgentSession {
    pub id: String,
    pub issue_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    pub upload_url: String,
    pub asset_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventTransportConfig {
    pub platform: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("issue tracker request failed: {0}")]
    RequestFailed(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl TrackerError {
    pub fn kind(&self) -> ab_core::ErrorKind {
        match self {
            TrackerError::RequestFailed(_) => ab_core::ErrorKind::TrackerFailure,
            TrackerError::NotFound(_) => ab_core::ErrorKind::NotFound,
        }
    }
}

/// What the procedure/router/session-manager layers require of a tracker
/// platform. A concrete Linear/GitHub client implements this; it performs
/// no caching, retries, or rendering of its own.
#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn fetch_issue(&self, id_or_identifier: &str) -> Result<IssueSummary, TrackerError>;
    async fn fetch_issue_children(
        &self,
        id: &str,
        include_completed: bool,
        include_archived: bool,
        limit: u32,
    ) -> Result<Vec<IssueSummary>, TrackerError>;
    async fn update_issue(&self, id: &str, patch: IssuePatch) -> Result<(), TrackerError>;

    async fn fetch_comments(&self, issue_id: &str, page: CommentPage) -> Result<Vec<Comment>, TrackerError>;
    async fn fetch_comment(&self, id: &str) -> Result<Comment, TrackerError>;
    async fn create_comment(&self, issue_id: &str, comment: NewComment) -> Result<Comment, TrackerError>;

    async fn fetch_teams(&self) -> Result<Vec<Team>, TrackerError>;
    async fn fetch_team(&self, id: &str) -> Result<Team, TrackerError>;
    async fn fetch_labels(&self) -> Result<Vec<Label>, TrackerError>;
    async fn fetch_label(&self, id: &str) -> Result<Label, TrackerError>;
    async fn fetch_workflow_states(&self, team_id: &str) -> Result<Vec<WorkflowState>, TrackerError>;
    async fn fetch_workflow_state(&self, id: &str) -> Result<WorkflowState, TrackerError>;
    async fn fetch_user(&self, id: &str) -> Result<TrackerUser, TrackerError>;
    async fn fetch_current_user(&self) -> Result<TrackerUser, TrackerError>;

    async fn create_agent_session_on_issue(
        &self,
        req: NewAgentSessionOnIssue,
    ) -> Result<RemoteAgentSession, TrackerError>;
    async fn create_agent_session_on_comment(
        &self,
        req: NewAgentSessionOnComment,
    ) -> Result<RemoteAgentSession, TrackerError>;
    async fn fetch_agent_session(&self, id: &str) -> Result<RemoteAgentSession, TrackerError>;

    async fn create_agent_activity(
        &self,
        req: CreateActivityRequest,
    ) -> Result<CreatedActivity, TrackerError>;

    async fn request_file_upload(&self, filename: &str) -> Result<FileUpload, TrackerError>;
    fn get_platform_type(&self) -> &'static str;
    fn get_platform_metadata(&self) -> serde_json::Value;
    async fn create_event_transport(&self, config: EventTransportConfig) -> Result<(), TrackerError>;
}
