// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::tracker::ActivityContent;
use ab_core::SessionId;

fn sample_issue(id: &str) -> IssueSummary {
    IssueSummary {
        id: id.to_string(),
        identifier: "TEAM-1".to_string(),
        title: "Fix the thing".to_string(),
        description: String::new(),
        labels: vec!["bug".to_string()],
        project: Some("Core".to_string()),
        team_key: Some("TEAM".to_string()),
    }
}

#[tokio::test]
async fn seeded_issue_is_fetchable_by_id_or_identifier() {
    let tracker = FakeTracker::new();
    tracker.seed_issue(sample_issue("issue-1"));

    assert_eq!(tracker.fetch_issue("issue-1").await.unwrap().identifier, "TEAM-1");
    assert_eq!(tracker.fetch_issue("TEAM-1").await.unwrap().id, "issue-1");
}

#[tokio::test]
async fn unseeded_issue_is_not_found() {
    let tracker = FakeTracker::new();
    assert!(tracker.fetch_issue("missing").await.is_err());
}

#[tokio::test]
async fn posted_activities_are_recorded_in_order() {
    let tracker = FakeTracker::new();
    let session_id = SessionId::new();

    tracker
        .create_agent_activity(CreateActivityRequest {
            agent_session_id: session_id.clone(),
            content: ActivityContent::Thought { body: "thinking".to_string() },
            ephemeral: false,
            signal: None,
            signal_metadata: None,
        })
        .await
        .unwrap();
    tracker
        .create_agent_activity(CreateActivityRequest {
            agent_session_id: session_id,
            content: ActivityContent::Response { body: "done".to_string() },
            ephemeral: false,
            signal: None,
            signal_metadata: None,
        })
        .await
        .unwrap();

    let posted = tracker.posted_activities();
    assert_eq!(posted.len(), 2);
    assert_eq!(activity_body(&posted[0].content), "thinking");
    assert_eq!(activity_body(&posted[1].content), "done");
}
