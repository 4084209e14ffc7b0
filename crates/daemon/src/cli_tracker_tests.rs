use super::*;

fn sample_issue() -> IssueSummary {
    IssueSummary {
        id: "issue-1".to_string(),
        identifier: "TEAM-1".to_string(),
        title: "Fix the bug".to_string(),
        description: "It's broken".to_string(),
        labels: vec!["bug".to_string()],
        project: None,
        team_key: Some("TEAM".to_string()),
    }
}

#[tokio::test]
async fn fetches_seeded_issue_by_id_or_identifier() {
    let tracker = CliTracker::new(CliTrackerFixture::default());
    tracker.seed_issue(sample_issue());

    let by_id = tracker.fetch_issue("issue-1").await.unwrap();
    let by_identifier = tracker.fetch_issue("TEAM-1").await.unwrap();

    assert_eq!(by_id.identifier, "TEAM-1");
    assert_eq!(by_identifier.id, "issue-1");
}

#[tokio::test]
async fn unknown_issue_is_not_found() {
    let tracker = CliTracker::new(CliTrackerFixture::default());
    let err = tracker.fetch_issue("nope").await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(_)));
}

#[tokio::test]
async fn posting_an_activity_returns_a_fresh_id_each_time() {
    let tracker = CliTracker::new(CliTrackerFixture::default());
    let session_id = ab_core::SessionId::new();

    let first = tracker
        .create_agent_activity(CreateActivityRequest {
            agent_session_id: session_id,
            content: ab_engine::tracker::ActivityContent::Thought { body: "thinking".to_string() },
            ephemeral: true,
            signal: None,
            signal_metadata: None,
        })
        .await
        .unwrap();
    let second = tracker
        .create_agent_activity(CreateActivityRequest {
            agent_session_id: session_id,
            content: ab_engine::tracker::ActivityContent::Response { body: "done".to_string() },
            ephemeral: false,
            signal: None,
            signal_metadata: None,
        })
        .await
        .unwrap();

    assert_ne!(first.external_activity_id, second.external_activity_id);
}

#[test]
fn fixture_load_missing_file_yields_empty_fixture_error() {
    let err = CliTrackerFixture::load(Path::new("/nonexistent/fixture.json"));
    assert!(err.is_err());
}
