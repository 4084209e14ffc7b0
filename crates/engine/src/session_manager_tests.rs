// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ab_core::{AgentSession, Platform};

fn linear_session() -> AgentSession {
    AgentSession::builder().platform(Platform::Linear).build()
}

#[test]
fn session_event_sets_runner_session_id_and_appends_system_entry() {
    let manager = AgentSessionManager::new();
    let session = linear_session();
    let id = session.id;
    manager.insert(session);

    let (outcome, activity) =
        manager.ingest(&id, RunnerEvent::Session { id: "rsid-1".to_string() }, false, 1);
    assert_eq!(outcome, IngestOutcome::Noop);
    assert!(activity.is_none(), "session events are never posted as activities");
    assert_eq!(manager.get(&id).unwrap().runner_session_id.as_deref(), Some("rsid-1"));
    assert_eq!(manager.entry_count(&id), 1);
}

#[test]
fn thought_event_posts_a_thought_activity_unless_suppressed() {
    let manager = AgentSessionManager::new();
    let session = linear_session();
    let id = session.id;
    manager.insert(session);

    let (_, activity) = manager.ingest(&id, RunnerEvent::Thought { text: "thinking".to_string() }, false, 1);
    assert!(matches!(activity.unwrap().content, ActivityContent::Thought { .. }));

    let (_, suppressed) = manager.ingest(&id, RunnerEvent::Thought { text: "more".to_string() }, true, 2);
    assert!(suppressed.is_none());
}

#[test]
fn action_then_matching_tool_result_becomes_non_ephemeral() {
    let manager = AgentSessionManager::new();
    let session = linear_session();
    let id = session.id;
    manager.insert(session);

    let (_, action_activity) = manager.ingest(
        &id,
        RunnerEvent::Action {
            name: "bash".to_string(),
            detail: "ls".to_string(),
            item_type: None,
            icon: None,
        },
        false,
        1,
    );
    let action = action_activity.unwrap();
    assert!(action.ephemeral);

    let result_activity =
        manager.correlate_tool_result(&id, "bash-1", "a\nb".to_string(), 2).unwrap();
    assert!(!result_activity.ephemeral);
    match result_activity.content {
        ActivityContent::Action { result, .. } => assert_eq!(result.as_deref(), Some("a\nb")),
        other => panic!("expected Action content, got {other:?}"),
    }
}

#[test]
fn final_event_produces_subroutine_success_and_response_activity() {
    let manager = AgentSessionManager::new();
    let session = linear_session();
    let id = session.id;
    manager.insert(session);

    let (outcome, activity) = manager.ingest(&id, RunnerEvent::Final { text: "done".to_string() }, false, 1);
    assert_eq!(outcome, IngestOutcome::SubroutineSuccess { result_text: "done".to_string() });
    assert!(matches!(activity.unwrap().content, ActivityContent::Response { .. }));
}

#[test]
fn error_event_produces_subroutine_error_and_error_activity() {
    let manager = AgentSessionManager::new();
    let session = linear_session();
    let id = session.id;
    manager.insert(session);

    let (outcome, activity) = manager.ingest(&id, RunnerEvent::Error { error: "boom".to_string() }, false, 1);
    assert_eq!(outcome, IngestOutcome::SubroutineError { message: "boom".to_string() });
    assert!(matches!(activity.unwrap().content, ActivityContent::Error { .. }));
}

#[test]
fn log_event_produces_no_activity() {
    let manager = AgentSessionManager::new();
    let session = linear_session();
    let id = session.id;
    manager.insert(session);

    let (outcome, activity) = manager.ingest(&id, RunnerEvent::Log { text: "debug".to_string() }, false, 1);
    assert_eq!(outcome, IngestOutcome::Noop);
    assert!(activity.is_none());
    assert_eq!(manager.entry_count(&id), 0, "log lines are never appended as entries");
}

#[test]
fn unknown_session_id_ingest_is_a_safe_noop() {
    let manager = AgentSessionManager::new();
    let (outcome, activity) =
        manager.ingest(&SessionId::new(), RunnerEvent::Log { text: "x".to_string() }, false, 1);
    assert_eq!(outcome, IngestOutcome::Noop);
    assert!(activity.is_none());
}

#[test]
fn completion_clears_pending_tool_use_correlations() {
    let manager = AgentSessionManager::new();
    let session = linear_session();
    let id = session.id;
    manager.insert(session);

    manager.ingest(
        &id,
        RunnerEvent::Action { name: "bash".to_string(), detail: "ls".to_string(), item_type: None, icon: None },
        false,
        1,
    );
    manager.complete(&id, ab_core::SessionStatus::Complete, 2);

    assert!(manager.correlate_tool_result(&id, "bash-1", "late".to_string(), 3).is_none());
    assert_eq!(manager.get(&id).unwrap().status, ab_core::SessionStatus::Complete);
}

#[test]
fn github_platform_sessions_never_post_activities() {
    let manager = AgentSessionManager::new();
    let session = AgentSession::builder().platform(Platform::GitHub).build();
    let id = session.id;
    manager.insert(session);

    let (_, activity) = manager.ingest(&id, RunnerEvent::Response { text: "hi".to_string() }, false, 1);
    assert!(activity.is_none());
}
