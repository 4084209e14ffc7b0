// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn log_summary_mentions_session_id() {
    let session_id = SessionId::new();
    let event = OrchestratorEvent::SessionRouted {
        session_id: session_id.clone(),
        repository_id: "alpha".into(),
    };
    assert!(event.log_summary().contains(session_id.as_str()));
    assert!(event.log_summary().contains("alpha"));
}

#[test]
fn serde_tag_matches_vendor_style_naming() {
    let event = OrchestratorEvent::ValidationLoopRerun { session_id: SessionId::new() };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "procedure:validationLoopRerun");
}
