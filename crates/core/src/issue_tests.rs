// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn team_key_splits_on_first_hyphen() {
    let ctx = IssueContext::new("tracker-1", "issue-1", "TEAM-123");
    assert_eq!(ctx.team_key(), Some("TEAM"));
}

#[test]
fn team_key_none_without_hyphen() {
    let ctx = IssueContext::new("tracker-1", "issue-1", "standalone");
    assert_eq!(ctx.team_key(), None);
}
