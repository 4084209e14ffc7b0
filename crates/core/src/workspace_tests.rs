// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn worktree_flag_defaults_false() {
    let ws = Workspace::new("/tmp/work", "main");
    assert!(!ws.is_git_worktree);
    assert_eq!(ws.base_branch, "main");
}

#[test]
fn worktree_builder_sets_flag() {
    let ws = Workspace::new("/tmp/work", "main").worktree();
    assert!(ws.is_git_worktree);
}

#[test]
fn workspace_id_has_expected_prefix() {
    let id = WorkspaceId::new();
    assert!(id.as_str().starts_with("wks-"));
}
