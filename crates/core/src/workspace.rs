// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace identifier and the materialised workspace handle.
//!
//! A workspace is an opaque local-filesystem working directory for one
//! session, created by a caller-supplied handler (cloning and worktree
//! creation are out of scope for this crate — see `issue.rs`/`session.rs`
//! for how a workspace is attached to a session).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

crate::define_id! {
    /// Unique identifier for a workspace instance.
    pub struct WorkspaceId("wks-");
}

/// Local working directory materialised for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub path: PathBuf,
    pub is_git_worktree: bool,
    pub base_branch: String,
}

impl Workspace {
    pub fn new(path: impl Into<PathBuf>, base_branch: impl Into<String>) -> Self {
        Self { path: path.into(), is_git_worktree: false, base_branch: base_branch.into() }
    }

    pub fn worktree(mut self) -> Self {
        self.is_git_worktree = true;
        self
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
