// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace materialisation.
//!
//! `createWorkspace` is treated as a caller-supplied handler — repository
//! clone/worktree management is an external collaborator's job.
//! [`WorkspaceFactory`] is that seam; [`LocalDirWorkspaceFactory`] is the
//! simplest possible implementation (a plain subdirectory, no git
//! worktree) so the daemon runs standalone without a real clone manager
//! wired in.

use std::path::PathBuf;

use ab_core::{RepositoryConfig, Workspace};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("failed to create workspace directory {path}: {source}")]
    Create { path: String, source: std::io::Error },
}

#[async_trait]
pub trait WorkspaceFactory: Send + Sync {
    async fn create(&self, repo: &RepositoryConfig, issue_identifier: &str) -> Result<Workspace, WorkspaceError>;
}

/// Creates `{workspace_root}/{issue_identifier}` as a plain directory.
pub struct LocalDirWorkspaceFactory;

#[async_trait]
impl WorkspaceFactory for LocalDirWorkspaceFactory {
    async fn create(&self, repo: &RepositoryConfig, issue_identifier: &str) -> Result<Workspace, WorkspaceError> {
        let path: PathBuf = repo.workspace_root.join(sanitize(issue_identifier));
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| WorkspaceError::Create { path: path.display().to_string(), source })?;
        Ok(Workspace::new(path, repo.base_branch.clone()))
    }
}

fn sanitize(identifier: &str) -> String {
    identifier.chars().map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' }).collect()
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
