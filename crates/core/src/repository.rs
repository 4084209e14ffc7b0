// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository configuration: the router's static routing table.
//!
//! Loaded once at startup from a TOML document (`[[repository]]` table
//! array), deserialised with `serde(deny_unknown_fields)` so a typo in a
//! field name is a load-time `ConfigError`, not a silently-ignored key.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single configured repository and its routing predicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    pub base_branch: String,
    pub workspace_root: PathBuf,
    /// The tracker workspace (organisation) this repository belongs to.
    pub tracker_workspace_id: String,

    #[serde(default)]
    pub routing_labels: Vec<String>,
    #[serde(default)]
    pub project_keys: Vec<String>,
    #[serde(default)]
    pub team_keys: Vec<String>,

    /// Name of the runner kind this repository uses (e.g. "coding-cli").
    pub runner_kind: String,
    #[serde(default)]
    pub model_override: Option<String>,
    #[serde(default)]
    pub mcp_config_paths: Vec<PathBuf>,
}

impl RepositoryConfig {
    /// A catch-all repository has no positive routing predicate at all.
    pub fn is_catch_all(&self) -> bool {
        self.routing_labels.is_empty() && self.project_keys.is_empty() && self.team_keys.is_empty()
    }
}

/// The full set of configured repositories for one workspace, plus the
/// config-level invariant that at most one of them may be the catch-all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositorySet {
    #[serde(rename = "repository", default)]
    pub repositories: Vec<RepositoryConfig>,
}

impl RepositorySet {
    /// Parse and validate a TOML repository-configuration document.
    pub fn from_toml(text: &str) -> Result<Self, RepositoryConfigError> {
        let set: RepositorySet =
            toml::from_str(text).map_err(|e| RepositoryConfigError::Parse(e.to_string()))?;
        set.validate()?;
        Ok(set)
    }

    fn validate(&self) -> Result<(), RepositoryConfigError> {
        let catch_alls: Vec<&str> = self
            .repositories
            .iter()
            .filter(|r| r.is_catch_all())
            .map(|r| r.id.as_str())
            .collect();
        if catch_alls.len() > 1 {
            return Err(RepositoryConfigError::MultipleCatchAll(
                catch_alls.iter().map(|s| s.to_string()).collect(),
            ));
        }
        Ok(())
    }

    pub fn catch_all(&self) -> Option<&RepositoryConfig> {
        self.repositories.iter().find(|r| r.is_catch_all())
    }

    pub fn get(&self, id: &str) -> Option<&RepositoryConfig> {
        self.repositories.iter().find(|r| r.id == id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryConfigError {
    #[error("failed to parse repository config: {0}")]
    Parse(String),
    #[error("more than one catch-all repository configured: {0:?}")]
    MultipleCatchAll(Vec<String>),
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
