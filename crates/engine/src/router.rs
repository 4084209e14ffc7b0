// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository router: picks one configured repository for an issue event
//! by strict priority, with a cache so follow-up events on the same issue
//! reuse the prior decision.

use crate::tracker::IssueSummary;
use ab_core::{RepositoryConfig, RepositorySet, SessionId};
use parking_lot::Mutex;
use std::collections::HashMap;

/// What the router decided for one issue event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// A single repository was selected.
    Resolved(String),
    /// More than one repository matched no positive predicate; the caller
    /// must post an elicitation offering these repos by id and name.
    Ambiguous(Vec<(String, String)>),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("no repositories are configured")]
    NoRepositoriesConfigured,
}

/// A select-type elicitation awaiting the user's repository pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSelection {
    pub session_id: SessionId,
    pub issue_id: String,
    pub options: Vec<(String, String)>,
}

pub struct RepositoryRouter {
    repositories: RepositorySet,
    issue_repo_cache: Mutex<HashMap<String, String>>,
    pending: Mutex<HashMap<SessionId, PendingSelection>>,
}

impl RepositoryRouter {
    pub fn new(repositories: RepositorySet) -> Self {
        Self {
            repositories,
            issue_repo_cache: Mutex::new(HashMap::new()),
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn repository(&self, id: &str) -> Option<&RepositoryConfig> {
        self.repositories.get(id)
    }

    /// Resolve a repository for `issue`, consulting the cache first.
    /// `active_session_repo` is the repo id of an already-active session
    /// for this issue, if any (fetched by the caller from the session
    /// manager — the router itself does not own the session table).
    pub fn route(
        &self,
        issue: &IssueSummary,
        team_key: Option<&str>,
        active_session_repo: Option<&str>,
    ) -> Result<RouteDecision, RouterError> {
        if let Some(repo_id) = active_session_repo {
            self.issue_repo_cache.lock().insert(issue.id.clone(), repo_id.to_string());
            return Ok(RouteDecision::Resolved(repo_id.to_string()));
        }

        if let Some(cached) = self.issue_repo_cache.lock().get(&issue.id).cloned() {
            return Ok(RouteDecision::Resolved(cached));
        }

        let decision = self.resolve(issue, team_key)?;
        if let RouteDecision::Resolved(repo_id) = &decision {
            self.issue_repo_cache.lock().insert(issue.id.clone(), repo_id.clone());
        }
        Ok(decision)
    }

    fn resolve(&self, issue: &IssueSummary, team_key: Option<&str>) -> Result<RouteDecision, RouterError> {
        let repos = &self.repositories.repositories;
        if repos.is_empty() {
            return Err(RouterError::NoRepositoriesConfigured);
        }

        if let Some(repo) = repos.iter().find(|r| r.routing_labels.iter().any(|l| issue.labels.contains(l)))
        {
            return Ok(RouteDecision::Resolved(repo.id.clone()));
        }

        if let Some(project) = &issue.project {
            if let Some(repo) = repos.iter().find(|r| r.project_keys.iter().any(|p| p == project)) {
                return Ok(RouteDecision::Resolved(repo.id.clone()));
            }
        }

        let identifier_prefix = issue.identifier.split_once('-').map(|(prefix, _)| prefix);
        let team = team_key.or(issue.team_key.as_deref()).or(identifier_prefix);
        if let Some(team) = team {
            if let Some(repo) = repos.iter().find(|r| r.team_keys.iter().any(|t| t == team)) {
                return Ok(RouteDecision::Resolved(repo.id.clone()));
            }
        }

        if let Some(repo) = self.repositories.catch_all() {
            return Ok(RouteDecision::Resolved(repo.id.clone()));
        }

        if repos.len() == 1 {
            return Ok(RouteDecision::Resolved(repos[0].id.clone()));
        }

        Ok(RouteDecision::Ambiguous(repos.iter().map(|r| (r.id.clone(), r.name.clone())).collect()))
    }

    /// Record a pending elicitation for `session_id`.
    pub fn record_pending_selection(&self, selection: PendingSelection) {
        self.pending.lock().insert(selection.session_id.clone(), selection);
    }

    /// Resolve a pending selection by the user's free-text response,
    /// falling back to the first option if nothing matches.
    pub fn resolve_pending_selection(
        &self,
        session_id: &SessionId,
        response: &str,
    ) -> Option<String> {
        let selection = self.pending.lock().remove(session_id)?;
        let repo_id = selection
            .options
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(response.trim()))
            .or_else(|| selection.options.first())
            .map(|(id, _)| id.clone());
        if let Some(repo_id) = &repo_id {
            self.issue_repo_cache.lock().insert(selection.issue_id.clone(), repo_id.clone());
        }
        repo_id
    }

    pub fn has_pending_selection(&self, session_id: &SessionId) -> bool {
        self.pending.lock().contains_key(session_id)
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
