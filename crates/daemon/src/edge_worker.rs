// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Edge worker (C6): the conductor wiring the transport, router, session
//! manager, procedure engine, and runner adapter together.
//!
//! One webhook in triggers, at most, one `drive` task per session; that
//! task owns the session's subroutine loop end to end (spawn/resume the
//! runner, ingest its events, ask the procedure engine what happens next)
//! so that within a session everything is strictly serialised, while
//! different sessions run fully concurrently as independent tokio tasks.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ab_adapters::{RunnerAdapter, RunnerEventCallback, RunnerSpawnConfig, SandboxMode};
use ab_core::{
    ApprovalOutcome, Clock, Effect, IssueContext, Platform, RepositoryConfig, RepositorySet,
    RunnerEvent, SessionEntry, SessionId, SessionStatus, SessionType, SystemClock, Workspace,
};
use ab_engine::procedure_engine;
use ab_engine::tracker::{
    ActivityContent, CreateActivityRequest, IssueSummary, NewAgentSessionOnIssue,
};
use ab_engine::{
    AgentSessionManager, EngineError, IngestOutcome, IssueTrackerService, PendingSelection,
    ProcedureCatalog, ProcedureOutcome, RepositoryRouter, RouteDecision,
};
use ab_storage::Snapshot;
use parking_lot::Mutex;
use serde::Deserialize;
use tokio::sync::{mpsc, oneshot};

use crate::config::DaemonConfig;
use crate::error::EdgeWorkerError;
use crate::runner_factory::RunnerFactory;
use crate::webhook::{self, InboundKind};
use crate::workspace::WorkspaceFactory;

/// How long an `AwaitingApproval` session waits for a human before the
/// procedure is hard-failed (§3 Pending approval, §5 Cancellation & timeouts).
const APPROVAL_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Terminal sessions older than this are swept by the periodic GC (§3 Lifecycle).
const GC_HORIZON_MS: u64 = 24 * 60 * 60 * 1000;

enum TurnOutcome {
    Success { result_text: String, runner_session_id: Option<String> },
    Error { message: String },
}

/// The running orchestrator: one per process. Generic over the tracker
/// implementation so tests can swap in `ab_engine::FakeTracker` while
/// production wires a real platform client (out of scope here, §1).
pub struct EdgeWorker<T: IssueTrackerService + 'static> {
    tracker: Arc<T>,
    router: Arc<RepositoryRouter>,
    sessions: Arc<AgentSessionManager>,
    procedures: ProcedureCatalog,
    workspaces: Arc<dyn WorkspaceFactory>,
    runners: Arc<dyn RunnerFactory>,
    clock: SystemClock,
    config: DaemonConfig,
    approvals: Mutex<HashMap<SessionId, oneshot::Sender<ApprovalOutcome>>>,
    /// First session created for an issue id; routes continuation events
    /// (follow-up comments, elicitation responses) back to it.
    issue_sessions: Mutex<HashMap<String, SessionId>>,
}

impl<T: IssueTrackerService + 'static> EdgeWorker<T> {
    pub fn new(
        tracker: Arc<T>,
        repositories: RepositorySet,
        procedures: ProcedureCatalog,
        workspaces: Arc<dyn WorkspaceFactory>,
        runners: Arc<dyn RunnerFactory>,
        config: DaemonConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            tracker,
            router: Arc::new(RepositoryRouter::new(repositories)),
            sessions: Arc::new(AgentSessionManager::new()),
            procedures,
            workspaces,
            runners,
            clock: SystemClock,
            config,
            approvals: Mutex::new(HashMap::new()),
            issue_sessions: Mutex::new(HashMap::new()),
        })
    }

    /// Restore a prior snapshot (best-effort; a missing file just means
    /// this is the first run). Any session that was mid-flight is marked
    /// `error` since its runner died with the previous process.
    pub async fn restore(&self) {
        match ab_storage::restore(&self.config.snapshot_path).await {
            Ok(snapshot) => {
                let mut sessions = snapshot.into_sessions();
                ab_storage::reconcile_restored(&mut sessions, self.clock.epoch_ms());
                let mut issue_index = self.issue_sessions.lock();
                for (id, session) in sessions {
                    issue_index.entry(session.issue_context.issue_id.clone()).or_insert(id);
                    self.sessions.insert(session);
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to restore snapshot; starting clean"),
        }
    }

    /// Spawn the periodic snapshot and GC loops. Never returns.
    pub fn spawn_background_tasks(self: Arc<Self>) {
        let worker = self.clone();
        tokio::spawn(async move { worker.snapshot_loop().await });
        tokio::spawn(async move { self.gc_loop().await });
    }

    /// Accept one verified webhook payload from the transport. Never
    /// awaits downstream work itself (§5: "webhook handlers never wait on
    /// runner work") — it spawns a task and returns immediately.
    pub fn ingest_webhook(self: Arc<Self>, payload: serde_json::Value) {
        let Some(event) = webhook::parse_webhook(&payload) else {
            tracing::debug!("webhook payload not routable; ignoring");
            return;
        };
        tokio::spawn(async move {
            if let Err(e) = self.handle_inbound(event).await {
                tracing::error!(error = %e, kind = ?e.kind(), "failed to handle inbound event");
            }
        });
    }

    /// Resolve a pending approval from the external approval page (out of
    /// scope collaborator; this is the hook it calls). Returns `false` if
    /// nothing was pending (already resolved, timed out, or unknown id).
    pub fn resolve_approval(&self, session_id: &SessionId, outcome: ApprovalOutcome) -> bool {
        match self.approvals.lock().remove(session_id) {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }

    fn active_repo_for_issue(&self, issue_id: &str) -> Option<String> {
        let session_id = *self.issue_sessions.lock().get(issue_id)?;
        let session = self.sessions.get(&session_id)?;
        (!session.status.is_terminal()).then_some(session.repository_id)
    }

    async fn handle_inbound(self: Arc<Self>, event: webhook::InboundEvent) -> Result<(), EdgeWorkerError> {
        let issue =
            self.tracker.fetch_issue(&event.issue_id).await.map_err(EngineError::from)?;

        if let Some(session_id) = self.issue_sessions.lock().get(&issue.id).copied() {
            if self.router.has_pending_selection(&session_id) {
                let body = match &event.kind {
                    InboundKind::CommentThread { body } => body.clone(),
                    InboundKind::IssueAssignment => String::new(),
                };
                if let Some(repo_id) = self.router.resolve_pending_selection(&session_id, &body) {
                    self.sessions.mutate(&session_id, |s| s.repository_id = repo_id.clone());
                    self.begin_procedure(session_id).await?;
                }
                return Ok(());
            }
            if let Some(session) = self.sessions.get(&session_id) {
                if !session.status.is_terminal() {
                    tracing::debug!(issue = %issue.id, session = %session_id, "continuation event on active session");
                    return Ok(());
                }
            }
        }

        let active_repo = self.active_repo_for_issue(&issue.id);
        let route = self
            .router
            .route(&issue, event.team_key.as_deref(), active_repo.as_deref())
            .map_err(EngineError::from)?;

        match route {
            RouteDecision::Resolved(repo_id) => {
                let session_id = self.create_session(&issue, &repo_id, &event.kind, None).await?;
                self.issue_sessions.lock().insert(issue.id.clone(), session_id);
                self.begin_procedure(session_id).await?;
            }
            RouteDecision::Ambiguous(options) => {
                let session_id = self.create_session(&issue, "", &event.kind, None).await?;
                self.issue_sessions.lock().insert(issue.id.clone(), session_id);
                self.router.record_pending_selection(PendingSelection {
                    session_id,
                    issue_id: issue.id.clone(),
                    options: options.clone(),
                });
                let names: Vec<String> = options.into_iter().map(|(_, name)| name).collect();
                let body = format!(
                    "More than one repository could handle {}; reply with the repository name to continue.",
                    issue.identifier
                );
                self.post_elicitation(&session_id, body, names).await;
            }
        }
        Ok(())
    }

    async fn create_session(
        &self,
        issue: &IssueSummary,
        repo_id: &str,
        kind: &InboundKind,
        parent_session_id: Option<SessionId>,
    ) -> Result<SessionId, EdgeWorkerError> {
        let platform = if self.config.platform.eq_ignore_ascii_case("github") {
            Platform::GitHub
        } else {
            Platform::Linear
        };
        let session_type = match kind {
            InboundKind::IssueAssignment => SessionType::IssueAssignment,
            InboundKind::CommentThread { .. } => SessionType::CommentThread,
        };
        let now = self.clock.epoch_ms();

        // Linear has already allocated an agent-session id by the time the
        // core starts tracking it (§4.5); the orchestrator-internal id
        // stays a locally generated `SessionId` regardless (its fixed
        // 23-byte buffer can't hold an arbitrary tracker id), and the
        // tracker-assigned id is recorded separately in
        // `external_session_id` — see DESIGN.md's Open Question note.
        let external_session_id = if platform == Platform::Linear {
            self.tracker
                .create_agent_session_on_issue(NewAgentSessionOnIssue {
                    issue_id: issue.id.clone(),
                    external_link: None,
                })
                .await
                .map_err(EngineError::from)?
                .id
        } else {
            issue.id.clone()
        };

        let (workspace, tracker_workspace_id) = if repo_id.is_empty() {
            (Workspace::new(PathBuf::new(), String::new()), String::new())
        } else {
            let repo = self.repository(repo_id)?;
            let workspace = self.workspaces.create(&repo, &issue.identifier).await?;
            (workspace, repo.tracker_workspace_id.clone())
        };

        let procedure_name = self
            .procedures
            .select(&issue.labels, &issue.title, &issue.description)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        let session = ab_core::AgentSession {
            id: SessionId::new(),
            external_session_id,
            platform,
            session_type,
            status: SessionStatus::Active,
            issue_context: IssueContext::new(tracker_workspace_id, issue.id.clone(), issue.identifier.clone()),
            workspace,
            repository_id: repo_id.to_string(),
            procedure_name,
            runner_session_id: None,
            current_subroutine: 0,
            subroutine_results: Vec::new(),
            validation_loop: None,
            entries: Vec::new(),
            parent_session_id,
            created_at_ms: now,
            updated_at_ms: now,
        };
        let id = session.id;
        self.sessions.insert(session);
        Ok(id)
    }

    fn repository(&self, repo_id: &str) -> Result<RepositoryConfig, EdgeWorkerError> {
        self.router.repository(repo_id).cloned().ok_or(EdgeWorkerError::Unroutable)
    }

    async fn begin_procedure(self: Arc<Self>, session_id: SessionId) -> Result<(), EdgeWorkerError> {
        let session =
            self.sessions.get(&session_id).ok_or(EngineError::SessionNotFound(session_id))?;
        let procedure = self
            .procedures
            .get(&session.procedure_name)
            .cloned()
            .ok_or_else(|| EdgeWorkerError::UnknownProcedure(session.procedure_name.clone()))?;
        let subroutine = procedure
            .get(0)
            .ok_or_else(|| EdgeWorkerError::UnknownProcedure(session.procedure_name.clone()))?;

        let vars = HashMap::from([
            ("issue_identifier".to_string(), session.issue_context.issue_identifier.clone()),
            ("last_result".to_string(), String::new()),
        ]);
        let prompt = procedure_engine::render_prompt(&subroutine.prompt_template, &vars);

        tokio::spawn(async move { self.drive(session_id, prompt, None).await });
        Ok(())
    }

    /// The per-session subroutine loop: run one turn, ask the procedure
    /// engine what happens next, and either loop for another turn or end
    /// the session. Everything here touches one session at a time — the
    /// serialisation the spec requires (§5).
    async fn drive(self: Arc<Self>, session_id: SessionId, mut prompt: String, mut resume_id: Option<String>) {
        loop {
            let Some(session) = self.sessions.get(&session_id) else { return };
            let Some(procedure) = self.procedures.get(&session.procedure_name).cloned() else {
                self.fail_session(session_id, "procedure no longer configured".to_string()).await;
                return;
            };
            let Some(repo) = self.router.repository(&session.repository_id).cloned() else {
                self.fail_session(session_id, "repository no longer configured".to_string()).await;
                return;
            };
            let Some(subroutine) = procedure.get(session.current_subroutine).cloned() else {
                self.fail_session(session_id, "procedure index out of range".to_string()).await;
                return;
            };
            let running_fixer =
                session.validation_loop.as_ref().map(|v| v.in_fixer_mode).unwrap_or(false);

            let outcome = self.run_turn(&session_id, &repo, &subroutine, prompt.clone(), resume_id.clone()).await;
            let now = self.clock.epoch_ms();

            let decision = self.sessions.mutate(&session_id, |s| match &outcome {
                TurnOutcome::Success { result_text, runner_session_id } => {
                    if running_fixer {
                        procedure_engine::handle_validation_fixer_complete(&procedure, s)
                    } else if subroutine.uses_validation_loop {
                        let (pass, reason) = parse_validation_result(result_text);
                        procedure_engine::handle_validation_result(
                            &procedure,
                            s,
                            pass,
                            reason,
                            runner_session_id.clone(),
                            now,
                        )
                    } else {
                        procedure_engine::handle_success(
                            &procedure,
                            s,
                            runner_session_id.clone(),
                            result_text.clone(),
                            now,
                        )
                    }
                }
                TurnOutcome::Error { message } => {
                    procedure_engine::handle_error(&procedure, s, message.clone(), true, now)
                }
            });
            let Some(decision) = decision else { return };

            if let Some(note) = decision.note {
                self.post_thought(&session_id, note).await;
            }

            match decision.outcome {
                ProcedureOutcome::NextSubroutine { prompt: next, .. }
                | ProcedureOutcome::ValidationIteration { fixer_prompt: next, .. }
                | ProcedureOutcome::ValidationRerun { prompt: next } => {
                    prompt = next;
                    resume_id = self.sessions.get(&session_id).and_then(|s| s.runner_session_id);
                }
                ProcedureOutcome::AwaitingApproval { subroutine_name, pending_result_text } => {
                    self.sessions.mutate(&session_id, |s| s.status = SessionStatus::AwaitingApproval);
                    match self.await_approval(&session_id, &subroutine_name).await {
                        ApprovalOutcome::Approved { feedback } => {
                            if let Some(feedback) = feedback {
                                self.post_thought(&session_id, feedback).await;
                            }
                            self.sessions.mutate(&session_id, |s| s.status = SessionStatus::Active);
                            let now = self.clock.epoch_ms();
                            let resumed = self.sessions.mutate(&session_id, |s| {
                                procedure_engine::resume_after_approval(
                                    &procedure,
                                    s,
                                    None,
                                    pending_result_text.clone(),
                                    now,
                                )
                            });
                            match resumed.map(|d| d.outcome) {
                                Some(ProcedureOutcome::NextSubroutine { prompt: next, .. }) => {
                                    prompt = next;
                                    resume_id = self.sessions.get(&session_id).and_then(|s| s.runner_session_id);
                                }
                                Some(ProcedureOutcome::Complete { final_text }) => {
                                    self.finish_session(session_id, final_text).await;
                                    return;
                                }
                                _ => return,
                            }
                        }
                        ApprovalOutcome::Rejected { .. } => {
                            self.fail_session(session_id, "approval rejected".to_string()).await;
                            return;
                        }
                        ApprovalOutcome::TimedOut => {
                            self.fail_session(session_id, "approval timed out".to_string()).await;
                            return;
                        }
                    }
                }
                ProcedureOutcome::Complete { final_text } => {
                    self.finish_session(session_id, final_text).await;
                    return;
                }
                ProcedureOutcome::Failed { reason } => {
                    self.fail_session(session_id, reason).await;
                    return;
                }
            }
        }
    }

    async fn run_turn(
        &self,
        session_id: &SessionId,
        repo: &RepositoryConfig,
        subroutine: &ab_core::Subroutine,
        prompt: String,
        resume_id: Option<String>,
    ) -> TurnOutcome {
        let executable = if repo.runner_kind.is_empty() {
            self.config.default_runner_executable.clone()
        } else {
            repo.runner_kind.clone()
        };
        let mut spawn_config = RunnerSpawnConfig::new(executable, repo.path.clone(), prompt);
        if let Some(model) = &repo.model_override {
            spawn_config = spawn_config.model_override(model.clone());
        }
        if let Some(resume_id) = resume_id {
            spawn_config = spawn_config.resume_runner_session_id(resume_id);
        }
        spawn_config = spawn_config.sandbox(Some(SandboxMode::WorkspaceWrite));
        if !subroutine.allowed_tools.is_empty() {
            spawn_config.extra_args.push("--allowed-tools".to_string());
            spawn_config.extra_args.push(subroutine.allowed_tools.join(","));
        }
        if !subroutine.disallowed_tools.is_empty() {
            spawn_config.extra_args.push("--disallowed-tools".to_string());
            spawn_config.extra_args.push(subroutine.disallowed_tools.join(","));
        }

        log_effect(&Effect::SpawnRunner {
            session_id: *session_id,
            repo_path: repo.path.clone(),
            runner_kind: repo.runner_kind.clone(),
            prompt: spawn_config.prompt.clone(),
            model_override: repo.model_override.clone(),
            resume_runner_session_id: spawn_config.resume_runner_session_id.clone(),
        });

        let (tx, mut rx) = mpsc::unbounded_channel::<RunnerEvent>();
        let callback: RunnerEventCallback = Box::new(move |event| {
            let _ = tx.send(event);
        });
        let adapter = self.runners.create(spawn_config);
        if let Err(e) = adapter.start(callback).await {
            return TurnOutcome::Error { message: e.to_string() };
        }

        let mut captured: Option<IngestOutcome> = None;
        let mut runner_session_id = None;
        while let Some(event) = rx.recv().await {
            if let RunnerEvent::Session { id } = &event {
                runner_session_id = Some(id.clone());
            }
            let now = self.clock.epoch_ms();
            let (outcome, activity) =
                self.sessions.ingest(session_id, event, subroutine.suppress_thought_posting, now);
            if let Some(req) = activity {
                self.dispatch_activity(req).await;
            }
            if captured.is_none() {
                match &outcome {
                    IngestOutcome::SubroutineSuccess { .. } | IngestOutcome::SubroutineError { .. } => {
                        captured = Some(outcome);
                    }
                    IngestOutcome::Noop => {}
                }
            }
        }

        match captured {
            Some(IngestOutcome::SubroutineSuccess { result_text }) => {
                TurnOutcome::Success { result_text, runner_session_id }
            }
            Some(IngestOutcome::SubroutineError { message }) => TurnOutcome::Error { message },
            _ => TurnOutcome::Error { message: "runner produced no result".to_string() },
        }
    }

    async fn await_approval(&self, session_id: &SessionId, subroutine_name: &str) -> ApprovalOutcome {
        let (tx, rx) = oneshot::channel();
        self.approvals.lock().insert(*session_id, tx);
        let url = format!("{}/approvals/{session_id}", self.config.approval_base_url);
        self.post(
            session_id,
            ab_core::EntryKind::System,
            format!("approval requested for {subroutine_name}: {url}"),
            ActivityContent::Elicitation {
                body: format!("Approval required for subroutine \"{subroutine_name}\""),
                options: vec!["approve".to_string(), "reject".to_string()],
            },
            false,
            Some(url),
        )
        .await;

        match tokio::time::timeout(APPROVAL_TIMEOUT, rx).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) | Err(_) => {
                self.approvals.lock().remove(session_id);
                ApprovalOutcome::TimedOut
            }
        }
    }

    async fn resume_parent(self: Arc<Self>, parent_id: SessionId, prompt: String) {
        let Some(parent) = self.sessions.get(&parent_id) else {
            tracing::warn!(parent = %parent_id, "parent session missing; cannot resume");
            return;
        };
        if parent.status.is_terminal() {
            tracing::warn!(parent = %parent_id, "parent session already terminal; not resuming");
            return;
        }
        let resume_id = parent.runner_session_id;
        tokio::spawn(async move { self.drive(parent_id, prompt, resume_id).await });
    }

    async fn finish_session(self: Arc<Self>, session_id: SessionId, final_text: String) {
        let now = self.clock.epoch_ms();
        self.sessions.complete(&session_id, SessionStatus::Complete, now);
        self.post_response(&session_id, final_text.clone()).await;

        let parent = self.sessions.get(&session_id).and_then(|s| s.parent_session_id);
        if let Some(parent_id) = parent {
            log_effect(&Effect::ResumeParent { parent_session_id: parent_id, child_result_text: final_text.clone() });
            let provenance = format!("[resumed from child session {session_id}] {final_text}");
            self.clone().resume_parent(parent_id, provenance).await;
        }
        self.persist_snapshot().await;
    }

    async fn fail_session(&self, session_id: SessionId, reason: String) {
        let now = self.clock.epoch_ms();
        self.sessions.complete(&session_id, SessionStatus::Error, now);
        self.post_error(&session_id, reason).await;
        self.persist_snapshot().await;
    }

    async fn post_thought(&self, session_id: &SessionId, text: String) {
        self.post(
            session_id,
            ab_core::EntryKind::Assistant,
            text.clone(),
            ActivityContent::Thought { body: text },
            false,
            None,
        )
        .await;
    }

    async fn post_response(&self, session_id: &SessionId, text: String) {
        self.post(
            session_id,
            ab_core::EntryKind::Result,
            text.clone(),
            ActivityContent::Response { body: text },
            false,
            None,
        )
        .await;
    }

    async fn post_error(&self, session_id: &SessionId, text: String) {
        self.post(
            session_id,
            ab_core::EntryKind::Result,
            text.clone(),
            ActivityContent::Error { body: text },
            false,
            None,
        )
        .await;
    }

    async fn post_elicitation(&self, session_id: &SessionId, body: String, options: Vec<String>) {
        self.post(
            session_id,
            ab_core::EntryKind::System,
            body.clone(),
            ActivityContent::Elicitation { body, options },
            false,
            None,
        )
        .await;
    }

    async fn post(
        &self,
        session_id: &SessionId,
        entry_kind: ab_core::EntryKind,
        entry_text: String,
        content: ActivityContent,
        ephemeral: bool,
        signal: Option<String>,
    ) {
        let now = self.clock.epoch_ms();
        self.sessions.mutate(session_id, |s| s.push_entry(SessionEntry::new(entry_kind, entry_text, now)));
        let Some(session) = self.sessions.get(session_id) else { return };
        if session.platform != Platform::Linear {
            return;
        }
        let entry_index = session.entries.len().saturating_sub(1);
        let req = CreateActivityRequest {
            agent_session_id: *session_id,
            content,
            ephemeral,
            signal,
            signal_metadata: None,
        };
        log_effect(&Effect::PostActivity { session_id: *session_id, entry_index });
        self.dispatch_activity(req).await;
    }

    async fn dispatch_activity(&self, req: CreateActivityRequest) {
        let session_id = req.agent_session_id;
        if let Err(e) = self.tracker.create_agent_activity(req).await {
            tracing::warn!(session = %session_id, error = %e, "failed to post activity to tracker");
        }
    }

    async fn snapshot_loop(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.snapshot_interval_secs.max(1)));
        loop {
            ticker.tick().await;
            self.persist_snapshot().await;
        }
    }

    async fn persist_snapshot(&self) {
        log_effect(&Effect::PersistSnapshot);
        let sessions: Vec<_> =
            self.sessions.session_ids().into_iter().filter_map(|id| self.sessions.get(&id)).collect();
        let snapshot = Snapshot::from_sessions(sessions, self.clock.epoch_ms());
        if let Err(e) = ab_storage::persist(&self.config.snapshot_path, &snapshot).await {
            tracing::warn!(error = %e, "failed to persist snapshot");
        }
    }

    async fn gc_loop(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.gc_interval_secs.max(1)));
        loop {
            ticker.tick().await;
            self.gc_sweep();
        }
    }

    fn gc_sweep(&self) {
        log_effect(&Effect::Gc);
        let now = self.clock.epoch_ms();
        let mut removed = Vec::new();
        for id in self.sessions.session_ids() {
            if let Some(session) = self.sessions.get(&id) {
                if session.status.is_terminal() && now.saturating_sub(session.updated_at_ms) >= GC_HORIZON_MS {
                    self.sessions.remove(&id);
                    removed.push(id);
                }
            }
        }
        if !removed.is_empty() {
            self.issue_sessions.lock().retain(|_, v| !removed.contains(v));
            tracing::info!(count = removed.len(), "gc swept terminal sessions");
        }
    }
}

fn log_effect(effect: &Effect) {
    if effect.verbose() {
        tracing::debug!(effect = effect.name(), "effect");
    } else {
        tracing::trace!(effect = effect.name(), "effect");
    }
}

#[derive(Deserialize)]
struct ValidationResult {
    pass: bool,
    #[serde(default)]
    reason: String,
}

fn parse_validation_result(text: &str) -> (bool, String) {
    match serde_json::from_str::<ValidationResult>(text) {
        Ok(v) if !v.reason.is_empty() => (v.pass, v.reason),
        Ok(v) => (v.pass, text.to_string()),
        Err(_) => (false, text.to_string()),
    }
}

#[cfg(test)]
#[path = "edge_worker_tests.rs"]
mod tests;
