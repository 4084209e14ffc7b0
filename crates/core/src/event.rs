// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Internal orchestrator event bus.
//!
//! `OrchestratorEvent` is a record of facts driving the edge worker; each
//! variant is produced by a transport/adapter/timer and consumed by pure
//! decision functions that emit `Effect`s in response. Keeping this as a
//! flat enum (rather than a trait-object event emitter) means the decision
//! logic can be unit tested without any I/O.

use crate::approval::ApprovalOutcome;
use crate::runner_event::RunnerEvent;
use crate::session::SessionId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrchestratorEvent {
    #[serde(rename = "webhook:received")]
    WebhookReceived { payload: serde_json::Value },

    #[serde(rename = "session:routed")]
    SessionRouted { session_id: SessionId, repository_id: String },

    #[serde(rename = "runner:event")]
    RunnerEventIngested { session_id: SessionId, event: RunnerEvent },

    #[serde(rename = "procedure:subroutineComplete")]
    SubroutineComplete { session_id: SessionId, result_text: String },

    #[serde(rename = "procedure:validationLoopIteration")]
    ValidationLoopIteration { session_id: SessionId, fixer_prompt: String, iteration: u32, max: u32 },

    #[serde(rename = "procedure:validationLoopRerun")]
    ValidationLoopRerun { session_id: SessionId },

    #[serde(rename = "approval:resolved")]
    ApprovalResolved { session_id: SessionId, outcome: ApprovalOutcome },

    #[serde(rename = "timer:fired")]
    TimerFired { id: crate::timer::TimerId },

    /// Catch-all for events not otherwise modelled; never routed anywhere.
    #[serde(rename = "custom")]
    Custom,
}

impl OrchestratorEvent {
    /// A short summary suitable for a structured log field.
    pub fn log_summary(&self) -> String {
        match self {
            OrchestratorEvent::WebhookReceived { .. } => "webhook received".to_string(),
            OrchestratorEvent::SessionRouted { session_id, repository_id } => {
                format!("session {session_id} routed to {repository_id}")
            }
            OrchestratorEvent::RunnerEventIngested { session_id, event } => {
                format!("session {session_id} ingested {}", event.kind())
            }
            OrchestratorEvent::SubroutineComplete { session_id, .. } => {
                format!("session {session_id} subroutine complete")
            }
            OrchestratorEvent::ValidationLoopIteration { session_id, iteration, max, .. } => {
                format!("session {session_id} validation loop {iteration}/{max}")
            }
            OrchestratorEvent::ValidationLoopRerun { session_id } => {
                format!("session {session_id} validation rerun")
            }
            OrchestratorEvent::ApprovalResolved { session_id, .. } => {
                format!("session {session_id} approval resolved")
            }
            OrchestratorEvent::TimerFired { id } => format!("timer {id} fired"),
            OrchestratorEvent::Custom => "custom".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
