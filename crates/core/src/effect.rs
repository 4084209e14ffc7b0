// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects the edge worker's executor performs.
//!
//! Decision logic (given state + an `OrchestratorEvent`, produce a list of
//! effects) stays synchronous and unit-testable; the executor is the only
//! place that actually spawns processes, calls the tracker, or touches the
//! filesystem.

use crate::session::SessionId;
use crate::timer::TimerId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Emit an event into the internal orchestrator event bus.
    Emit { event: crate::event::OrchestratorEvent },

    /// Spawn (or resume) a runner subprocess for one subroutine turn.
    SpawnRunner {
        session_id: SessionId,
        repo_path: PathBuf,
        runner_kind: String,
        prompt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model_override: Option<String>,
        /// Present when resuming an existing runner-assigned session.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resume_runner_session_id: Option<String>,
    },

    /// Stop the active runner for a session. Idempotent at the adapter level.
    StopRunner { session_id: SessionId },

    /// Post a session entry to the issue tracker as an activity.
    PostActivity { session_id: SessionId, entry_index: usize },

    /// Resume the parent of a completed child session with its result text.
    ResumeParent { parent_session_id: SessionId, child_result_text: String },

    SetTimer {
        id: TimerId,
        #[serde(with = "duration_ms")]
        duration: Duration,
    },
    CancelTimer { id: TimerId },

    /// Serialize `{sessions, entries}` to the configured snapshot path.
    PersistSnapshot,

    /// Sweep terminal sessions older than the GC horizon.
    Gc,
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Emit { .. } => "emit",
            Effect::SpawnRunner { .. } => "spawn_runner",
            Effect::StopRunner { .. } => "stop_runner",
            Effect::PostActivity { .. } => "post_activity",
            Effect::ResumeParent { .. } => "resume_parent",
            Effect::SetTimer { .. } => "set_timer",
            Effect::CancelTimer { .. } => "cancel_timer",
            Effect::PersistSnapshot => "persist_snapshot",
            Effect::Gc => "gc",
        }
    }

    /// Whether this effect is frequent/low-signal enough to log tersely.
    pub fn verbose(&self) -> bool {
        !matches!(self, Effect::Emit { .. } | Effect::SetTimer { .. } | Effect::CancelTimer { .. })
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
        duration.as_millis().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
