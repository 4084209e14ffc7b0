// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner event: the adapter-to-manager contract.
//!
//! Every vendor-specific line of stdout from a runner subprocess is
//! classified down to one of these variants before it reaches the
//! agent-session manager. See `ab_adapters::classify` for the
//! vendor-specific classifier that produces these.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunnerEvent {
    /// Emitted at most once per run, before any content event.
    Session { id: String },
    /// Internal reasoning; dropped once `Final` has fired.
    Thought { text: String },
    /// Streaming partial answer; may repeat many times.
    Response { text: String },
    /// A tool invocation or file mutation.
    Action {
        name: String,
        detail: String,
        #[serde(default)]
        item_type: Option<String>,
        #[serde(default)]
        icon: Option<String>,
    },
    /// Diagnostic text; never surfaced to the tracker as content.
    Log { text: String },
    /// Terminal answer; at most one per run.
    Final { text: String },
    /// May be terminal or recoverable, depending on whether `Final` already fired.
    Error { error: String },
}

impl RunnerEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            RunnerEvent::Session { .. } => "session",
            RunnerEvent::Thought { .. } => "thought",
            RunnerEvent::Response { .. } => "response",
            RunnerEvent::Action { .. } => "action",
            RunnerEvent::Log { .. } => "log",
            RunnerEvent::Final { .. } => "final",
            RunnerEvent::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
#[path = "runner_event_tests.rs"]
mod tests;
