// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The runner adapter trait (C1): one implementation per agent-subprocess
//! vendor. [`CodingCliAdapter`] is the only production implementation; the
//! `test-support` feature adds a scripted in-memory stand-in.

use ab_core::RunnerEvent;
use async_trait::async_trait;

use crate::error::RunnerAdapterError;

/// What the spawned runner CLI was detected to support, returned from
/// `start` so the caller can log or branch on degraded capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerCapabilities {
    pub json_stream: bool,
}

/// Callback invoked once per normalised [`RunnerEvent`]. Boxed so adapters
/// can be stored as trait objects without a generic parameter leaking
/// through the session manager.
pub type RunnerEventCallback = Box<dyn Fn(RunnerEvent) + Send + Sync>;

/// Supervises one agent subprocess for the duration of one subroutine turn.
#[async_trait]
pub trait RunnerAdapter: Send + Sync {
    /// Spawn (or resume) the runner and wire its normalised event stream to
    /// `on_event`. Resolves once the first event has been delivered, or
    /// once the process has already exited.
    async fn start(
        &self,
        on_event: RunnerEventCallback,
    ) -> Result<RunnerCapabilities, RunnerAdapterError>;

    /// Idempotent, re-entrant shutdown. SIGTERM, then SIGKILL after 5s if
    /// the child hasn't exited. Returns only once the child is dead.
    async fn stop(&self);
}

/// A lightweight handle returned alongside a started adapter, carrying the
/// capabilities discovered during the capability probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerHandle {
    pub capabilities: RunnerCapabilities,
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
