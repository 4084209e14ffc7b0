// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted in-memory [`RunnerAdapter`] for tests that exercise the
//! session manager / procedure engine without spawning a real subprocess.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use ab_core::RunnerEvent;
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::RunnerAdapterError;
use crate::runner::{RunnerAdapter, RunnerCapabilities, RunnerEventCallback};

/// Replays a fixed sequence of [`RunnerEvent`]s on `start`, honouring the
/// at-most-one-final invariant the same way [`crate::CodingCliAdapter`]
/// does, so tests built against this fake exercise real filtering logic.
pub struct ScriptedAdapter {
    script: Arc<Mutex<Vec<RunnerEvent>>>,
    stop_called: Arc<AtomicUsize>,
    stopped: Arc<AtomicBool>,
    fail_spawn: bool,
}

impl ScriptedAdapter {
    pub fn new(events: Vec<RunnerEvent>) -> Self {
        Self {
            script: Arc::new(Mutex::new(events)),
            stop_called: Arc::new(AtomicUsize::new(0)),
            stopped: Arc::new(AtomicBool::new(false)),
            fail_spawn: false,
        }
    }

    pub fn failing_to_spawn() -> Self {
        Self {
            script: Arc::new(Mutex::new(Vec::new())),
            stop_called: Arc::new(AtomicUsize::new(0)),
            stopped: Arc::new(AtomicBool::new(false)),
            fail_spawn: true,
        }
    }

    pub fn stop_call_count(&self) -> usize {
        self.stop_called.load(Ordering::SeqCst)
    }

    pub fn was_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RunnerAdapter for ScriptedAdapter {
    async fn start(&self, on_event: RunnerEventCallback) -> Result<RunnerCapabilities, RunnerAdapterError> {
        if self.fail_spawn {
            return Err(RunnerAdapterError::SpawnFailure(std::io::Error::other("scripted spawn failure")));
        }

        let events = self.script.lock().clone();
        let mut final_sent = false;
        for event in events {
            if final_sent && !matches!(event, RunnerEvent::Log { .. } | RunnerEvent::Error { .. }) {
                continue;
            }
            if matches!(event, RunnerEvent::Final { .. }) {
                final_sent = true;
            }
            on_event(event);
        }

        Ok(RunnerCapabilities { json_stream: true })
    }

    async fn stop(&self) {
        self.stop_called.fetch_add(1, Ordering::SeqCst);
        self.stopped.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
