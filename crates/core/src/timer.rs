// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer identifier type for tracking scheduled timeouts.

use crate::session::SessionId;

crate::define_id! {
    /// Unique identifier for a timer instance.
    ///
    /// Timers schedule delayed actions: approval timeouts and the
    /// periodic terminal-session garbage collection sweep.
    pub struct TimerId("tmr-");
}

impl TimerId {
    pub fn approval_timeout(session_id: &SessionId) -> Self {
        Self::new(format!("approval-timeout:{session_id}"))
    }

    pub fn gc_sweep() -> Self {
        Self::new("gc-sweep")
    }

    /// Parse this timer ID into a typed `TimerKind`.
    pub fn kind(&self) -> TimerKind<'_> {
        TimerKind::parse(self.as_str())
    }
}

/// Parsed representation of a timer ID for type-safe dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerKind<'a> {
    ApprovalTimeout(&'a str),
    GcSweep,
    Unknown(&'a str),
}

impl<'a> TimerKind<'a> {
    fn parse(id: &'a str) -> TimerKind<'a> {
        if let Some(rest) = id.strip_prefix("approval-timeout:") {
            return TimerKind::ApprovalTimeout(rest);
        }
        if id == "gc-sweep" {
            return TimerKind::GcSweep;
        }
        TimerKind::Unknown(id)
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
