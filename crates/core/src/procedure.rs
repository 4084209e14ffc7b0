// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Procedure: an ordered sequence of subroutines driving one session.

use serde::{Deserialize, Serialize};

/// One step of a procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Subroutine {
    pub name: String,
    pub prompt_template: String,
    #[serde(default)]
    pub allowed_tools: Vec<String>,
    #[serde(default)]
    pub disallowed_tools: Vec<String>,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default)]
    pub uses_validation_loop: bool,
    #[serde(default)]
    pub suppress_thought_posting: bool,
    #[serde(default)]
    pub single_turn: bool,
}

/// A named, ordered workflow selected by label or by the classifier fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Procedure {
    pub name: String,
    #[serde(default)]
    pub trigger_labels: Vec<String>,
    pub subroutines: Vec<Subroutine>,
}

impl Procedure {
    pub fn get(&self, index: usize) -> Option<&Subroutine> {
        self.subroutines.get(index)
    }

    pub fn len(&self) -> usize {
        self.subroutines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subroutines.is_empty()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.subroutines.len()
    }
}

/// Maximum validation-loop iterations before the engine gives up and
/// advances anyway.
pub const VALIDATION_LOOP_MAX_ITERATIONS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationAttempt {
    pub iteration: u32,
    pub pass: bool,
    pub reason: String,
    pub timestamp_ms: u64,
}

/// Fixer/verifier retry state for a subroutine marked `uses_validation_loop`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLoopState {
    pub iteration: u32,
    pub in_fixer_mode: bool,
    #[serde(default)]
    pub attempts: Vec<ValidationAttempt>,
}

impl ValidationLoopState {
    pub fn record(&mut self, pass: bool, reason: impl Into<String>, timestamp_ms: u64) {
        self.attempts.push(ValidationAttempt {
            iteration: self.iteration,
            pass,
            reason: reason.into(),
            timestamp_ms,
        });
    }

    pub fn exhausted(&self) -> bool {
        self.iteration >= VALIDATION_LOOP_MAX_ITERATIONS
    }
}

#[cfg(test)]
#[path = "procedure_tests.rs"]
mod tests;
