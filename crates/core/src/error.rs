// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-crate error classification.
//!
//! Individual crates define their own `thiserror` error types for their
//! boundary (transport, adapter, router, tracker, ...). `ErrorKind` is the
//! coarse classification every one of those errors maps to, used when an
//! error needs to be rendered onto the tracker as an activity or matched on
//! by the procedure engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AuthenticationFailure,
    MalformedRequest,
    RunnerSpawnFailure,
    RunnerAbandoned,
    RunnerReportedError,
    TrackerFailure,
    ProcedureValidationExhausted,
    ApprovalRejected,
    ApprovalTimedOut,
    NotFound,
    ConfigError,
}

crate::simple_display! {
    ErrorKind {
        AuthenticationFailure => "authentication failure",
        MalformedRequest => "malformed request",
        RunnerSpawnFailure => "runner spawn failure",
        RunnerAbandoned => "runner abandoned",
        RunnerReportedError => "runner reported error",
        TrackerFailure => "tracker failure",
        ProcedureValidationExhausted => "procedure validation exhausted",
        ApprovalRejected => "approval rejected",
        ApprovalTimedOut => "approval timed out",
        NotFound => "not found",
        ConfigError => "configuration error",
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
