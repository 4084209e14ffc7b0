// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Procedure engine: pure decision functions over a session's procedure
//! metadata. No I/O lives here — the caller (session manager / executor)
//! turns a `ProcedureOutcome` into activities, effects, and runner calls.

use ab_core::procedure::VALIDATION_LOOP_MAX_ITERATIONS;
use ab_core::{AgentSession, Procedure, Subroutine, ValidationLoopState};
use std::collections::HashMap;

/// What the procedure engine decided in response to one subroutine's
/// completion. `note` carries a thought-worthy aside (e.g. validation-loop
/// exhaustion) the caller should post alongside the primary outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDecision {
    pub outcome: ProcedureOutcome,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProcedureOutcome {
    /// Render and run the subroutine at `index`.
    NextSubroutine { index: usize, prompt: String },
    /// The just-finished subroutine requires sign-off before continuing.
    /// `pending_result_text` is recorded once the approval resolves.
    AwaitingApproval { subroutine_name: String, pending_result_text: String },
    /// A validation subroutine failed; run the fixer, then rerun.
    ValidationIteration { fixer_prompt: String, iteration: u32, max: u32 },
    /// The fixer finished; rerun the verification subroutine.
    ValidationRerun { prompt: String },
    /// No more subroutines; this is the procedure's final answer.
    Complete { final_text: String },
    /// The procedure cannot continue.
    Failed { reason: String },
}

/// The subroutine currently pointed at by `session.current_subroutine`.
pub fn current<'a>(session: &AgentSession, procedure: &'a Procedure) -> Option<&'a Subroutine> {
    procedure.get(session.current_subroutine)
}

pub fn next<'a>(session: &AgentSession, procedure: &'a Procedure) -> Option<&'a Subroutine> {
    procedure.get(session.current_subroutine + 1)
}

pub fn last_subroutine_result(session: &AgentSession) -> Option<&str> {
    session.subroutine_results.last().map(|s| s.as_str())
}

fn prompt_vars(session: &AgentSession, last_result: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert("issue_identifier".to_string(), session.issue_context.issue_identifier.clone());
    vars.insert("last_result".to_string(), last_result.to_string());
    vars
}

pub fn render_prompt(template: &str, vars: &HashMap<String, String>) -> String {
    let mut rendered = template.to_string();
    for (key, value) in vars {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}

/// Advance past the current subroutine, recording its result and the
/// runner-assigned session id (set at most once, idempotently).
fn advance(
    session: &mut AgentSession,
    runner_session_id: Option<String>,
    result_text: Option<String>,
    now_ms: u64,
) {
    if let Some(id) = runner_session_id {
        session.set_runner_session_id(id);
    }
    if let Some(text) = result_text {
        session.subroutine_results.push(text);
    }
    session.current_subroutine += 1;
    session.updated_at_ms = now_ms;
}

/// Decide what happens after a subroutine completes successfully (or, for
/// a validation subroutine, after its verification passes).
pub fn handle_success(
    procedure: &Procedure,
    session: &mut AgentSession,
    runner_session_id: Option<String>,
    result_text: String,
    now_ms: u64,
) -> ProcedureDecision {
    let just_finished = current(session, procedure).cloned();

    if let Some(finished) = &just_finished {
        if finished.requires_approval {
            return ProcedureDecision {
                outcome: ProcedureOutcome::AwaitingApproval {
                    subroutine_name: finished.name.clone(),
                    pending_result_text: result_text,
                },
                note: None,
            };
        }
    }

    finish_advance(procedure, session, runner_session_id, result_text, now_ms)
}

/// Continuation after an approval resolves positively: records the
/// deferred result and proceeds exactly as `handle_success` would have.
pub fn resume_after_approval(
    procedure: &Procedure,
    session: &mut AgentSession,
    runner_session_id: Option<String>,
    pending_result_text: String,
    now_ms: u64,
) -> ProcedureDecision {
    finish_advance(procedure, session, runner_session_id, pending_result_text, now_ms)
}

fn finish_advance(
    procedure: &Procedure,
    session: &mut AgentSession,
    runner_session_id: Option<String>,
    result_text: String,
    now_ms: u64,
) -> ProcedureDecision {
    advance(session, runner_session_id, Some(result_text.clone()), now_ms);

    match procedure.get(session.current_subroutine) {
        Some(next_sub) => {
            let prompt = render_prompt(&next_sub.prompt_template, &prompt_vars(session, &result_text));
            ProcedureDecision {
                outcome: ProcedureOutcome::NextSubroutine { index: session.current_subroutine, prompt },
                note: None,
            }
        }
        None => ProcedureDecision { outcome: ProcedureOutcome::Complete { final_text: result_text }, note: None },
    }
}

/// Decide what happens after a validation subroutine reports `{pass, reason}`.
pub fn handle_validation_result(
    procedure: &Procedure,
    session: &mut AgentSession,
    pass: bool,
    reason: String,
    runner_session_id: Option<String>,
    now_ms: u64,
) -> ProcedureDecision {
    if pass {
        session.validation_loop = None;
        return handle_success(procedure, session, runner_session_id, reason, now_ms);
    }

    let loop_state = session.validation_loop.get_or_insert_with(ValidationLoopState::default);
    loop_state.record(false, reason.clone(), now_ms);

    if loop_state.exhausted() {
        session.validation_loop = None;
        let mut decision = handle_success(procedure, session, runner_session_id, reason.clone(), now_ms);
        decision.note =
            Some(format!("validation loop exhausted after {VALIDATION_LOOP_MAX_ITERATIONS} attempts; advancing anyway ({reason})"));
        return decision;
    }

    loop_state.iteration += 1;
    loop_state.in_fixer_mode = true;
    let iteration = loop_state.iteration;
    ProcedureDecision {
        outcome: ProcedureOutcome::ValidationIteration {
            fixer_prompt: format!("Fix the following validation failure: {reason}"),
            iteration,
            max: VALIDATION_LOOP_MAX_ITERATIONS,
        },
        note: None,
    }
}

/// The fixer subroutine finished; rerun the verification subroutine.
pub fn handle_validation_fixer_complete(procedure: &Procedure, session: &mut AgentSession) -> ProcedureDecision {
    if let Some(loop_state) = session.validation_loop.as_mut() {
        loop_state.in_fixer_mode = false;
    }
    let prompt = current(session, procedure)
        .map(|sub| render_prompt(&sub.prompt_template, &prompt_vars(session, "")))
        .unwrap_or_default();
    ProcedureDecision { outcome: ProcedureOutcome::ValidationRerun { prompt }, note: None }
}

/// Decide what happens after a subroutine fails. A `singleTurn` subroutine
/// that fails recoverably is papered over with the prior subroutine's
/// recorded result, treated as a synthetic success.
pub fn handle_error(
    procedure: &Procedure,
    session: &mut AgentSession,
    error_message: String,
    recoverable: bool,
    now_ms: u64,
) -> ProcedureDecision {
    if recoverable {
        if let Some(current_sub) = current(session, procedure) {
            if current_sub.single_turn {
                if let Some(prior) = last_subroutine_result(session).map(|s| s.to_string()) {
                    return handle_success(procedure, session, None, prior, now_ms);
                }
            }
        }
    }
    ProcedureDecision { outcome: ProcedureOutcome::Failed { reason: error_message }, note: None }
}

#[cfg(test)]
#[path = "procedure_engine_tests.rs"]
mod tests;
