// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;


fn subroutine(name: &str) -> Subroutine {
    Subroutine {
        name: name.to_string(),
        prompt_template: "step for {{issue_identifier}}".to_string(),
        allowed_tools: Vec::new(),
        disallowed_tools: Vec::new(),
        requires_approval: false,
        uses_validation_loop: false,
        suppress_thought_posting: false,
        single_turn: false,
    }
}

fn three_step_procedure() -> Procedure {
    Procedure {
        name: "demo".to_string(),
        trigger_labels: Vec::new(),
        subroutines: vec![subroutine("one"), subroutine("two"), subroutine("three")],
    }
}

#[test]
fn advances_through_every_subroutine_then_completes() {
    let procedure = three_step_procedure();
    let mut session = AgentSession::builder().build();

    let d1 = handle_success(&procedure, &mut session, None, "r0".to_string(), 1);
    assert!(matches!(d1.outcome, ProcedureOutcome::NextSubroutine { index: 1, .. }));
    assert_eq!(session.current_subroutine, 1);

    let d2 = handle_success(&procedure, &mut session, None, "r1".to_string(), 2);
    assert!(matches!(d2.outcome, ProcedureOutcome::NextSubroutine { index: 2, .. }));

    let d3 = handle_success(&procedure, &mut session, None, "r2".to_string(), 3);
    match d3.outcome {
        ProcedureOutcome::Complete { final_text } => assert_eq!(final_text, "r2"),
        other => panic!("expected Complete, got {other:?}"),
    }
    assert_eq!(session.current_subroutine, 3);
    assert_eq!(session.subroutine_results, vec!["r0", "r1", "r2"]);
}

#[test]
fn runner_session_id_set_only_once() {
    let procedure = three_step_procedure();
    let mut session = AgentSession::builder().build();
    handle_success(&procedure, &mut session, Some("rsid-1".to_string()), "r0".to_string(), 1);
    handle_success(&procedure, &mut session, Some("rsid-2".to_string()), "r1".to_string(), 2);
    assert_eq!(session.runner_session_id.as_deref(), Some("rsid-1"));
}

#[test]
fn just_finished_requiring_approval_suspends_before_advancing() {
    let mut gated = subroutine("gate");
    gated.requires_approval = true;
    let procedure = Procedure {
        name: "gated".to_string(),
        trigger_labels: Vec::new(),
        subroutines: vec![gated, subroutine("after")],
    };
    let mut session = AgentSession::builder().build();

    let decision = handle_success(&procedure, &mut session, None, "gate result".to_string(), 1);
    match decision.outcome {
        ProcedureOutcome::AwaitingApproval { subroutine_name, pending_result_text } => {
            assert_eq!(subroutine_name, "gate");
            assert_eq!(pending_result_text, "gate result");
        }
        other => panic!("expected AwaitingApproval, got {other:?}"),
    }
    assert_eq!(session.current_subroutine, 0, "must not advance until approval resolves");
}

#[test]
fn approval_resume_advances_past_the_gated_subroutine() {
    let mut gated = subroutine("gate");
    gated.requires_approval = true;
    let procedure = Procedure {
        name: "gated".to_string(),
        trigger_labels: Vec::new(),
        subroutines: vec![gated, subroutine("after")],
    };
    let mut session = AgentSession::builder().build();

    let decision = resume_after_approval(&procedure, &mut session, None, "gate result".to_string(), 5);
    assert!(matches!(decision.outcome, ProcedureOutcome::NextSubroutine { index: 1, .. }));
    assert_eq!(session.current_subroutine, 1);
}

#[test]
fn validation_loop_runs_exactly_k_iterations_then_advances() {
    let mut verify = subroutine("verify");
    verify.uses_validation_loop = true;
    let procedure = Procedure {
        name: "validated".to_string(),
        trigger_labels: Vec::new(),
        subroutines: vec![verify, subroutine("after")],
    };
    let mut session = AgentSession::builder().build();

    for i in 1..=ab_core::procedure::VALIDATION_LOOP_MAX_ITERATIONS {
        let decision =
            handle_validation_result(&procedure, &mut session, false, "missing tests".to_string(), None, i as u64);
        match decision.outcome {
            ProcedureOutcome::ValidationIteration { iteration, max, .. } => {
                assert_eq!(iteration, i);
                assert_eq!(max, ab_core::procedure::VALIDATION_LOOP_MAX_ITERATIONS);
            }
            other => panic!("expected ValidationIteration on attempt {i}, got {other:?}"),
        }
        let rerun = handle_validation_fixer_complete(&procedure, &mut session);
        assert!(matches!(rerun.outcome, ProcedureOutcome::ValidationRerun { .. }));
    }

    // (K+1)-th failure: exhausted, advances anyway.
    let final_decision = handle_validation_result(
        &procedure,
        &mut session,
        false,
        "still failing".to_string(),
        None,
        99,
    );
    assert!(final_decision.note.is_some());
    assert!(matches!(final_decision.outcome, ProcedureOutcome::NextSubroutine { index: 1, .. }));
    assert!(session.validation_loop.is_none());
}

#[test]
fn validation_pass_advances_immediately() {
    let mut verify = subroutine("verify");
    verify.uses_validation_loop = true;
    let procedure = Procedure {
        name: "validated".to_string(),
        trigger_labels: Vec::new(),
        subroutines: vec![verify, subroutine("after")],
    };
    let mut session = AgentSession::builder().build();

    let decision = handle_validation_result(&procedure, &mut session, true, "looks good".to_string(), None, 1);
    assert!(matches!(decision.outcome, ProcedureOutcome::NextSubroutine { index: 1, .. }));
    assert!(session.validation_loop.is_none());
}

#[test]
fn single_turn_recoverable_error_reuses_prior_result_as_synthetic_success() {
    let mut flaky = subroutine("flaky");
    flaky.single_turn = true;
    let procedure = Procedure {
        name: "recovering".to_string(),
        trigger_labels: Vec::new(),
        subroutines: vec![subroutine("setup"), flaky, subroutine("after")],
    };
    let mut session = AgentSession::builder().build();
    handle_success(&procedure, &mut session, None, "setup result".to_string(), 1);
    assert_eq!(session.current_subroutine, 1);

    let decision = handle_error(&procedure, &mut session, "flaked out".to_string(), true, 2);
    match decision.outcome {
        ProcedureOutcome::NextSubroutine { index: 2, .. } => {}
        other => panic!("expected synthetic-success advance, got {other:?}"),
    }
    assert_eq!(session.subroutine_results.last().map(|s| s.as_str()), Some("setup result"));
}

#[test]
fn single_turn_unrecoverable_error_fails_the_procedure() {
    let mut flaky = subroutine("flaky");
    flaky.single_turn = true;
    let procedure = Procedure {
        name: "recovering".to_string(),
        trigger_labels: Vec::new(),
        subroutines: vec![subroutine("setup"), flaky],
    };
    let mut session = AgentSession::builder().build();
    handle_success(&procedure, &mut session, None, "setup result".to_string(), 1);

    let decision = handle_error(&procedure, &mut session, "flaked out".to_string(), false, 2);
    assert!(matches!(decision.outcome, ProcedureOutcome::Failed { .. }));
}

#[test]
fn non_single_turn_error_always_fails() {
    let procedure = three_step_procedure();
    let mut session = AgentSession::builder().build();
    let decision = handle_error(&procedure, &mut session, "boom".to_string(), true, 1);
    assert!(matches!(decision.outcome, ProcedureOutcome::Failed { .. }));
}

#[test]
fn render_prompt_substitutes_known_placeholders() {
    let mut vars = std::collections::HashMap::new();
    vars.insert("issue_identifier".to_string(), "TEAM-9".to_string());
    let rendered = render_prompt("work on {{issue_identifier}}", &vars);
    assert_eq!(rendered, "work on TEAM-9");
}
