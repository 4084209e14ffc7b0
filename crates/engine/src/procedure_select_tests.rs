// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ab_core::Subroutine;

fn procedure(name: &str, trigger_labels: &[&str]) -> Procedure {
    Procedure {
        name: name.to_string(),
        trigger_labels: trigger_labels.iter().map(|s| s.to_string()).collect(),
        subroutines: vec![Subroutine {
            name: "only".to_string(),
            prompt_template: "do it".to_string(),
            allowed_tools: Vec::new(),
            disallowed_tools: Vec::new(),
            requires_approval: false,
            uses_validation_loop: false,
            suppress_thought_posting: false,
            single_turn: false,
        }],
    }
}

#[test]
fn trigger_label_match_wins_over_classifier() {
    let catalog = ProcedureCatalog {
        procedures: vec![procedure("bugfix", &["bug"]), procedure("refactor", &[])],
        default_procedure: None,
    };
    let selected = catalog.select(&["bug".to_string()], "refactor the module", "").unwrap();
    assert_eq!(selected.name, "bugfix");
}

#[test]
fn classifier_fallback_matches_by_keyword_overlap() {
    let catalog = ProcedureCatalog {
        procedures: vec![procedure("bugfix", &[]), procedure("refactor", &[])],
        default_procedure: None,
    };
    let selected = catalog.select(&[], "please refactor this module", "").unwrap();
    assert_eq!(selected.name, "refactor");
}

#[test]
fn falls_back_to_default_when_nothing_scores_above_threshold() {
    let catalog = ProcedureCatalog {
        procedures: vec![procedure("bugfix", &[]), procedure("refactor", &[])],
        default_procedure: Some("bugfix".to_string()),
    };
    let selected = catalog.select(&[], "completely unrelated text here", "").unwrap();
    assert_eq!(selected.name, "bugfix");
}

#[test]
fn no_match_and_no_default_returns_none() {
    let catalog = ProcedureCatalog {
        procedures: vec![procedure("bugfix", &[])],
        default_procedure: None,
    };
    assert!(catalog.select(&[], "unrelated", "").is_none());
}

#[test]
fn from_toml_rejects_unknown_default() {
    let toml_text = r#"
default_procedure = "missing"

[[procedure]]
name = "bugfix"

[[procedure.subroutines]]
name = "only"
prompt_template = "do it"
"#;
    assert!(ProcedureCatalog::from_toml(toml_text).is_err());
}

#[test]
fn from_toml_parses_a_full_catalog() {
    let toml_text = r#"
default_procedure = "bugfix"

[[procedure]]
name = "bugfix"
trigger_labels = ["bug"]

[[procedure.subroutines]]
name = "investigate"
prompt_template = "find the cause"
requires_approval = false
"#;
    let catalog = ProcedureCatalog::from_toml(toml_text).unwrap();
    assert_eq!(catalog.procedures.len(), 1);
    assert_eq!(catalog.procedures[0].subroutines[0].name, "investigate");
}
