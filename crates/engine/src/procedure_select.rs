// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Procedure selection: picks one configured procedure for an issue,
//! first by label trigger, then by a keyword-overlap classifier fallback.

use ab_core::Procedure;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A minimum token-overlap score below which the fallback refuses to
/// guess and uses `default_procedure` instead.
const MIN_CLASSIFIER_SCORE: f64 = 0.08;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcedureCatalog {
    #[serde(rename = "procedure", default)]
    pub procedures: Vec<Procedure>,
    pub default_procedure: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProcedureCatalogError {
    #[error("failed to parse procedure catalog: {0}")]
    Parse(String),
    #[error("default_procedure {0:?} does not name a configured procedure")]
    UnknownDefault(String),
}

impl ProcedureCatalog {
    pub fn from_toml(text: &str) -> Result<Self, ProcedureCatalogError> {
        let catalog: ProcedureCatalog =
            toml::from_str(text).map_err(|e| ProcedureCatalogError::Parse(e.to_string()))?;
        if let Some(default) = &catalog.default_procedure {
            if !catalog.procedures.iter().any(|p| &p.name == default) {
                return Err(ProcedureCatalogError::UnknownDefault(default.clone()));
            }
        }
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.name == name)
    }

    pub fn default_procedure(&self) -> Option<&Procedure> {
        self.default_procedure.as_deref().and_then(|name| self.get(name))
    }

    /// Select a procedure for an issue: trigger-label match first, then a
    /// keyword-overlap fallback over the issue's title/description.
    pub fn select(&self, labels: &[String], title: &str, description: &str) -> Option<&Procedure> {
        if let Some(procedure) =
            self.procedures.iter().find(|p| p.trigger_labels.iter().any(|t| labels.contains(t)))
        {
            return Some(procedure);
        }

        let text = format!("{title} {description}");
        let scored = score_by_keyword_overlap(&self.procedures, &text);
        scored.or_else(|| self.default_procedure())
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
        .collect()
}

fn score_by_keyword_overlap<'a>(procedures: &'a [Procedure], text: &str) -> Option<&'a Procedure> {
    let text_tokens = tokenize(text);
    if text_tokens.is_empty() {
        return None;
    }

    let mut best: Option<(&Procedure, f64)> = None;
    for procedure in procedures {
        let name_tokens = tokenize(&procedure.name);
        if name_tokens.is_empty() {
            continue;
        }
        let overlap = name_tokens.intersection(&text_tokens).count();
        let score = overlap as f64 / name_tokens.len() as f64;
        if best.as_ref().map(|(_, best_score)| score > *best_score).unwrap_or(true) {
            best = Some((procedure, score));
        }
    }

    best.filter(|(_, score)| *score >= MIN_CLASSIFIER_SCORE).map(|(procedure, _)| procedure)
}

#[cfg(test)]
#[path = "procedure_select_tests.rs"]
mod tests;
