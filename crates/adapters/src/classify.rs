// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure vendor-line classifier.
//!
//! `classify` is the only place that knows the shape of a runner CLI's
//! line-delimited JSON protocol. It takes one stdout line and returns zero
//! or more normalised [`RunnerEvent`]s; the adapter that calls it owns all
//! stateful concerns (at-most-one-final, EOF handling, stop bookkeeping).
//! Adding a new runner vendor means adding cases here, not touching
//! [`crate::cli_adapter::CodingCliAdapter`].

use ab_core::RunnerEvent;
use serde_json::Value;
use std::collections::HashSet;

/// Structural keys skipped by [`extract_text`] so metadata fields are never
/// mistaken for prose content.
const IGNORED_KEYS: &[&str] = &[
    "type",
    "role",
    "name",
    "item_type",
    "status",
    "id",
    "item_id",
    "session_id",
    "command",
    "args",
    "exit_code",
    "aggregated_output",
];

const MAX_DEPTH: usize = 6;

const NOISE_KEYWORDS: &[&str] = &["token", "status", "progress", "telemetry", "metrics"];

/// Classify one stdout line from a runner subprocess.
///
/// Blank lines should be filtered by the caller before reaching here; an
/// empty result is still safe to handle (no-op).
pub fn classify(line: &str) -> Vec<RunnerEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        Err(_) => return vec![RunnerEvent::Log { text: trimmed.to_string() }],
    };

    let type_field = field_str(&value, "type").unwrap_or_default().trim().to_lowercase();

    if matches!(
        type_field.as_str(),
        "session.created" | "thread.created" | "thread.started" | "thread.resumed"
    ) {
        let id = value
            .get("session")
            .and_then(|s| s.get("id"))
            .and_then(Value::as_str)
            .or_else(|| field_str(&value, "id"))
            .or_else(|| field_str(&value, "session_id"))
            .unwrap_or("unknown")
            .to_string();
        return vec![
            RunnerEvent::Session { id: id.clone() },
            RunnerEvent::Log { text: format!("runner session {id} started ({type_field})") },
        ];
    }

    if let Some(item) = value.get("item") {
        return classify_item(&type_field, item);
    }

    if type_field == "error" || type_field.ends_with(".failed") || value.get("error").is_some() {
        return vec![RunnerEvent::Error { error: derive_error_message(&type_field, &value) }];
    }

    if NOISE_KEYWORDS.iter().any(|kw| type_field.contains(kw)) {
        return vec![RunnerEvent::Log { text: trimmed.to_string() }];
    }

    // Unrecognised shape: never silently dropped, always a log.
    vec![RunnerEvent::Log { text: trimmed.to_string() }]
}

fn classify_item(envelope_type: &str, item: &Value) -> Vec<RunnerEvent> {
    let item_type = field_str(item, "type")
        .or_else(|| field_str(item, "item_type"))
        .unwrap_or_default()
        .to_lowercase();

    if item_type.contains("reasoning") {
        return vec![RunnerEvent::Thought { text: strip_item_ids(&extract_text(item)) }];
    }

    if item_type.contains("command")
        || item_type.contains("tool")
        || item_type == "file_change"
        || item_type == "web_search"
    {
        let name = field_str(item, "command").or_else(|| field_str(item, "name")).unwrap_or(&item_type).to_string();
        // `aggregated_output` sits in the generic prose visitor's
        // IGNORED_KEYS (it's structural noise for reasoning/response text)
        // but it's the whole point of a command item's detail, so pull it
        // in explicitly rather than losing it.
        let output = field_str(item, "aggregated_output");
        let detail = match output {
            Some(output) => strip_item_ids(output),
            None => strip_item_ids(&extract_text(item)),
        };
        let icon = field_str(item, "icon").map(String::from);
        return vec![RunnerEvent::Action { name, detail, item_type: Some(item_type), icon }];
    }

    if item_type == "assistant_response" {
        return vec![RunnerEvent::Response { text: strip_item_ids(&extract_text(item)) }];
    }

    if item_type == "assistant_message" || item_type == "agent_message" {
        let text = strip_item_ids(&extract_text(item));
        if envelope_type.ends_with(".completed") {
            return vec![RunnerEvent::Final { text }];
        }
        return vec![RunnerEvent::Response { text }];
    }

    // Unknown item kind: surface the raw content as a log rather than drop it.
    vec![RunnerEvent::Log { text: extract_text(item) }]
}

fn derive_error_message(type_field: &str, value: &Value) -> String {
    let item = value.get("item");
    let command = item
        .and_then(|i| field_str(i, "command"))
        .or_else(|| field_str(value, "command"));
    let exit_code = item
        .and_then(|i| i.get("exit_code"))
        .and_then(Value::as_i64)
        .or_else(|| value.get("exit_code").and_then(Value::as_i64));
    let output = item
        .and_then(|i| field_str(i, "aggregated_output"))
        .or_else(|| field_str(value, "aggregated_output"));
    let message = value.get("error").and_then(|e| {
        e.as_str().map(String::from).or_else(|| e.get("message").and_then(Value::as_str).map(String::from))
    });

    let mut parts = Vec::new();
    match (message, command) {
        (Some(m), _) => parts.push(m),
        (None, Some(cmd)) => parts.push(format!("command `{cmd}` failed")),
        (None, None) => parts.push(format!("runner reported {type_field}")),
    }
    if let Some(code) = exit_code {
        parts.push(format!("exit code {code}"));
    }
    if let Some(out) = output {
        parts.push(format!("output: {}", truncate_chars(out, 2000)));
    }
    parts.join("; ")
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push('\u{2026}');
    out
}

fn field_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Depth-limited visitor collecting every string-valued leaf, skipping the
/// structural [`IGNORED_KEYS`], deduped and joined in traversal order. Used
/// both for response/thought text and for rendering action parameters.
pub fn extract_text(value: &Value) -> String {
    let mut seen = HashSet::new();
    let mut pieces = Vec::new();
    visit(value, 0, &mut seen, &mut pieces);
    pieces.join("\n")
}

fn visit(value: &Value, depth: usize, seen: &mut HashSet<String>, out: &mut Vec<String>) {
    if depth > MAX_DEPTH {
        return;
    }
    match value {
        Value::String(s) => {
            let s = s.trim();
            if !s.is_empty() && seen.insert(s.to_string()) {
                out.push(s.to_string());
            }
        }
        Value::Array(items) => {
            for item in items {
                visit(item, depth + 1, seen, out);
            }
        }
        Value::Object(map) => {
            for (key, val) in map {
                if IGNORED_KEYS.contains(&key.as_str()) {
                    continue;
                }
                visit(val, depth + 1, seen, out);
            }
        }
        _ => {}
    }
}

/// Strip `item_\d+` identifier tokens embedded in assistant text.
pub fn strip_item_ids(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some((i, _)) = chars.peek().copied() {
        if text[i..].starts_with("item_") {
            let rest = &text[i + 5..];
            let digit_len = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digit_len > 0 {
                let skip = 5 + digit_len;
                for _ in 0..skip {
                    if chars.peek().is_some() {
                        chars.next();
                    } else {
                        break;
                    }
                    // chars iterates by char boundaries; ASCII-only token so byte == char here.
                }
                continue;
            }
        }
        if let Some((_, ch)) = chars.next() {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
