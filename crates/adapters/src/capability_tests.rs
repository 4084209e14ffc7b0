// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parse_detects_known_flags() {
    let caps = CapabilitySet::parse("usage: cli [--sandbox] [--json] [--experimental-json]");
    assert!(caps.supports("--sandbox"));
    assert!(caps.supports("--json"));
    assert!(caps.supports("--experimental-json"));
    assert!(!caps.supports("--full-auto"));
}

#[test]
fn parse_ignores_unknown_flags() {
    let caps = CapabilitySet::parse("usage: cli [--verbose]");
    assert!(!caps.supports("--verbose"));
    assert_eq!(caps, CapabilitySet::default());
}

#[tokio::test]
async fn probe_returns_default_for_missing_executable() {
    let caps = run_help("definitely-not-a-real-executable-xyz").await;
    assert_eq!(caps, CapabilitySet::default());
}
