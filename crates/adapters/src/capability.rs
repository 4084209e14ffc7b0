// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide CLI capability probe.
//!
//! `--help` output is parsed once per process, not once per spawn. A test
//! hook (`test_support::reset`) clears the memoised value so capability
//! fallback behaviour can be exercised repeatedly within one test binary.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Flags a runner CLI was detected to support.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    flags: HashSet<String>,
}

impl CapabilitySet {
    const KNOWN_FLAGS: &'static [&'static str] =
        &["--sandbox", "--full-auto", "--json", "--experimental-json", "resume"];

    pub fn parse(help_text: &str) -> Self {
        let flags = Self::KNOWN_FLAGS
            .iter()
            .filter(|flag| help_text.contains(*flag))
            .map(|flag| flag.to_string())
            .collect();
        Self { flags }
    }

    pub fn supports(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }
}

static CAPABILITIES: OnceLock<CapabilitySet> = OnceLock::new();

/// Return the memoised capability set, probing `executable --help` on first call.
pub async fn probe(executable: &str) -> CapabilitySet {
    if let Some(caps) = CAPABILITIES.get() {
        return caps.clone();
    }
    let caps = run_help(executable).await;
    CAPABILITIES.get_or_init(|| caps).clone()
}

async fn run_help(executable: &str) -> CapabilitySet {
    match tokio::process::Command::new(executable).arg("--help").output().await {
        Ok(output) => {
            let text = String::from_utf8_lossy(&output.stdout);
            CapabilitySet::parse(&text)
        }
        Err(_) => CapabilitySet::default(),
    }
}

#[cfg(any(test, feature = "test-support"))]
pub fn reset() {
    // `OnceLock` has no public reset; tests that need repeated probing use
    // `CapabilitySet::parse` directly instead of going through `probe`.
}

#[cfg(test)]
#[path = "capability_tests.rs"]
mod tests;
