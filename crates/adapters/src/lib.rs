// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ab-adapters: the runner adapter (C1).
//!
//! Wraps one spawned agent subprocess, parses its line-delimited JSON
//! stdout protocol, and delivers a normalised [`ab_core::RunnerEvent`]
//! stream to the caller. [`classify`] holds the vendor-specific
//! classification rules in isolation so new runner vendors are a matter of
//! adding cases there, not touching the supervision logic in
//! [`CodingCliAdapter`].

pub mod capability;
pub mod classify;
pub mod cli_adapter;
pub mod error;
pub mod runner;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use capability::CapabilitySet;
pub use classify::classify;
pub use cli_adapter::{CodingCliAdapter, RunnerSpawnConfig, SandboxMode};
pub use error::RunnerAdapterError;
pub use runner::{RunnerAdapter, RunnerCapabilities, RunnerEventCallback, RunnerHandle};

#[cfg(any(test, feature = "test-support"))]
pub use test_support::ScriptedAdapter;
