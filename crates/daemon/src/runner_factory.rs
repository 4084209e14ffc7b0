// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner-adapter factory: the seam between the edge worker and whichever
//! [`RunnerAdapter`] a turn should run against. [`CliRunnerFactory`] spawns
//! the real subprocess adapter; tests inject a factory that hands back a
//! scripted one instead, the same way [`crate::workspace::WorkspaceFactory`]
//! lets tests skip real directory creation.

use std::sync::Arc;

use ab_adapters::{CodingCliAdapter, RunnerAdapter, RunnerSpawnConfig};

pub trait RunnerFactory: Send + Sync {
    fn create(&self, config: RunnerSpawnConfig) -> Arc<dyn RunnerAdapter>;
}

pub struct CliRunnerFactory;

impl RunnerFactory for CliRunnerFactory {
    fn create(&self, config: RunnerSpawnConfig) -> Arc<dyn RunnerAdapter> {
        Arc::new(CodingCliAdapter::new(config))
    }
}

#[cfg(test)]
#[path = "runner_factory_tests.rs"]
mod tests;
