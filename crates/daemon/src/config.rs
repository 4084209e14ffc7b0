// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon-level configuration: everything the edge worker needs to wire
//! the transport, router, and runner adapter together. Loading MCP config
//! files, OAuth flows, and tunnel setup are out of scope here — this is
//! just the TOML this binary itself understands.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ab_transport::{TransportConfig, VerificationMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DaemonConfig {
    /// Address the webhook HTTP server binds.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// Which platform this deployment reports activities to.
    #[serde(default = "default_platform")]
    pub platform: String,

    pub verification: VerificationConfig,

    /// Path to the `[[repository]]` TOML document (§3 repository config).
    pub repositories_path: PathBuf,

    /// Path to the `[[procedure]]` TOML document (§4.4/§4.6).
    pub procedures_path: PathBuf,

    /// Where session/entry snapshots are written (§4.6 persistence).
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// How often a snapshot is taken.
    #[serde(default = "default_snapshot_interval_secs")]
    pub snapshot_interval_secs: u64,

    /// How often the terminal-session GC sweep runs.
    #[serde(default = "default_gc_interval_secs")]
    pub gc_interval_secs: u64,

    /// Default runner executable used when a repository doesn't override it.
    #[serde(default = "default_runner_executable")]
    pub default_runner_executable: String,

    /// Base URL used to build the approval-signal link posted to the
    /// tracker; the page itself is an out-of-scope external collaborator.
    #[serde(default = "default_approval_base_url")]
    pub approval_base_url: String,

    /// Seed fixture for the in-memory CLI tracker. Only meaningful when no
    /// real platform client is wired in; ignored otherwise.
    #[serde(default)]
    pub tracker_fixture_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case", deny_unknown_fields)]
pub enum VerificationConfig {
    Direct { secret: String },
    Proxy { token: String },
}

fn default_bind_addr() -> SocketAddr {
    "0.0.0.0:8787".parse().expect("valid default socket address")
}

fn default_platform() -> String {
    "linear".to_string()
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("ab-daemon-snapshot.json")
}

fn default_snapshot_interval_secs() -> u64 {
    60
}

fn default_gc_interval_secs() -> u64 {
    3600
}

fn default_runner_executable() -> String {
    "coding-cli".to_string()
}

fn default_approval_base_url() -> String {
    "https://approvals.invalid".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
}

impl DaemonConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })
    }

    pub fn transport_config(&self) -> TransportConfig {
        let mode = match &self.verification {
            VerificationConfig::Direct { secret } => {
                VerificationMode::Direct { secret: secret.clone(), header: "linear-signature" }
            }
            VerificationConfig::Proxy { token } => VerificationMode::Proxy { token: token.clone() },
        };
        TransportConfig { mode, platform: self.platform.clone() }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
