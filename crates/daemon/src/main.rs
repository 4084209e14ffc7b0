// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ab-daemon`: binds the webhook transport, restores any prior session
//! snapshot, and drives inbound events through the edge worker until the
//! process is asked to stop.

use std::path::PathBuf;
use std::sync::Arc;

use ab_core::RepositorySet;
use ab_daemon::cli_tracker::{CliTracker, CliTrackerFixture};
use ab_daemon::config::DaemonConfig;
use ab_daemon::edge_worker::EdgeWorker;
use ab_daemon::runner_factory::CliRunnerFactory;
use ab_daemon::workspace::LocalDirWorkspaceFactory;
use ab_engine::ProcedureCatalog;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ab-daemon", about = "Issue-tracker-to-coding-agent bridge daemon")]
struct Args {
    /// Path to the daemon's own TOML configuration.
    #[arg(short, long, default_value = "ab-daemon.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = DaemonConfig::load(&args.config)?;

    let repositories_text = std::fs::read_to_string(&config.repositories_path)?;
    let repositories = RepositorySet::from_toml(&repositories_text)?;

    let procedures_text = std::fs::read_to_string(&config.procedures_path)?;
    let procedures = ProcedureCatalog::from_toml(&procedures_text)?;

    let fixture = match &config.tracker_fixture_path {
        Some(path) => CliTrackerFixture::load(path)?,
        None => CliTrackerFixture::default(),
    };
    let tracker = Arc::new(CliTracker::new(fixture));

    let worker = EdgeWorker::new(
        tracker,
        repositories,
        procedures,
        Arc::new(LocalDirWorkspaceFactory),
        Arc::new(CliRunnerFactory),
        config.clone(),
    );
    worker.restore().await;
    worker.clone().spawn_background_tasks();

    let mut transport = ab_transport::serve(config.transport_config(), config.bind_addr).await?;
    tracing::info!(addr = %transport.local_addr, "ab-daemon listening");

    while let Some(event) = transport.events.recv().await {
        worker.clone().ingest_webhook(event.payload);
    }

    Ok(())
}
