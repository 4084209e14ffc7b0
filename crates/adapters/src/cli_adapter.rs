// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`CodingCliAdapter`]: the production runner adapter, wrapping a
//! coding-assistant CLI that speaks line-delimited JSON on stdout.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ab_core::RunnerEvent;
use async_trait::async_trait;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{oneshot, watch};
use tracing::{debug, info, warn};

use crate::capability::{self, CapabilitySet};
use crate::classify;
use crate::error::RunnerAdapterError;
use crate::runner::{RunnerAdapter, RunnerCapabilities, RunnerEventCallback};

/// Sandbox posture requested for a runner invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxMode {
    ReadOnly,
    WorkspaceWrite,
    FullAuto,
}

/// Everything needed to spawn (or resume) one runner subprocess turn.
#[derive(Debug, Clone)]
pub struct RunnerSpawnConfig {
    pub executable: String,
    pub cwd: PathBuf,
    pub prompt: String,
    pub model_override: Option<String>,
    pub sandbox: Option<SandboxMode>,
    /// Set to resume a prior runner-assigned session instead of starting fresh.
    pub resume_runner_session_id: Option<String>,
    pub extra_args: Vec<String>,
}

impl RunnerSpawnConfig {
    pub fn new(executable: impl Into<String>, cwd: impl Into<PathBuf>, prompt: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            cwd: cwd.into(),
            prompt: prompt.into(),
            model_override: None,
            sandbox: None,
            resume_runner_session_id: None,
            extra_args: Vec::new(),
        }
    }

    ab_core::setters! {
        option {
            model_override: String,
            resume_runner_session_id: String,
        }
        set {
            sandbox: Option<SandboxMode>,
        }
    }
}

const STOP_GRACE: Duration = Duration::from_secs(5);

struct AdapterState {
    child_pid: Mutex<Option<i32>>,
    stop_requested: AtomicBool,
    term_sent: AtomicBool,
    kill_sent: AtomicBool,
    exited_tx: watch::Sender<bool>,
}

/// Supervises one coding-CLI subprocess.
pub struct CodingCliAdapter {
    config: RunnerSpawnConfig,
    state: Arc<AdapterState>,
}

impl CodingCliAdapter {
    pub fn new(config: RunnerSpawnConfig) -> Self {
        let (exited_tx, _rx) = watch::channel(false);
        Self {
            config,
            state: Arc::new(AdapterState {
                child_pid: Mutex::new(None),
                stop_requested: AtomicBool::new(false),
                term_sent: AtomicBool::new(false),
                kill_sent: AtomicBool::new(false),
                exited_tx,
            }),
        }
    }
}

fn build_argv(config: &RunnerSpawnConfig, caps: &CapabilitySet, on_event: &dyn Fn(RunnerEvent)) -> Vec<String> {
    let mut argv = vec!["exec".to_string()];

    if let Some(resume_id) = &config.resume_runner_session_id {
        argv.push("resume".to_string());
        argv.push(resume_id.clone());
    }

    if caps.supports("--json") {
        argv.push("--json".to_string());
    } else if caps.supports("--experimental-json") {
        argv.push("--experimental-json".to_string());
    } else {
        on_event(RunnerEvent::Log {
            text: format!(
                "{} supports neither --json nor --experimental-json; parsing stdout best-effort",
                config.executable
            ),
        });
    }

    argv.push("--cd".to_string());
    argv.push(config.cwd.display().to_string());

    if let Some(model) = &config.model_override {
        argv.push("--model".to_string());
        argv.push(model.clone());
    }

    if let Some(sandbox) = config.sandbox {
        match sandbox {
            SandboxMode::ReadOnly => argv.push("--sandbox=read-only".to_string()),
            SandboxMode::WorkspaceWrite => {
                if caps.supports("--sandbox") {
                    argv.push("--sandbox=workspace-write".to_string());
                } else if caps.supports("--full-auto") {
                    on_event(RunnerEvent::Log {
                        text: format!("{} lacks --sandbox; enabling --full-auto", config.executable),
                    });
                    argv.push("--full-auto".to_string());
                } else {
                    on_event(RunnerEvent::Log {
                        text: format!(
                            "{} lacks --sandbox and --full-auto; running without a sandbox flag",
                            config.executable
                        ),
                    });
                }
            }
            SandboxMode::FullAuto => {
                if caps.supports("--full-auto") {
                    argv.push("--full-auto".to_string());
                } else {
                    on_event(RunnerEvent::Log {
                        text: format!("{} lacks --full-auto; running without a sandbox flag", config.executable),
                    });
                }
            }
        }
    }

    argv.extend(config.extra_args.iter().cloned());
    argv.push(config.prompt.clone());
    argv
}

#[async_trait]
impl RunnerAdapter for CodingCliAdapter {
    async fn start(&self, on_event: RunnerEventCallback) -> Result<RunnerCapabilities, RunnerAdapterError> {
        let on_event: Arc<RunnerEventCallback> = Arc::new(on_event);
        let caps = capability::probe(&self.config.executable).await;
        let argv = build_argv(&self.config, &caps, &|event| (on_event)(event));

        debug!(executable = %self.config.executable, argv = ?argv, "spawning runner");

        let mut command = tokio::process::Command::new(&self.config.executable);
        command
            .args(&argv)
            .current_dir(&self.config.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(RunnerAdapterError::SpawnFailure)?;
        let pid = child.id().map(|p| p as i32);
        *self.state.child_pid.lock() = pid;

        let stdout = child.stdout.take().ok_or_else(|| {
            RunnerAdapterError::SpawnFailure(std::io::Error::other("no stdout pipe"))
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            RunnerAdapterError::SpawnFailure(std::io::Error::other("no stderr pipe"))
        })?;

        let (first_tx, first_rx) = oneshot::channel();
        let state = self.state.clone();
        let sink = on_event.clone();
        let executable = self.config.executable.clone();

        tokio::spawn(async move {
            run_io_loop(child, stdout, stderr, state, sink, executable, first_tx).await;
        });

        let _ = first_rx.await;

        Ok(RunnerCapabilities {
            json_stream: caps.supports("--json") || caps.supports("--experimental-json"),
        })
    }

    async fn stop(&self) {
        self.state.stop_requested.store(true, Ordering::SeqCst);
        let mut rx = self.state.exited_tx.subscribe();
        if *rx.borrow() {
            return;
        }
        let pid = match *self.state.child_pid.lock() {
            Some(p) => p,
            None => return,
        };

        if self.state.term_sent.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_ok() {
            info!(pid, "sending SIGTERM to runner");
            let _ = signal::kill(Pid::from_raw(pid), Signal::SIGTERM);
        }

        let timed_out = tokio::time::timeout(STOP_GRACE, wait_for_exit(&mut rx)).await.is_err();

        if timed_out
            && !*rx.borrow()
            && self.state.kill_sent.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_ok()
        {
            warn!(pid, "runner ignored SIGTERM after {:?}; sending SIGKILL", STOP_GRACE);
            let _ = signal::kill(Pid::from_raw(pid), Signal::SIGKILL);
        }

        wait_for_exit(&mut rx).await;
    }
}

async fn wait_for_exit(rx: &mut watch::Receiver<bool>) {
    while !*rx.borrow() {
        if rx.changed().await.is_err() {
            break;
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_io_loop(
    mut child: tokio::process::Child,
    stdout: tokio::process::ChildStdout,
    stderr: tokio::process::ChildStderr,
    state: Arc<AdapterState>,
    sink: Arc<RunnerEventCallback>,
    executable: String,
    first_tx: oneshot::Sender<()>,
) {
    let mut first_tx = Some(first_tx);
    let mut final_sent = false;

    let stderr_sink = sink.clone();
    let stderr_task = tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            (stderr_sink)(RunnerEvent::Log { text: format!("stderr: {line}") });
        }
    });

    let mut lines = BufReader::new(stdout).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                for event in classify::classify(&line) {
                    if final_sent && !matches!(event, RunnerEvent::Log { .. } | RunnerEvent::Error { .. }) {
                        continue;
                    }
                    if matches!(event, RunnerEvent::Final { .. }) {
                        final_sent = true;
                    }
                    (sink)(event);
                    if let Some(tx) = first_tx.take() {
                        let _ = tx.send(());
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                (sink)(RunnerEvent::Log { text: format!("stdout read error: {e}") });
                break;
            }
        }
    }
    let _ = stderr_task.await;

    let status = child.wait().await;
    state.exited_tx.send_replace(true);
    if let Some(tx) = first_tx.take() {
        let _ = tx.send(());
    }

    let stop_requested = state.stop_requested.load(Ordering::SeqCst);
    match status {
        Ok(status) => {
            if final_sent {
                // no-op: the procedure already has its answer.
            } else if stop_requested {
                (sink)(RunnerEvent::Log { text: format!("{executable} exited after stop() (status: {status})") });
            } else if status.success() {
                (sink)(RunnerEvent::Error { error: "exited without delivering a final response".to_string() });
            } else {
                (sink)(RunnerEvent::Error {
                    error: format!("{executable} exited with status {status} before delivering a final response"),
                });
            }
        }
        Err(e) => {
            (sink)(RunnerEvent::Log { text: format!("failed to wait for runner exit: {e}") });
        }
    }
}

#[cfg(test)]
#[path = "cli_adapter_tests.rs"]
mod tests;
