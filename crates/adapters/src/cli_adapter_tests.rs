// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ab_core::RunnerEvent;
use parking_lot::Mutex as PMutex;
use std::sync::Arc;
use std::time::Duration;

fn collector() -> (Arc<PMutex<Vec<RunnerEvent>>>, RunnerEventCallback) {
    let events = Arc::new(PMutex::new(Vec::new()));
    let sink = events.clone();
    let cb: RunnerEventCallback = Box::new(move |event| sink.lock().push(event));
    (events, cb)
}

#[test]
fn build_argv_prefers_json_over_experimental() {
    let caps = CapabilitySet::parse("--json --experimental-json");
    let config = RunnerSpawnConfig::new("coding-cli", "/tmp/ws", "do the thing");
    let argv = build_argv(&config, &caps, &|_| {});
    assert!(argv.contains(&"--json".to_string()));
    assert!(!argv.contains(&"--experimental-json".to_string()));
    assert_eq!(argv.last().unwrap(), "do the thing");
}

#[test]
fn build_argv_falls_back_to_experimental_json() {
    let caps = CapabilitySet::parse("--experimental-json");
    let config = RunnerSpawnConfig::new("coding-cli", "/tmp/ws", "prompt");
    let argv = build_argv(&config, &caps, &|_| {});
    assert!(argv.contains(&"--experimental-json".to_string()));
}

#[test]
fn build_argv_resume_variant() {
    let caps = CapabilitySet::default();
    let config = RunnerSpawnConfig::new("coding-cli", "/tmp/ws", "prompt")
        .resume_runner_session_id("S1");
    let argv = build_argv(&config, &caps, &|_| {});
    assert_eq!(argv[0], "exec");
    assert_eq!(argv[1], "resume");
    assert_eq!(argv[2], "S1");
}

#[test]
fn capability_fallback_logs_and_switches_to_full_auto() {
    // Help text lacks --sandbox but supports --full-auto.
    let caps = CapabilitySet::parse("--full-auto --json");
    let config =
        RunnerSpawnConfig::new("coding-cli", "/tmp/ws", "prompt").sandbox(Some(SandboxMode::WorkspaceWrite));

    let mut logged = Vec::new();
    let argv = build_argv(&config, &caps, &|event| {
        if let RunnerEvent::Log { text } = event {
            logged.push(text);
        }
    });

    assert!(argv.contains(&"--full-auto".to_string()));
    assert!(!argv.iter().any(|a| a.starts_with("--sandbox")));
    assert!(logged.iter().any(|l| l.contains("lacks --sandbox; enabling --full-auto")));
}

#[tokio::test]
async fn spawn_failure_surfaces_runner_spawn_failure() {
    let config = RunnerSpawnConfig::new("definitely-not-a-real-binary-xyz", "/tmp", "prompt");
    let adapter = CodingCliAdapter::new(config);
    let (_events, cb) = collector();
    let result = adapter.start(cb).await;
    assert!(matches!(result, Err(RunnerAdapterError::SpawnFailure(_))));
}

#[tokio::test]
async fn happy_path_echo_emits_final_and_no_error() {
    let payload = r#"{"type":"item.completed","item":{"type":"assistant_message","text":"done"}}"#;
    let mut config = RunnerSpawnConfig::new("/bin/sh", "/tmp", "unused");
    config.extra_args = vec!["-c".to_string(), format!("echo '{payload}'")];
    let adapter = CodingCliAdapter::new(config);
    let (events, cb) = collector();
    adapter.start(cb).await.unwrap();

    // Give the spawned IO task a moment to drain and observe process exit.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let snapshot = events.lock().clone();
    assert!(snapshot.iter().any(|e| matches!(e, RunnerEvent::Final { text } if text == "done")));
    assert!(!snapshot.iter().any(|e| matches!(e, RunnerEvent::Error { .. })));
}

#[tokio::test]
async fn exit_zero_without_final_is_reported_abandoned() {
    let mut config = RunnerSpawnConfig::new("/bin/sh", "/tmp", "unused");
    config.extra_args = vec!["-c".to_string(), "echo not-json-at-all".to_string()];
    let adapter = CodingCliAdapter::new(config);
    let (events, cb) = collector();
    adapter.start(cb).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let snapshot = events.lock().clone();
    assert!(snapshot.iter().any(
        |e| matches!(e, RunnerEvent::Error { error } if error.contains("exited without delivering a final response"))
    ));
}

#[tokio::test]
async fn stop_is_idempotent_under_concurrent_calls() {
    let mut config = RunnerSpawnConfig::new("/bin/sh", "/tmp", "unused");
    config.extra_args = vec!["-c".to_string(), "trap '' TERM; sleep 30".to_string()];
    let adapter = Arc::new(CodingCliAdapter::new(config));
    let (_events, cb) = collector();
    adapter.start(cb).await.unwrap();

    let a = adapter.clone();
    let b = adapter.clone();
    let (r1, r2) = tokio::join!(tokio::spawn(async move { a.stop().await }), tokio::spawn(async move { b.stop().await }));
    r1.unwrap();
    r2.unwrap();

    assert!(*adapter.state.exited_tx.subscribe().borrow());
}
