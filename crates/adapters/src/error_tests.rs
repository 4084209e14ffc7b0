// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn abandoned_maps_to_runner_abandoned_kind() {
    assert_eq!(RunnerAdapterError::Abandoned.kind(), ErrorKind::RunnerAbandoned);
}

#[test]
fn reported_error_maps_to_runner_reported_error_kind() {
    let err = RunnerAdapterError::ReportedError("boom".into());
    assert_eq!(err.kind(), ErrorKind::RunnerReportedError);
}
