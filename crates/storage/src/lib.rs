// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ab-storage: best-effort session snapshotting.
//!
//! There is no write-ahead log and no durability guarantee beyond
//! "survives a clean shutdown" — a crash mid-run loses whatever
//! happened since the last periodic snapshot, which the edge worker
//! schedules via `Effect::PersistSnapshot`.

pub mod error;
pub mod snapshot;

pub use error::StorageError;
pub use snapshot::{persist, reconcile_restored, restore, Snapshot};
