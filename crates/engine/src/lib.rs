// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ab-engine: repository routing, procedure selection/advancement, and
//! session-entry/activity management — the decision layer that sits
//! between the transport and the runner adapters.
//!
//! Nothing in this crate spawns a process or makes a network call; those
//! belong to the edge worker (`ab-daemon`), which applies the effects
//! this layer's pure decision functions produce.

pub mod error;
pub mod procedure_engine;
pub mod procedure_select;
pub mod router;
pub mod session_manager;
pub mod tracker;

#[cfg(any(test, feature = "test-support"))]
pub mod fake_tracker;

pub use error::EngineError;
pub use procedure_engine::{ProcedureDecision, ProcedureOutcome};
pub use procedure_select::ProcedureCatalog;
pub use router::{PendingSelection, RepositoryRouter, RouteDecision, RouterError};
pub use session_manager::{AgentSessionManager, IngestOutcome};
pub use tracker::IssueTrackerService;

#[cfg(any(test, feature = "test-support"))]
pub use fake_tracker::FakeTracker;
