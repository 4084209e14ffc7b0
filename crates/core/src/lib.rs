// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ab-core: shared data model for the agent bridge orchestrator.
//!
//! Holds the plain types passed between the transport, routing,
//! procedure, and session-management layers: identifiers, repository
//! configuration, session/entry/procedure state, the runner event
//! contract, and the internal `Effect`/`OrchestratorEvent` pair the
//! edge worker uses to keep decision logic separate from I/O.

pub mod macros;

pub mod approval;
pub mod clock;
pub mod effect;
pub mod error;
pub mod event;
pub mod id;
pub mod issue;
pub mod procedure;
pub mod repository;
pub mod runner_event;
pub mod session;
pub mod timer;
pub mod workspace;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(any(test, feature = "test-support"))]
pub use test_support::AgentSessionBuilder;

pub use approval::{ApprovalId, ApprovalOutcome, PendingApproval};
pub use clock::{Clock, FakeClock, SystemClock};
pub use effect::Effect;
pub use error::ErrorKind;
pub use event::OrchestratorEvent;
pub use id::short;
pub use issue::IssueContext;
pub use procedure::{Procedure, Subroutine, ValidationAttempt, ValidationLoopState};
pub use repository::{RepositoryConfig, RepositorySet};
pub use runner_event::RunnerEvent;
pub use session::{
    AgentSession, EntryKind, EntryMetadata, Platform, SessionEntry, SessionId, SessionStatus,
    SessionType,
};
pub use timer::TimerId;
pub use workspace::{Workspace, WorkspaceId};
