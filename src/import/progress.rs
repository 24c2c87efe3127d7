//! Import states and the progress callback
//!
//! Lets different front ends (worker logs, CLI output, tests) observe
//! each state transition of an import run.

use async_trait::async_trait;
use std::fmt;
use tracing::{info, warn};

/// State of an import run
///
/// Runs move strictly forward through the list; `Failed` is reachable from
/// every state before `Done` and ends the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportState {
    /// Request dequeued
    Received,
    /// Requester told the import started (or the attempt was logged)
    Notified,
    /// Destination mapping found
    MappingResolved,
    /// Ticket key known, supplied or created
    TicketReady,
    /// Rewritten branch pushed
    BranchImported,
    /// Merge request opened
    MergeRequestCreated,
    /// Comment and label posted on the source PR (best-effort)
    SourceAnnotated,
    /// Success reported to the requester
    Done,
    /// Run aborted with the given reason
    Failed(String),
}

impl fmt::Display for ImportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Received => write!(f, "Received"),
            Self::Notified => write!(f, "Notified"),
            Self::MappingResolved => write!(f, "Mapping resolved"),
            Self::TicketReady => write!(f, "Ticket ready"),
            Self::BranchImported => write!(f, "Branch imported"),
            Self::MergeRequestCreated => write!(f, "Merge request created"),
            Self::SourceAnnotated => write!(f, "Source annotated"),
            Self::Done => write!(f, "Done"),
            Self::Failed(reason) => write!(f, "Failed: {reason}"),
        }
    }
}

/// Progress callback trait
#[async_trait]
pub trait ImportProgress: Send + Sync {
    /// Called on every state transition, including the initial `Received`
    async fn on_state(&self, state: &ImportState);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ImportProgress for NoopProgress {
    async fn on_state(&self, _state: &ImportState) {}
}

/// Progress callback that writes transitions to the tracing log
pub struct TracingProgress;

#[async_trait]
impl ImportProgress for TracingProgress {
    async fn on_state(&self, state: &ImportState) {
        match state {
            ImportState::Failed(reason) => warn!(%reason, "import failed"),
            other => info!(state = %other, "import progressed"),
        }
    }
}
