//! Import orchestration
//!
//! Drives one request through the state machine:
//! Received → Notified → MappingResolved → TicketReady → BranchImported →
//! MergeRequestCreated → SourceAnnotated → Done, with `Failed` reachable
//! from every state before `Done`.

use crate::error::{Error, Result};
use crate::import::annotate::{annotate, issue_link};
use crate::import::branch::{BranchImport, import_branch};
use crate::import::merge_request::publish;
use crate::import::ticket::ensure_ticket;
use crate::import::{AnnotationFailurePolicy, ImportContext, ImportProgress, ImportState};
use crate::types::{ImportRequest, ImportedBranch, MergeRequestResult};
use tracing::{error, info, warn};

/// Message sent to the requester when a run starts
pub const START_MESSAGE: &str = "Importing your PR...";

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Ticket the merge request is linked to
    pub ticket_key: String,
    /// Tracker link of the ticket
    pub ticket_url: String,
    /// Branch pushed to the destination
    pub branch: ImportedBranch,
    /// Merge request opened on the destination
    pub merge_request: MergeRequestResult,
}

/// Final outcome of a run
#[derive(Debug)]
pub enum ImportOutcome {
    /// Every step succeeded
    Done(ImportSummary),
    /// The run stopped; `last_state` is the last state reached before failing
    Failed {
        /// Last state reached
        last_state: ImportState,
        /// Cause, already reported to the requester
        error: Error,
    },
}

impl ImportOutcome {
    /// Whether the run reached `Done`
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Tracks the current state and reports every transition
struct Run<'a> {
    progress: &'a dyn ImportProgress,
    state: ImportState,
}

impl Run<'_> {
    async fn enter(&mut self, state: ImportState) {
        self.progress.on_state(&state).await;
        self.state = state;
    }
}

/// Import one pull request
///
/// Never returns an error: failures are reported to the requester and
/// carried in [`ImportOutcome::Failed`]. Nothing created before a failure
/// is rolled back.
pub async fn run_import(
    ctx: &ImportContext,
    request: &ImportRequest,
    progress: &dyn ImportProgress,
) -> ImportOutcome {
    let mut run = Run {
        progress,
        state: ImportState::Received,
    };
    progress.on_state(&ImportState::Received).await;
    info!(pr = %request.repository, requester = %request.requester, "import received");

    match drive(ctx, request, &mut run).await {
        Ok(summary) => {
            let text = format!(
                "Created merge request: {}\nJira ticket: {}",
                summary.merge_request.web_url, summary.ticket_url
            );
            if let Err(e) = ctx.chat.send_message(&request.requester, &text).await {
                warn!(error = %e, "failed to report success to requester");
            }
            run.enter(ImportState::Done).await;
            info!(
                pr = %request.repository,
                ticket = %summary.ticket_key,
                merge_request = %summary.merge_request.web_url,
                "import done"
            );
            ImportOutcome::Done(summary)
        }
        Err(err) => {
            error!(pr = %request.repository, state = %run.state, error = %err, "import failed");
            progress.on_state(&ImportState::Failed(err.to_string())).await;
            if let Err(e) = ctx.chat.send_message(&request.requester, &err.to_string()).await {
                warn!(error = %e, "failed to report failure to requester");
            }
            ImportOutcome::Failed {
                last_state: run.state,
                error: err,
            }
        }
    }
}

async fn drive(
    ctx: &ImportContext,
    request: &ImportRequest,
    run: &mut Run<'_>,
) -> Result<ImportSummary> {
    let pr = &request.repository;

    if let Err(e) = ctx.chat.send_message(&request.requester, START_MESSAGE).await {
        warn!(error = %e, "failed to notify requester");
    }
    run.enter(ImportState::Notified).await;

    let mapping = ctx.mappings.resolve(&pr.full_name())?;
    run.enter(ImportState::MappingResolved).await;

    let snapshot = ctx
        .source
        .fetch_pull_request(pr)
        .await
        .map_err(|e| Error::PullRequestFetchFailed(e.to_string()))?;
    let identity = ctx
        .chat
        .user_identity(&request.requester)
        .await
        .map_err(|e| Error::UserLookupFailed(e.to_string()))?;

    let ticket_key = match &request.ticket {
        Some(key) => {
            info!(ticket = %key, "using supplied ticket");
            key.clone()
        }
        None => ensure_ticket(ctx.tracker.as_ref(), &snapshot, mapping, &request.team).await?,
    };
    run.enter(ImportState::TicketReady).await;

    let clone_credentials = ctx.source.clone_credentials();
    let branch = import_branch(
        ctx.vcs.as_ref(),
        &snapshot,
        mapping,
        &BranchImport {
            identity: &identity,
            ticket_key: &ticket_key,
            clone_credentials: clone_credentials.as_ref(),
            push_credentials: &ctx.settings.push_credentials,
        },
    )
    .await?;
    run.enter(ImportState::BranchImported).await;

    let merge_request = publish(
        ctx.destination.as_ref(),
        &snapshot,
        &branch,
        mapping,
        &ticket_key,
    )
    .await?;
    run.enter(ImportState::MergeRequestCreated).await;

    let ticket_url = ctx.tracker.browse_url(&ticket_key);
    let link = issue_link(ctx.settings.public_issue_url.as_deref(), &ticket_key, &ticket_url);
    if let Err(e) = annotate(ctx.source.as_ref(), pr, &link).await {
        if ctx.settings.annotation_failures == AnnotationFailurePolicy::Notify {
            let text = format!("Could not annotate the pull request {pr}: {e}");
            if let Err(e) = ctx.chat.send_message(&request.requester, &text).await {
                warn!(error = %e, "failed to report annotation failure");
            }
        }
    }
    run.enter(ImportState::SourceAnnotated).await;

    Ok(ImportSummary {
        ticket_key,
        ticket_url,
        branch,
        merge_request,
    })
}
