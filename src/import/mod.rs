//! Import pipeline
//!
//! Turns one import request into a ticket, a rewritten branch on the
//! destination and a merge request, then links the source PR back to the
//! ticket.

mod annotate;
mod branch;
mod context;
mod merge_request;
mod orchestrator;
mod progress;
mod ticket;

pub use annotate::{
    AnnotationFailurePolicy, SCHEDULED_LABEL, annotate, annotation_comment, issue_link,
};
pub use branch::{BranchImport, HEAD_REMOTE, branch_name_for, compose_commit_message, import_branch};
pub use context::{ImportContext, ImportSettings};
pub use merge_request::{MERGE_REQUEST_LABEL, merge_request_draft, publish};
pub use orchestrator::{ImportOutcome, ImportSummary, START_MESSAGE, run_import};
pub use progress::{ImportProgress, ImportState, NoopProgress, TracingProgress};
pub use ticket::{TICKET_ISSUE_TYPE, TICKET_ORIGIN, ensure_ticket, ticket_draft};
