//! Ticket issuer
//!
//! Creates the issue tracker ticket that the merge request is linked to.

use crate::error::{Error, Result};
use crate::tracker::IssueTracker;
use crate::types::{PullRequestSnapshot, RepositoryMapping, TicketDraft};
use tracing::info;

/// Origin marker used in the ticket label and summary
pub const TICKET_ORIGIN: &str = "Github";

/// Issue type of imported tickets
pub const TICKET_ISSUE_TYPE: &str = "Bug";

/// Build the ticket describing a pull request
pub fn ticket_draft(pr: &PullRequestSnapshot, mapping: &RepositoryMapping, team: &str) -> TicketDraft {
    TicketDraft {
        project: mapping.ticket_project.clone(),
        issue_type: TICKET_ISSUE_TYPE.to_string(),
        labels: vec![TICKET_ORIGIN.to_string()],
        summary: format!("[{TICKET_ORIGIN}] {}", pr.title),
        description: format!(
            "{}\n\n---\n\nImported from {TICKET_ORIGIN}. Please see: {}",
            pr.body, pr.html_url
        ),
        author: pr.author_login.clone(),
        permalink: pr.html_url.clone(),
        team: team.to_string(),
    }
}

/// Create the ticket and return its key
pub async fn ensure_ticket(
    tracker: &dyn IssueTracker,
    pr: &PullRequestSnapshot,
    mapping: &RepositoryMapping,
    team: &str,
) -> Result<String> {
    let draft = ticket_draft(pr, mapping, team);
    let key = tracker
        .create_ticket(&draft)
        .await
        .map_err(|e| Error::TicketCreationFailed(e.to_string()))?;

    info!(ticket = %key, project = %mapping.ticket_project, "created ticket");
    Ok(key)
}
