//! Source annotator
//!
//! Links the source pull request to its ticket with a comment and a label.
//! Annotation is best-effort: a failure never fails the run.

use crate::error::{Error, Result};
use crate::platform::SourcePlatform;
use crate::types::SourceRepository;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Label added to the source pull request once it is imported
pub const SCHEDULED_LABEL: &str = "Scheduled";

/// What happens when the source pull request cannot be annotated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationFailurePolicy {
    /// Log the failure and carry on
    #[default]
    Silent,
    /// Also warn the requester over chat
    Notify,
}

impl FromStr for AnnotationFailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" => Ok(Self::Silent),
            "notify" => Ok(Self::Notify),
            other => Err(Error::Config(format!(
                "unknown annotation failure policy '{other}', expected 'silent' or 'notify'"
            ))),
        }
    }
}

impl fmt::Display for AnnotationFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silent => write!(f, "silent"),
            Self::Notify => write!(f, "notify"),
        }
    }
}

/// Comment posted on the source pull request
pub fn annotation_comment(issue_link: &str) -> String {
    format!(
        "Hello,\n\n\
         thank you for creating this pull request.\n\
         I have opened an issue on our Issue Tracker for you. See the issue link: {issue_link}\n\n\
         Please use this issue to track the state of your pull request."
    )
}

/// Public link of a ticket, falling back to the tracker's own browse URL
pub fn issue_link(public_base: Option<&str>, ticket_key: &str, browse_url: &str) -> String {
    match public_base {
        Some(base) => format!("{}/{ticket_key}", base.trim_end_matches('/')),
        None => browse_url.to_string(),
    }
}

/// Post the comment, then the label
///
/// The label is attempted even when the comment fails. Returns the first
/// error; the caller decides how loud it gets.
pub async fn annotate(
    source: &dyn SourcePlatform,
    pr: &SourceRepository,
    issue_link: &str,
) -> Result<()> {
    let commented = source
        .create_comment(pr, &annotation_comment(issue_link))
        .await
        .inspect_err(|e| warn!(pr = %pr, error = %e, "failed to comment on pull request"));

    let labelled = source
        .add_label(pr, SCHEDULED_LABEL)
        .await
        .inspect_err(|e| warn!(pr = %pr, error = %e, "failed to label pull request"));

    commented.and(labelled)?;
    info!(pr = %pr, "annotated pull request");
    Ok(())
}
