//! Issue tracker integration

mod jira;

pub use jira::{JiraFieldIds, JiraService};

use crate::error::Result;
use crate::types::TicketDraft;
use async_trait::async_trait;

/// Issue tracker trait
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Create a ticket and return its key
    async fn create_ticket(&self, draft: &TicketDraft) -> Result<String>;

    /// Human-facing link to a ticket
    fn browse_url(&self, key: &str) -> String;
}
