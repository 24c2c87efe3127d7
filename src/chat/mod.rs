//! Chat platform used to talk to the requesting user
//!
//! The requester is addressed by an opaque identity; the same identity is
//! resolved to a name and email for commit authorship.

mod slack;

pub use slack::SlackService;

use crate::error::Result;
use crate::types::CommitIdentity;
use async_trait::async_trait;

/// Chat service trait
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send a plain-text message to a user
    async fn send_message(&self, user: &str, text: &str) -> Result<()>;

    /// Resolve a user to the display name and email used for commits
    async fn user_identity(&self, user: &str) -> Result<CommitIdentity>;
}
