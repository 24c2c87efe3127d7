//! Code hosting platforms
//!
//! The source platform hosts the pull request being imported; the
//! destination platform receives the merge request.

mod github;
mod gitlab;

pub use github::GitHubService;
pub use gitlab::GitLabService;

use crate::error::Result;
use crate::types::{
    GitCredentials, MergeRequestDraft, MergeRequestResult, PullRequestSnapshot, SourceRepository,
};
use async_trait::async_trait;

/// Source platform trait (pull request side)
#[async_trait]
pub trait SourcePlatform: Send + Sync {
    /// Read PR metadata and its full commit list (oldest first)
    async fn fetch_pull_request(&self, pr: &SourceRepository) -> Result<PullRequestSnapshot>;

    /// Post a comment on the pull request
    async fn create_comment(&self, pr: &SourceRepository, body: &str) -> Result<()>;

    /// Add a label to the pull request
    async fn add_label(&self, pr: &SourceRepository, label: &str) -> Result<()>;

    /// Credentials for HTTPS clones and fetches, if the host needs them
    fn clone_credentials(&self) -> Option<GitCredentials>;
}

/// Destination platform trait (merge request side)
#[async_trait]
pub trait DestinationPlatform: Send + Sync {
    /// Open a merge request
    async fn create_merge_request(&self, draft: &MergeRequestDraft) -> Result<MergeRequestResult>;
}
