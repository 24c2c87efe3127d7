//! Error types for pr-import
//!
//! The first block of variants is the run-terminal taxonomy: each one ends an
//! import run and its text is relayed to the requester as-is. The rest are
//! transport errors raised by the service adapters, which the import pipeline
//! wraps into the taxonomy.

use thiserror::Error;

/// Errors produced by pr-import
#[derive(Debug, Error)]
pub enum Error {
    /// Source repository has no entry in the mapping table
    #[error("This repository {0} cannot be imported as it is unknown")]
    MappingNotFound(String),

    /// Pull request metadata or commit list could not be read
    #[error("Error while fetching PR: {0}")]
    PullRequestFetchFailed(String),

    /// Requester could not be resolved to a commit identity
    #[error("Error while fetching user: {0}")]
    UserLookupFailed(String),

    /// Issue tracker rejected or failed the ticket creation
    #[error("Error while creating Jira ticket: {0}")]
    TicketCreationFailed(String),

    /// Base repository clone failed
    #[error("Error while cloning repository: {0}")]
    CloneFailed(String),

    /// Commit identity could not be written to the working copy
    #[error("Error while setting git config: {0}")]
    GitConfigFailed(String),

    /// Head remote could not be added or fetched
    #[error("Error while fetching branch: {0}")]
    RemoteFetchFailed(String),

    /// Import branch could not be created
    #[error("Error while checking out branch: {0}")]
    CheckoutFailed(String),

    /// Soft reset or amend failed
    #[error("Error while rewriting history: {0}")]
    HistoryRewriteFailed(String),

    /// Push to the destination failed
    #[error("Error while pushing branch {branch}: {message}")]
    PushFailed {
        /// Branch that was being pushed
        branch: String,
        /// Underlying git error text
        message: String,
    },

    /// Merge request API call failed
    #[error("Error while creating merge request: {0}")]
    MergeRequestCreationFailed(String),

    /// A git subprocess exited unsuccessfully
    #[error("`{command}` failed ({status}): {output}")]
    GitCommand {
        /// Command line, credentials redacted
        command: String,
        /// Exit status description
        status: String,
        /// Combined stdout/stderr, credentials redacted
        output: String,
    },

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitLab API error
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// Jira API error
    #[error("Jira API error: {0}")]
    JiraApi(String),

    /// Chat platform error
    #[error("chat error: {0}")]
    Chat(String),

    /// Authentication error
    #[error("authentication error: {0}")]
    Auth(String),

    /// Missing or malformed configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Octocrab error
    #[error("GitHub API error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pr-import
pub type Result<T> = std::result::Result<T, Error>;
