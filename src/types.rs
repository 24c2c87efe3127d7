//! Core types for pr-import

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::LazyLock;

static PULL_REQUEST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/([\w.-]+)/([\w.-]+)/pull/(\d+)/?$")
        .expect("hardcoded pull request pattern is valid")
});

/// A pull request on the source code host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRepository {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Pull request number
    #[serde(rename = "id", deserialize_with = "number_from_string_or_int")]
    pub number: u64,
}

impl SourceRepository {
    /// `owner/repo`, the key of the mapping table
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for SourceRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// A request to import one pull request, as delivered by the intake queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    /// The pull request to import
    pub repository: SourceRepository,
    /// Opaque chat identity of the requesting user
    #[serde(rename = "slack_user")]
    pub requester: String,
    /// Team identifier recorded on the ticket
    pub team: String,
    /// Pre-existing ticket key; skips ticket creation when present
    #[serde(
        rename = "jira_ticket",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub ticket: Option<String>,
}

impl ImportRequest {
    /// Build a request from a `https://github.com/<owner>/<repo>/pull/<n>` link
    pub fn from_pull_request_url(
        url: &str,
        team: &str,
        requester: &str,
        ticket: Option<&str>,
    ) -> Result<Self> {
        let captures = PULL_REQUEST_URL
            .captures(url.trim())
            .ok_or_else(|| Error::Parse(format!("invalid PR link: {url}")))?;

        let number = captures[3]
            .parse()
            .map_err(|e| Error::Parse(format!("invalid PR number in {url}: {e}")))?;

        Ok(Self {
            repository: SourceRepository {
                owner: captures[1].to_string(),
                repo: captures[2].to_string(),
                number,
            },
            requester: requester.to_string(),
            team: team.to_string(),
            ticket: ticket
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToString::to_string),
        })
    }
}

/// Destination of an importable repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMapping {
    /// Issue tracker project key (e.g. "WID")
    pub ticket_project: String,
    /// Numeric id of the destination project
    pub destination_project_id: u64,
    /// Clone endpoint of the destination, without scheme or credentials
    pub clone_endpoint: String,
}

/// A commit of the source pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrCommit {
    /// Commit SHA
    pub sha: String,
    /// Full commit message
    pub message: String,
    /// Author name as recorded in the commit
    pub author: String,
}

/// The source pull request, read once at the start of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSnapshot {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR body (empty when none)
    pub body: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// Clone URL of the base repository
    pub base_clone_url: String,
    /// Clone URL of the head repository
    pub head_clone_url: String,
    /// Commits, oldest first
    pub commits: Vec<PrCommit>,
    /// Login of the PR author
    pub author_login: String,
    /// Web URL of the PR
    pub html_url: String,
    /// Commit count reported by the host
    pub commit_count: u64,
}

/// Name and email used for the rewritten commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

/// Username/password pair embedded into HTTPS git URLs
#[derive(Clone, PartialEq, Eq)]
pub struct GitCredentials {
    /// Username
    pub username: String,
    /// Password or token
    pub password: String,
}

impl fmt::Debug for GitCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// The branch pushed to the destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedBranch {
    /// Branch name, identical locally and on the destination
    pub name: String,
    /// SHA of the single rewritten commit
    pub commit_sha: String,
}

/// Ticket fields, independent of the issue tracker's wire format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    /// Project key
    pub project: String,
    /// Issue type name
    pub issue_type: String,
    /// Labels
    pub labels: Vec<String>,
    /// Summary line
    pub summary: String,
    /// Description text
    pub description: String,
    /// Login of the PR author
    pub author: String,
    /// Web URL of the PR
    pub permalink: String,
    /// Team identifier
    pub team: String,
}

/// Merge request fields, independent of the destination's wire format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequestDraft {
    /// Destination project id
    pub project_id: u64,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Source branch
    pub source_branch: String,
    /// Target branch
    pub target_branch: String,
    /// Labels
    pub labels: Vec<String>,
    /// Delete source branch on merge
    pub remove_source_branch: bool,
    /// Squash on merge
    pub squash: bool,
    /// Allow pushes from users who can merge the target branch
    pub allow_collaboration: bool,
}

/// A created merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequestResult {
    /// Project-scoped merge request number
    pub iid: u64,
    /// Web URL
    pub web_url: String,
}

fn number_from_string_or_int<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
