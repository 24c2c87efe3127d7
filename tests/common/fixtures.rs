//! Test data factories and a wired-up import context

#![allow(dead_code)]

use super::mock_platform::{MockDestination, MockSource};
use super::mock_services::{MockChat, MockTracker, MockVcs};
use pr_import::import::{AnnotationFailurePolicy, ImportContext, ImportSettings};
use pr_import::mapping::MappingTable;
use pr_import::types::{
    GitCredentials, ImportRequest, PrCommit, PullRequestSnapshot, RepositoryMapping,
    SourceRepository,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Create `count` commits, oldest first
pub fn make_commits(count: usize) -> Vec<PrCommit> {
    (1..=count)
        .map(|i| PrCommit {
            sha: format!("sha{i:03}"),
            message: format!("Commit number {i}"),
            author: "Octo Cat".to_string(),
        })
        .collect()
}

/// Snapshot of acme/widgets#42 with the given commits
pub fn make_snapshot(commits: Vec<PrCommit>) -> PullRequestSnapshot {
    PullRequestSnapshot {
        number: 42,
        title: "Fix widget alignment".to_string(),
        body: "Widgets were off by one pixel.".to_string(),
        base_ref: "main".to_string(),
        head_ref: "fix-alignment".to_string(),
        base_clone_url: "https://github.com/acme/widgets.git".to_string(),
        head_clone_url: "https://github.com/octocat/widgets.git".to_string(),
        commit_count: commits.len() as u64,
        commits,
        author_login: "octocat".to_string(),
        html_url: "https://github.com/acme/widgets/pull/42".to_string(),
    }
}

/// Mapping of acme/widgets
pub fn make_mapping() -> RepositoryMapping {
    RepositoryMapping {
        ticket_project: "WID".to_string(),
        destination_project_id: 7,
        clone_endpoint: "gitlab.example.com/acme/widgets.git".to_string(),
    }
}

/// Table knowing only acme/widgets
pub fn make_table() -> MappingTable {
    MappingTable::new(HashMap::from([("acme/widgets".to_string(), make_mapping())]))
}

/// Request for acme/widgets#42
pub fn make_request(ticket: Option<&str>) -> ImportRequest {
    make_request_for("acme", "widgets", ticket)
}

/// Request for `owner/repo#42`
pub fn make_request_for(owner: &str, repo: &str, ticket: Option<&str>) -> ImportRequest {
    ImportRequest {
        repository: SourceRepository {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number: 42,
        },
        requester: "U123".to_string(),
        team: "12610".to_string(),
        ticket: ticket.map(ToString::to_string),
    }
}

pub fn push_credentials() -> GitCredentials {
    GitCredentials {
        username: "import-bot".to_string(),
        password: "glpat-secret".to_string(),
    }
}

/// Every mock of a run, plus the context built from them
pub struct Harness {
    pub chat: Arc<MockChat>,
    pub source: Arc<MockSource>,
    pub destination: Arc<MockDestination>,
    pub tracker: Arc<MockTracker>,
    pub vcs: Arc<MockVcs>,
    pub policy: AnnotationFailurePolicy,
}

impl Harness {
    /// Harness serving a PR with `commit_count` commits; the tracker hands out WID-100
    pub fn new(commit_count: usize) -> Self {
        Self::with_snapshot(make_snapshot(make_commits(commit_count)))
    }

    pub fn with_snapshot(snapshot: PullRequestSnapshot) -> Self {
        Self::with_source(MockSource::new(snapshot))
    }

    pub fn with_source(source: MockSource) -> Self {
        Self {
            chat: Arc::new(MockChat::default()),
            source: Arc::new(source),
            destination: Arc::new(MockDestination::default()),
            tracker: Arc::new(MockTracker::new("WID-100")),
            vcs: Arc::new(MockVcs::default()),
            policy: AnnotationFailurePolicy::Silent,
        }
    }

    pub fn context(&self) -> ImportContext {
        ImportContext {
            chat: self.chat.clone(),
            source: self.source.clone(),
            destination: self.destination.clone(),
            tracker: self.tracker.clone(),
            vcs: self.vcs.clone(),
            mappings: Arc::new(make_table()),
            settings: ImportSettings {
                push_credentials: push_credentials(),
                public_issue_url: None,
                annotation_failures: self.policy,
            },
        }
    }
}
