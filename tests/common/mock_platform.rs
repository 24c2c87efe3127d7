//! Mock source and destination platforms for testing

#![allow(dead_code)]

use async_trait::async_trait;
use pr_import::error::{Error, Result};
use pr_import::platform::{DestinationPlatform, SourcePlatform};
use pr_import::types::{
    GitCredentials, MergeRequestDraft, MergeRequestResult, PullRequestSnapshot, SourceRepository,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCall {
    pub pr: SourceRepository,
    pub body: String,
}

/// Call record for `add_label`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCall {
    pub pr: SourceRepository,
    pub label: String,
}

/// Mock pull request host
///
/// Serves one snapshot, records annotations, and fails on request.
pub struct MockSource {
    snapshot: Mutex<PullRequestSnapshot>,
    credentials: Option<GitCredentials>,
    fetch_calls: Mutex<Vec<SourceRepository>>,
    comment_calls: Mutex<Vec<CommentCall>>,
    label_calls: Mutex<Vec<LabelCall>>,
    error_on_fetch: Mutex<Option<String>>,
    error_on_comment: Mutex<Option<String>>,
    error_on_label: Mutex<Option<String>>,
}

impl MockSource {
    /// Serve `snapshot` for every pull request
    pub fn new(snapshot: PullRequestSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            credentials: None,
            fetch_calls: Mutex::new(Vec::new()),
            comment_calls: Mutex::new(Vec::new()),
            label_calls: Mutex::new(Vec::new()),
            error_on_fetch: Mutex::new(None),
            error_on_comment: Mutex::new(None),
            error_on_label: Mutex::new(None),
        }
    }

    /// Hand out clone credentials
    pub fn with_credentials(mut self, credentials: GitCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    // === Error injection methods ===

    pub fn fail_fetch(&self, msg: &str) {
        *self.error_on_fetch.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_comment(&self, msg: &str) {
        *self.error_on_comment.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_label(&self, msg: &str) {
        *self.error_on_label.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    pub fn get_fetch_calls(&self) -> Vec<SourceRepository> {
        self.fetch_calls.lock().unwrap().clone()
    }

    pub fn get_comment_calls(&self) -> Vec<CommentCall> {
        self.comment_calls.lock().unwrap().clone()
    }

    pub fn get_label_calls(&self) -> Vec<LabelCall> {
        self.label_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourcePlatform for MockSource {
    async fn fetch_pull_request(&self, pr: &SourceRepository) -> Result<PullRequestSnapshot> {
        self.fetch_calls.lock().unwrap().push(pr.clone());
        if let Some(msg) = self.error_on_fetch.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn create_comment(&self, pr: &SourceRepository, body: &str) -> Result<()> {
        self.comment_calls.lock().unwrap().push(CommentCall {
            pr: pr.clone(),
            body: body.to_string(),
        });
        if let Some(msg) = self.error_on_comment.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(())
    }

    async fn add_label(&self, pr: &SourceRepository, label: &str) -> Result<()> {
        self.label_calls.lock().unwrap().push(LabelCall {
            pr: pr.clone(),
            label: label.to_string(),
        });
        if let Some(msg) = self.error_on_label.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(())
    }

    fn clone_credentials(&self) -> Option<GitCredentials> {
        self.credentials.clone()
    }
}

/// Mock merge request host with auto-incrementing iids
pub struct MockDestination {
    next_iid: AtomicU64,
    create_calls: Mutex<Vec<MergeRequestDraft>>,
    error_on_create: Mutex<Option<String>>,
}

impl Default for MockDestination {
    fn default() -> Self {
        Self {
            next_iid: AtomicU64::new(1),
            create_calls: Mutex::new(Vec::new()),
            error_on_create: Mutex::new(None),
        }
    }
}

impl MockDestination {
    pub fn fail_create(&self, msg: &str) {
        *self.error_on_create.lock().unwrap() = Some(msg.to_string());
    }

    pub fn get_create_calls(&self) -> Vec<MergeRequestDraft> {
        self.create_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DestinationPlatform for MockDestination {
    async fn create_merge_request(&self, draft: &MergeRequestDraft) -> Result<MergeRequestResult> {
        self.create_calls.lock().unwrap().push(draft.clone());
        if let Some(msg) = self.error_on_create.lock().unwrap().as_ref() {
            return Err(Error::GitLabApi(msg.clone()));
        }

        let iid = self.next_iid.fetch_add(1, Ordering::SeqCst);
        Ok(MergeRequestResult {
            iid,
            web_url: format!(
                "https://gitlab.example.com/projects/{}/merge_requests/{iid}",
                draft.project_id
            ),
        })
    }
}
