//! Mock chat, issue tracker and version control for testing

#![allow(dead_code)]

use async_trait::async_trait;
use pr_import::chat::ChatService;
use pr_import::error::{Error, Result};
use pr_import::tracker::IssueTracker;
use pr_import::types::{CommitIdentity, TicketDraft};
use pr_import::vcs::{VersionControl, VersionControlWorkspace};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Call record for `send_message`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCall {
    pub user: String,
    pub text: String,
}

/// Mock chat platform
pub struct MockChat {
    identity: CommitIdentity,
    messages: Mutex<Vec<MessageCall>>,
    identity_calls: Mutex<Vec<String>>,
    error_on_send: Mutex<Option<String>>,
    error_on_identity: Mutex<Option<String>>,
}

impl Default for MockChat {
    fn default() -> Self {
        Self {
            identity: CommitIdentity {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
            },
            messages: Mutex::new(Vec::new()),
            identity_calls: Mutex::new(Vec::new()),
            error_on_send: Mutex::new(None),
            error_on_identity: Mutex::new(None),
        }
    }
}

impl MockChat {
    pub fn fail_send(&self, msg: &str) {
        *self.error_on_send.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_identity(&self, msg: &str) {
        *self.error_on_identity.lock().unwrap() = Some(msg.to_string());
    }

    /// Messages sent, including ones whose delivery failed
    pub fn get_messages(&self) -> Vec<MessageCall> {
        self.messages.lock().unwrap().clone()
    }

    pub fn get_texts(&self) -> Vec<String> {
        self.get_messages().into_iter().map(|m| m.text).collect()
    }

    pub fn identity(&self) -> CommitIdentity {
        self.identity.clone()
    }
}

#[async_trait]
impl ChatService for MockChat {
    async fn send_message(&self, user: &str, text: &str) -> Result<()> {
        self.messages.lock().unwrap().push(MessageCall {
            user: user.to_string(),
            text: text.to_string(),
        });
        if let Some(msg) = self.error_on_send.lock().unwrap().as_ref() {
            return Err(Error::Chat(msg.clone()));
        }
        Ok(())
    }

    async fn user_identity(&self, user: &str) -> Result<CommitIdentity> {
        self.identity_calls.lock().unwrap().push(user.to_string());
        if let Some(msg) = self.error_on_identity.lock().unwrap().as_ref() {
            return Err(Error::Chat(msg.clone()));
        }
        Ok(self.identity.clone())
    }
}

/// Mock issue tracker handing out a fixed key
pub struct MockTracker {
    key: String,
    create_calls: Mutex<Vec<TicketDraft>>,
    error_on_create: Mutex<Option<String>>,
}

impl MockTracker {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            create_calls: Mutex::new(Vec::new()),
            error_on_create: Mutex::new(None),
        }
    }

    pub fn fail_create(&self, msg: &str) {
        *self.error_on_create.lock().unwrap() = Some(msg.to_string());
    }

    pub fn get_create_calls(&self) -> Vec<TicketDraft> {
        self.create_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn create_ticket(&self, draft: &TicketDraft) -> Result<String> {
        self.create_calls.lock().unwrap().push(draft.clone());
        if let Some(msg) = self.error_on_create.lock().unwrap().as_ref() {
            return Err(Error::JiraApi(msg.clone()));
        }
        Ok(self.key.clone())
    }

    fn browse_url(&self, key: &str) -> String {
        format!("https://jira.example.com/browse/{key}")
    }
}

/// A recorded workspace operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitOp {
    Clone(String),
    ConfigureIdentity(CommitIdentity),
    AddRemote { name: String, url: String },
    Fetch { remote: String, branch: String },
    CreateBranch { name: String, start_point: String },
    SoftReset(String),
    Amend(String),
    HeadCommit,
    Push { url: String, branch: String },
}

impl GitOp {
    /// Short name used for failure injection
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Clone(_) => "clone",
            Self::ConfigureIdentity(_) => "config",
            Self::AddRemote { .. } => "remote",
            Self::Fetch { .. } => "fetch",
            Self::CreateBranch { .. } => "checkout",
            Self::SoftReset(_) => "reset",
            Self::Amend(_) => "commit",
            Self::HeadCommit => "rev-parse",
            Self::Push { .. } => "push",
        }
    }
}

#[derive(Default)]
struct VcsLog {
    ops: Mutex<Vec<GitOp>>,
    failure: Mutex<Option<(String, String)>>,
    created: AtomicUsize,
    dropped: AtomicUsize,
}

/// Mock version control recording every operation
///
/// Workspaces share one log, so operations stay visible after the
/// workspace itself is gone.
#[derive(Default)]
pub struct MockVcs {
    log: Arc<VcsLog>,
}

impl MockVcs {
    /// Make the operation of the given kind fail with `output`
    pub fn fail_on(&self, kind: &str, output: &str) {
        *self.log.failure.lock().unwrap() = Some((kind.to_string(), output.to_string()));
    }

    pub fn get_ops(&self) -> Vec<GitOp> {
        self.log.ops.lock().unwrap().clone()
    }

    pub fn workspaces_created(&self) -> usize {
        self.log.created.load(Ordering::SeqCst)
    }

    pub fn workspaces_dropped(&self) -> usize {
        self.log.dropped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionControl for MockVcs {
    async fn create_workspace(&self) -> Result<Box<dyn VersionControlWorkspace>> {
        let n = self.log.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockWorkspace {
            path: PathBuf::from(format!("/tmp/pr-import-mock-{n}")),
            log: Arc::clone(&self.log),
        }))
    }
}

struct MockWorkspace {
    path: PathBuf,
    log: Arc<VcsLog>,
}

impl MockWorkspace {
    fn record(&self, op: GitOp) -> Result<()> {
        let kind = op.kind();
        self.log.ops.lock().unwrap().push(op);

        match self.log.failure.lock().unwrap().as_ref() {
            Some((failing, output)) if failing == kind => Err(Error::GitCommand {
                command: format!("git {kind}"),
                status: "exit status: 1".to_string(),
                output: output.clone(),
            }),
            _ => Ok(()),
        }
    }
}

impl Drop for MockWorkspace {
    fn drop(&mut self) {
        self.log.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl VersionControlWorkspace for MockWorkspace {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn clone_repository(&self, url: &str) -> Result<()> {
        self.record(GitOp::Clone(url.to_string()))
    }

    async fn configure_identity(&self, identity: &CommitIdentity) -> Result<()> {
        self.record(GitOp::ConfigureIdentity(identity.clone()))
    }

    async fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.record(GitOp::AddRemote {
            name: name.to_string(),
            url: url.to_string(),
        })
    }

    async fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(GitOp::Fetch {
            remote: remote.to_string(),
            branch: branch.to_string(),
        })
    }

    async fn create_branch(&self, name: &str, start_point: &str) -> Result<()> {
        self.record(GitOp::CreateBranch {
            name: name.to_string(),
            start_point: start_point.to_string(),
        })
    }

    async fn soft_reset(&self, commit: &str) -> Result<()> {
        self.record(GitOp::SoftReset(commit.to_string()))
    }

    async fn amend_commit(&self, message: &str) -> Result<()> {
        self.record(GitOp::Amend(message.to_string()))
    }

    async fn head_commit(&self) -> Result<String> {
        self.record(GitOp::HeadCommit)?;
        Ok("0123456789abcdef0123456789abcdef01234567".to_string())
    }

    async fn push(&self, remote_url: &str, branch: &str) -> Result<()> {
        self.record(GitOp::Push {
            url: remote_url.to_string(),
            branch: branch.to_string(),
        })
    }
}
