//! Git CLI implementation of the workspace capability

use crate::error::{Error, Result};
use crate::types::CommitIdentity;
use crate::vcs::{VersionControl, VersionControlWorkspace, redact_credentials};
use async_trait::async_trait;
use std::path::Path;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

/// Prefix of the temporary working directories
const WORKSPACE_PREFIX: &str = "pr-import-";

/// Creates git workspaces in temporary directories
#[derive(Debug, Clone)]
pub struct GitCli {
    git_binary: String,
}

impl GitCli {
    /// Use the given git executable
    pub fn new(git_binary: impl Into<String>) -> Self {
        Self {
            git_binary: git_binary.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn create_workspace(&self) -> Result<Box<dyn VersionControlWorkspace>> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()?;
        debug!(path = %dir.path().display(), "created workspace");

        Ok(Box::new(GitWorkspace {
            dir,
            git_binary: self.git_binary.clone(),
        }))
    }
}

/// A git working copy inside a temporary directory
///
/// The directory is removed when the workspace is dropped.
pub struct GitWorkspace {
    dir: TempDir,
    git_binary: String,
}

impl GitWorkspace {
    /// Run git in the workspace, returning trimmed stdout
    async fn git(&self, args: &[&str]) -> Result<String> {
        let command = redact_credentials(&format!("git {}", args.join(" ")));
        debug!(command = %command, "running git");

        let output = Command::new(&self.git_binary)
            .args(args)
            .current_dir(self.dir.path())
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .await?;

        if !output.status.success() {
            let combined = format!(
                "{}{}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(Error::GitCommand {
                command,
                status: output.status.to_string(),
                output: redact_credentials(combined.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Drop for GitWorkspace {
    fn drop(&mut self) {
        debug!(path = %self.dir.path().display(), "removing workspace");
    }
}

#[async_trait]
impl VersionControlWorkspace for GitWorkspace {
    fn path(&self) -> &Path {
        self.dir.path()
    }

    async fn clone_repository(&self, url: &str) -> Result<()> {
        self.git(&["clone", url, "."]).await.map(drop)
    }

    async fn configure_identity(&self, identity: &CommitIdentity) -> Result<()> {
        self.git(&["config", "user.email", &identity.email]).await?;
        self.git(&["config", "user.name", &identity.name]).await?;
        Ok(())
    }

    async fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.git(&["remote", "add", name, url]).await.map(drop)
    }

    async fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        self.git(&["fetch", remote, branch]).await.map(drop)
    }

    async fn create_branch(&self, name: &str, start_point: &str) -> Result<()> {
        self.git(&["checkout", "-b", name, start_point]).await.map(drop)
    }

    async fn soft_reset(&self, commit: &str) -> Result<()> {
        self.git(&["reset", "--soft", commit]).await.map(drop)
    }

    async fn amend_commit(&self, message: &str) -> Result<()> {
        // Keeps the contributor as author; the configured identity becomes committer
        self.git(&["commit", "--amend", "-m", message]).await.map(drop)
    }

    async fn head_commit(&self) -> Result<String> {
        self.git(&["rev-parse", "HEAD"]).await
    }

    async fn push(&self, remote_url: &str, branch: &str) -> Result<()> {
        self.git(&["push", "-u", remote_url, branch]).await.map(drop)
    }
}
