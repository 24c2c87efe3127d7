//! Branch importer
//!
//! Rebuilds the pull request as a single commit on a ticket-named branch
//! and pushes it to the destination repository.

use crate::error::{Error, Result};
use crate::types::{
    CommitIdentity, GitCredentials, ImportedBranch, PullRequestSnapshot, RepositoryMapping,
};
use crate::vcs::{
    VersionControl, VersionControlWorkspace, authenticated_url, credentialed_endpoint,
    redact_credentials,
};
use tracing::{debug, info};

/// Remote name of the pull request's head repository
pub const HEAD_REMOTE: &str = "github-pr-head";

/// Suffix of every imported branch name
const BRANCH_SUFFIX: &str = "auto-imported-from-github";

/// Branch name derived from a ticket key
pub fn branch_name_for(ticket_key: &str) -> String {
    format!("{}/{BRANCH_SUFFIX}", ticket_key.to_lowercase())
}

/// Message of the single imported commit
///
/// The key is prefixed unless the message already starts with it, and the
/// PR is always referenced on a trailing line.
pub fn compose_commit_message(first_message: &str, ticket_key: &str, pr_number: u64) -> String {
    if first_message.starts_with(ticket_key) {
        format!("{first_message}\nfixes #{pr_number}")
    } else {
        format!("{ticket_key} - {first_message}\nfixes #{pr_number}")
    }
}

/// Inputs of a branch import that are not part of the PR itself
pub struct BranchImport<'a> {
    /// Identity written to the rewritten commit
    pub identity: &'a CommitIdentity,
    /// Ticket key naming the branch
    pub ticket_key: &'a str,
    /// Credentials for cloning and fetching from the source host
    pub clone_credentials: Option<&'a GitCredentials>,
    /// Credentials for pushing to the destination
    pub push_credentials: &'a GitCredentials,
}

/// Clone, rewrite and push the pull request branch
///
/// The workspace is dropped, and its directory removed, on every return path.
pub async fn import_branch(
    vcs: &dyn VersionControl,
    pr: &PullRequestSnapshot,
    mapping: &RepositoryMapping,
    import: &BranchImport<'_>,
) -> Result<ImportedBranch> {
    let first_commit = pr
        .commits
        .first()
        .ok_or_else(|| Error::HistoryRewriteFailed("pull request has no commits".to_string()))?;

    let workspace = vcs
        .create_workspace()
        .await
        .map_err(|e| Error::CloneFailed(scrubbed(&e)))?;
    debug!(path = %workspace.path().display(), "importing branch");

    let branch = branch_name_for(import.ticket_key);
    let message = compose_commit_message(&first_commit.message, import.ticket_key, pr.number);
    let squash_to = (pr.commits.len() > 1).then_some(first_commit.sha.as_str());

    rewrite(workspace.as_ref(), pr, import, &branch, squash_to, &message).await?;

    let commit_sha = workspace
        .head_commit()
        .await
        .map_err(|e| Error::HistoryRewriteFailed(scrubbed(&e)))?;

    let push_url = credentialed_endpoint(&mapping.clone_endpoint, import.push_credentials);
    workspace
        .push(&push_url, &branch)
        .await
        .map_err(|e| Error::PushFailed {
            branch: branch.clone(),
            message: scrubbed(&e),
        })?;

    info!(branch = %branch, commit = %commit_sha, "pushed imported branch");
    Ok(ImportedBranch {
        name: branch,
        commit_sha,
    })
}

async fn rewrite(
    workspace: &dyn VersionControlWorkspace,
    pr: &PullRequestSnapshot,
    import: &BranchImport<'_>,
    branch: &str,
    squash_to: Option<&str>,
    message: &str,
) -> Result<()> {
    let base_url = source_url(&pr.base_clone_url, import.clone_credentials)
        .map_err(|e| Error::CloneFailed(scrubbed(&e)))?;
    workspace
        .clone_repository(&base_url)
        .await
        .map_err(|e| Error::CloneFailed(scrubbed(&e)))?;

    workspace
        .configure_identity(import.identity)
        .await
        .map_err(|e| Error::GitConfigFailed(scrubbed(&e)))?;

    let head_url = source_url(&pr.head_clone_url, import.clone_credentials)
        .map_err(|e| Error::RemoteFetchFailed(scrubbed(&e)))?;
    workspace
        .add_remote(HEAD_REMOTE, &head_url)
        .await
        .map_err(|e| Error::RemoteFetchFailed(scrubbed(&e)))?;
    workspace
        .fetch(HEAD_REMOTE, &pr.head_ref)
        .await
        .map_err(|e| Error::RemoteFetchFailed(scrubbed(&e)))?;

    let start_point = format!("{HEAD_REMOTE}/{}", pr.head_ref);
    workspace
        .create_branch(branch, &start_point)
        .await
        .map_err(|e| Error::CheckoutFailed(scrubbed(&e)))?;

    if let Some(commit) = squash_to {
        debug!(commit, count = pr.commits.len(), "squashing commits");
        workspace
            .soft_reset(commit)
            .await
            .map_err(|e| Error::HistoryRewriteFailed(scrubbed(&e)))?;
    }

    workspace
        .amend_commit(message)
        .await
        .map_err(|e| Error::HistoryRewriteFailed(scrubbed(&e)))?;

    debug!(branch, "rewrote history");
    Ok(())
}

/// Error text with any URL credentials masked
fn scrubbed(e: &Error) -> String {
    redact_credentials(&e.to_string())
}

fn source_url(url: &str, credentials: Option<&GitCredentials>) -> Result<String> {
    match credentials {
        Some(creds) => authenticated_url(url, creds),
        None => Ok(url.to_string()),
    }
}
