//! Merge request publisher

use crate::error::{Error, Result};
use crate::platform::DestinationPlatform;
use crate::types::{
    ImportedBranch, MergeRequestDraft, MergeRequestResult, PullRequestSnapshot, RepositoryMapping,
};
use tracing::info;

/// Label marking merge requests that came from the source host
pub const MERGE_REQUEST_LABEL: &str = "github";

/// Merge request fields for an imported branch
pub fn merge_request_draft(
    pr: &PullRequestSnapshot,
    branch: &ImportedBranch,
    mapping: &RepositoryMapping,
    ticket_key: &str,
) -> MergeRequestDraft {
    MergeRequestDraft {
        project_id: mapping.destination_project_id,
        title: format!("{ticket_key} - {}", pr.title),
        description: pr.body.clone(),
        source_branch: branch.name.clone(),
        target_branch: pr.base_ref.clone(),
        labels: vec![MERGE_REQUEST_LABEL.to_string()],
        remove_source_branch: true,
        squash: false,
        allow_collaboration: true,
    }
}

/// Open the merge request; nothing created earlier is rolled back on failure
pub async fn publish(
    destination: &dyn DestinationPlatform,
    pr: &PullRequestSnapshot,
    branch: &ImportedBranch,
    mapping: &RepositoryMapping,
    ticket_key: &str,
) -> Result<MergeRequestResult> {
    let draft = merge_request_draft(pr, branch, mapping, ticket_key);
    let result = destination
        .create_merge_request(&draft)
        .await
        .map_err(|e| Error::MergeRequestCreationFailed(e.to_string()))?;

    info!(iid = result.iid, url = %result.web_url, "created merge request");
    Ok(result)
}
