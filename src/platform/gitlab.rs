//! GitLab platform service implementation

use crate::error::{Error, Result};
use crate::platform::DestinationPlatform;
use crate::types::{MergeRequestDraft, MergeRequestResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    api_base: String,
}

#[derive(Deserialize)]
struct MergeRequest {
    iid: u64,
    web_url: String,
}

#[derive(Serialize)]
struct CreateMrPayload<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    target_project_id: u64,
    title: &'a str,
    description: &'a str,
    labels: String,
    remove_source_branch: bool,
    squash: bool,
    allow_collaboration: bool,
}

/// Default request timeout in seconds
///
/// A timed-out request fails the step like any other error; it is never retried.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl GitLabService {
    /// Create a new GitLab service
    ///
    /// `base_url` is the instance root (e.g. `https://gitlab.example.com`);
    /// a trailing `/api/v4` is accepted too.
    pub fn new(token: String, base_url: &str) -> Self {
        let trimmed = base_url.trim_end_matches('/');
        let api_base = if trimmed.ends_with("/api/v4") {
            trimmed.to_string()
        } else {
            format!("{trimmed}/api/v4")
        };

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            api_base,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[async_trait]
impl DestinationPlatform for GitLabService {
    async fn create_merge_request(&self, draft: &MergeRequestDraft) -> Result<MergeRequestResult> {
        let url = self.api_url(&format!("/projects/{}/merge_requests", draft.project_id));

        let payload = CreateMrPayload {
            source_branch: &draft.source_branch,
            target_branch: &draft.target_branch,
            target_project_id: draft.project_id,
            title: &draft.title,
            description: &draft.description,
            labels: draft.labels.join(","),
            remove_source_branch: draft.remove_source_branch,
            squash: draft.squash,
            allow_collaboration: draft.allow_collaboration,
        };

        let response = self
            .client
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, body = %body, "GitLab merge request response");

        if !status.is_success() {
            return Err(Error::GitLabApi(format!("{status}: {body}")));
        }

        let mr: MergeRequest = serde_json::from_str(&body)?;

        Ok(MergeRequestResult {
            iid: mr.iid,
            web_url: mr.web_url,
        })
    }
}
