//! Collaborators of an import run

use crate::auth::DEFAULT_GITHUB_API_URL;
use crate::chat::{ChatService, SlackService};
use crate::config::ImporterConfig;
use crate::error::Result;
use crate::import::AnnotationFailurePolicy;
use crate::mapping::MappingTable;
use crate::platform::{DestinationPlatform, GitHubService, GitLabService, SourcePlatform};
use crate::tracker::{IssueTracker, JiraService};
use crate::types::GitCredentials;
use crate::vcs::{GitCli, VersionControl};
use std::sync::Arc;
use tracing::debug;

/// Run settings that are not services
#[derive(Debug, Clone)]
pub struct ImportSettings {
    /// Credentials embedded in the destination push URL
    pub push_credentials: GitCredentials,
    /// Base of the public issue link; the tracker's browse URL when unset
    pub public_issue_url: Option<String>,
    /// How loud a failed source annotation gets
    pub annotation_failures: AnnotationFailurePolicy,
}

/// Everything an import run talks to
///
/// Runs share nothing mutable; the mapping table is read-only.
#[derive(Clone)]
pub struct ImportContext {
    /// Chat with the requester
    pub chat: Arc<dyn ChatService>,
    /// Host of the pull request
    pub source: Arc<dyn SourcePlatform>,
    /// Host of the merge request
    pub destination: Arc<dyn DestinationPlatform>,
    /// Issue tracker
    pub tracker: Arc<dyn IssueTracker>,
    /// Working copies
    pub vcs: Arc<dyn VersionControl>,
    /// Importable repositories
    pub mappings: Arc<MappingTable>,
    /// Run settings
    pub settings: ImportSettings,
}

impl ImportContext {
    /// Build the production services from configuration
    ///
    /// GitHub App installation tokens are short-lived, so one is minted per
    /// context; build a context per run.
    pub async fn from_config(config: &ImporterConfig, mappings: Arc<MappingTable>) -> Result<Self> {
        let github_api = config
            .github_api_url
            .as_deref()
            .unwrap_or(DEFAULT_GITHUB_API_URL);
        let github_token = config.github_auth.token(github_api).await?;
        debug!(api = github_api, "resolved GitHub token");

        let source = GitHubService::new(&github_token, config.github_api_url.as_deref())?;
        let destination = GitLabService::new(
            config.gitlab_credentials.password.clone(),
            &config.gitlab_url,
        );
        let tracker = JiraService::new(
            &config.jira_host,
            config.jira_username.clone(),
            config.jira_password.clone(),
            config.jira_fields.clone(),
        );
        let chat = SlackService::new(config.slack_token.clone(), config.slack_api_url.clone());

        Ok(Self {
            chat: Arc::new(chat),
            source: Arc::new(source),
            destination: Arc::new(destination),
            tracker: Arc::new(tracker),
            vcs: Arc::new(GitCli::new(config.git_binary.clone())),
            mappings,
            settings: ImportSettings {
                push_credentials: config.gitlab_credentials.clone(),
                public_issue_url: config.public_issue_url.clone(),
                annotation_failures: config.annotation_failures,
            },
        })
    }
}
