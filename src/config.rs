//! Process-wide configuration
//!
//! Read once from the environment at startup. `from_lookup` takes any
//! key lookup so tests never touch the real process environment.

use crate::auth::{GitHubAppCredentials, GitHubAuth};
use crate::error::{Error, Result};
use crate::import::AnnotationFailurePolicy;
use crate::tracker::JiraFieldIds;
use crate::types::GitCredentials;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use std::env;
use std::path::PathBuf;

/// Importer configuration
#[derive(Clone)]
pub struct ImporterConfig {
    /// Slack bot token
    pub slack_token: String,
    /// Slack Web API base URL override
    pub slack_api_url: Option<String>,
    /// GitHub authentication
    pub github_auth: GitHubAuth,
    /// GitHub API base URL override
    pub github_api_url: Option<String>,
    /// GitLab instance URL
    pub gitlab_url: String,
    /// GitLab username and password/token; the password doubles as API token
    pub gitlab_credentials: GitCredentials,
    /// Jira instance URL
    pub jira_host: String,
    /// Jira username
    pub jira_username: String,
    /// Jira password or API token
    pub jira_password: String,
    /// Jira custom field ids
    pub jira_fields: JiraFieldIds,
    /// Path of the repository mapping table
    pub mappings_path: PathBuf,
    /// Base of the public issue link posted on the source PR
    pub public_issue_url: Option<String>,
    /// What to do when annotating the source PR fails
    pub annotation_failures: AnnotationFailurePolicy,
    /// Git executable
    pub git_binary: String,
}

impl ImporterConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| Error::Config(format!("{key} is not set")))
        };

        let defaults = JiraFieldIds::default();
        let jira_fields = JiraFieldIds {
            author: get("JIRA_FIELD_AUTHOR").unwrap_or(defaults.author),
            pr_link: get("JIRA_FIELD_PR_LINK").unwrap_or(defaults.pr_link),
            is_public: get("JIRA_FIELD_PUBLIC").unwrap_or(defaults.is_public),
            is_public_option: get("JIRA_PUBLIC_OPTION").unwrap_or(defaults.is_public_option),
            team: get("JIRA_FIELD_TEAM").unwrap_or(defaults.team),
        };

        let annotation_failures = get("PR_IMPORT_ANNOTATION_FAILURES")
            .map(|v| v.parse::<AnnotationFailurePolicy>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            slack_token: required("SLACK_BOT_TOKEN")?,
            slack_api_url: get("SLACK_API_URL"),
            github_auth: github_auth(&get)?,
            github_api_url: get("GITHUB_API_URL"),
            gitlab_url: required("GITLAB_URL")?,
            gitlab_credentials: GitCredentials {
                username: required("GITLAB_USERNAME")?,
                password: required("GITLAB_PASSWORD")?,
            },
            jira_host: required("JIRA_HOST")?,
            jira_username: required("JIRA_USERNAME")?,
            jira_password: required("JIRA_PASSWORD")?,
            jira_fields,
            mappings_path: PathBuf::from(required("PR_IMPORT_MAPPINGS")?),
            public_issue_url: get("PR_IMPORT_PUBLIC_ISSUE_URL"),
            annotation_failures,
            git_binary: get("GIT_BINARY").unwrap_or_else(|| "git".to_string()),
        })
    }
}

/// `GITHUB_TOKEN` wins; otherwise the app triple is required
fn github_auth<F>(get: &F) -> Result<GitHubAuth>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = get("GITHUB_TOKEN") {
        return Ok(GitHubAuth::Token(token));
    }

    let (Some(app_id), Some(installation_id), Some(pem)) = (
        get("GITHUB_APP_ID"),
        get("GITHUB_INSTALLATION_ID"),
        get("GITHUB_APP_PEM"),
    ) else {
        return Err(Error::Config(
            "set GITHUB_TOKEN or GITHUB_APP_ID, GITHUB_INSTALLATION_ID and GITHUB_APP_PEM"
                .to_string(),
        ));
    };

    let app_id = app_id
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("GITHUB_APP_ID is not a number: {e}")))?;
    let installation_id = installation_id
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("GITHUB_INSTALLATION_ID is not a number: {e}")))?;
    let private_key_pem = BASE64
        .decode(pem.trim())
        .map_err(|e| Error::Config(format!("GITHUB_APP_PEM is not valid base64: {e}")))?;

    Ok(GitHubAuth::App(GitHubAppCredentials {
        app_id,
        installation_id,
        private_key_pem,
    }))
}
