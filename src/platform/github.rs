//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::SourcePlatform;
use crate::types::{GitCredentials, PrCommit, PullRequestSnapshot, SourceRepository};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::models::repos::RepoCommit;
use tracing::debug;

/// Username GitHub expects alongside an installation token in clone URLs
const TOKEN_CLONE_USER: &str = "x-access-token";

/// Page size for the commit listing (GitHub maximum)
const COMMITS_PER_PAGE: u8 = 100;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    token: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_base` overrides `https://api.github.com` (GitHub Enterprise, tests).
    pub fn new(token: &str, api_base: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(base) = api_base {
            builder = builder
                .base_uri(base)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder.build().map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            token: token.to_string(),
        })
    }

    /// Every commit of the PR, oldest first
    async fn list_commits(&self, pr: &SourceRepository) -> Result<Vec<PrCommit>> {
        let first = self
            .client
            .pulls(&pr.owner, &pr.repo)
            .pr_commits(pr.number)
            .per_page(COMMITS_PER_PAGE)
            .send()
            .await?;
        let commits: Vec<RepoCommit> = self.client.all_pages(first).await?;

        Ok(commits
            .into_iter()
            .map(|c| PrCommit {
                sha: c.sha,
                author: c.commit.author.map(|a| a.name).unwrap_or_default(),
                message: c.commit.message,
            })
            .collect())
    }
}

#[async_trait]
impl SourcePlatform for GitHubService {
    async fn fetch_pull_request(&self, pr: &SourceRepository) -> Result<PullRequestSnapshot> {
        let raw = self
            .client
            .pulls(&pr.owner, &pr.repo)
            .get(pr.number)
            .await?;

        let base_clone_url = raw
            .base
            .repo
            .as_ref()
            .and_then(|r| r.clone_url.as_ref())
            .map(ToString::to_string)
            .ok_or_else(|| Error::GitHubApi(format!("{pr} has no base repository")))?;
        let head_clone_url = raw
            .head
            .repo
            .as_ref()
            .and_then(|r| r.clone_url.as_ref())
            .map(ToString::to_string)
            .ok_or_else(|| {
                Error::GitHubApi(format!("head repository of {pr} no longer exists"))
            })?;

        let commits = self.list_commits(pr).await?;
        debug!(pr = %pr, commits = commits.len(), "fetched pull request");

        Ok(PullRequestSnapshot {
            number: raw.number,
            title: raw.title.unwrap_or_default(),
            body: raw.body.unwrap_or_default(),
            base_ref: raw.base.ref_field.clone(),
            head_ref: raw.head.ref_field.clone(),
            base_clone_url,
            head_clone_url,
            commit_count: raw.commits.unwrap_or(commits.len() as u64),
            commits,
            author_login: raw.user.map(|u| u.login).unwrap_or_default(),
            html_url: raw
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        })
    }

    async fn create_comment(&self, pr: &SourceRepository, body: &str) -> Result<()> {
        self.client
            .issues(&pr.owner, &pr.repo)
            .create_comment(pr.number, body)
            .await?;
        Ok(())
    }

    async fn add_label(&self, pr: &SourceRepository, label: &str) -> Result<()> {
        self.client
            .issues(&pr.owner, &pr.repo)
            .add_labels(pr.number, &[label.to_string()])
            .await?;
        Ok(())
    }

    fn clone_credentials(&self) -> Option<GitCredentials> {
        Some(GitCredentials {
            username: TOKEN_CLONE_USER.to_string(),
            password: self.token.clone(),
        })
    }
}
