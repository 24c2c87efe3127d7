//! Slack Web API implementation

use crate::chat::ChatService;
use crate::error::{Error, Result};
use crate::types::CommitIdentity;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Default Slack Web API base URL
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Default request timeout in seconds
///
/// A timed-out request fails the step like any other error; it is never retried.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Slack service using reqwest
pub struct SlackService {
    client: Client,
    token: String,
    api_base: String,
}

#[derive(Serialize)]
struct PostMessagePayload<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SlackResponse {
    ok: bool,
    error: Option<String>,
}

#[derive(Deserialize)]
struct UserInfoResponse {
    ok: bool,
    error: Option<String>,
    user: Option<SlackUser>,
}

#[derive(Deserialize)]
struct SlackUser {
    real_name: Option<String>,
    profile: SlackProfile,
}

#[derive(Deserialize)]
struct SlackProfile {
    real_name: Option<String>,
    email: Option<String>,
}

impl SlackService {
    /// Create a new Slack service
    pub fn new(token: String, api_base: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            api_base: api_base
                .unwrap_or_else(|| DEFAULT_SLACK_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{method}", self.api_base)
    }
}

fn slack_error(method: &str, error: Option<String>) -> Error {
    Error::Chat(format!(
        "{method} failed: {}",
        error.unwrap_or_else(|| "unknown error".to_string())
    ))
}

#[async_trait]
impl ChatService for SlackService {
    async fn send_message(&self, user: &str, text: &str) -> Result<()> {
        let response: SlackResponse = self
            .client
            .post(self.api_url("chat.postMessage"))
            .bearer_auth(&self.token)
            .json(&PostMessagePayload {
                channel: user,
                text,
            })
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Chat(e.to_string()))?
            .json()
            .await?;

        if !response.ok {
            return Err(slack_error("chat.postMessage", response.error));
        }

        Ok(())
    }

    async fn user_identity(&self, user: &str) -> Result<CommitIdentity> {
        let response: UserInfoResponse = self
            .client
            .get(self.api_url("users.info"))
            .bearer_auth(&self.token)
            .query(&[("user", user)])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Chat(e.to_string()))?
            .json()
            .await?;

        if !response.ok {
            return Err(slack_error("users.info", response.error));
        }

        let slack_user = response
            .user
            .ok_or_else(|| Error::Chat(format!("users.info returned no user for {user}")))?;

        let name = slack_user
            .profile
            .real_name
            .filter(|n| !n.is_empty())
            .or(slack_user.real_name)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::Chat(format!("user {user} has no real name")))?;

        let email = slack_user
            .profile
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| Error::Chat(format!("user {user} has no email address")))?;

        Ok(CommitIdentity { name, email })
    }
}
