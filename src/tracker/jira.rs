//! Jira implementation (REST API v2, basic authentication)

use crate::auth::basic_auth_header;
use crate::error::{Error, Result};
use crate::tracker::IssueTracker;
use crate::types::TicketDraft;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;

/// Ids of the instance-specific custom fields set on imported tickets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraFieldIds {
    /// Free-text field holding the PR author login
    pub author: String,
    /// Free-text field holding the PR link
    pub pr_link: String,
    /// Option field classifying the ticket as public
    pub is_public: String,
    /// Option id selected in `is_public`
    pub is_public_option: String,
    /// Option field holding the team
    pub team: String,
}

impl Default for JiraFieldIds {
    fn default() -> Self {
        Self {
            author: "customfield_12101".to_string(),
            pr_link: "customfield_12100".to_string(),
            is_public: "customfield_10202".to_string(),
            is_public_option: "10110".to_string(),
            team: "customfield_12000".to_string(),
        }
    }
}

/// Jira service using reqwest
pub struct JiraService {
    client: Client,
    host: String,
    username: String,
    password: String,
    fields: JiraFieldIds,
}

#[derive(Deserialize)]
struct CreatedIssue {
    key: String,
}

/// Default request timeout in seconds
///
/// A timed-out request fails the step like any other error; it is never retried.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl JiraService {
    /// Create a new Jira service
    pub fn new(host: &str, username: String, password: String, fields: JiraFieldIds) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            username,
            password,
            fields,
        }
    }

    fn issue_payload(&self, draft: &TicketDraft) -> Value {
        let mut fields = Map::new();
        fields.insert("project".into(), json!({ "key": draft.project }));
        fields.insert("issuetype".into(), json!({ "name": draft.issue_type }));
        fields.insert("labels".into(), json!(draft.labels));
        fields.insert("summary".into(), json!(draft.summary));
        fields.insert("description".into(), json!(draft.description));
        fields.insert(self.fields.author.clone(), json!(draft.author));
        fields.insert(self.fields.pr_link.clone(), json!(draft.permalink));
        fields.insert(
            self.fields.is_public.clone(),
            json!({ "id": self.fields.is_public_option }),
        );
        fields.insert(self.fields.team.clone(), json!({ "id": draft.team }));

        json!({ "fields": fields })
    }
}

#[async_trait]
impl IssueTracker for JiraService {
    async fn create_ticket(&self, draft: &TicketDraft) -> Result<String> {
        let url = format!("{}/rest/api/2/issue", self.host);
        debug!(project = %draft.project, "creating Jira issue");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, basic_auth_header(&self.username, &self.password))
            .header(ACCEPT, "application/json")
            .json(&self.issue_payload(draft))
            .send()
            .await
            .map_err(|e| Error::JiraApi(format!("failed to call Jira: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(Error::JiraApi(format!("Jira responded with {status}: {body}")));
        }

        let issue: CreatedIssue = response
            .json()
            .await
            .map_err(|e| Error::JiraApi(format!("failed to parse Jira response: {e}")))?;

        Ok(issue.key)
    }

    fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{key}", self.host)
    }
}
