//! GitHub authentication

use crate::error::{Error, Result};
use jsonwebtoken::EncodingKey;
use octocrab::Octocrab;
use octocrab::models::{AppId, InstallationToken};
use std::fmt;
use tracing::debug;

/// Public GitHub API
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub App installation credentials
#[derive(Clone)]
pub struct GitHubAppCredentials {
    /// App id
    pub app_id: u64,
    /// Installation id of the app on the source organization
    pub installation_id: u64,
    /// RSA private key of the app (PEM)
    pub private_key_pem: Vec<u8>,
}

impl fmt::Debug for GitHubAppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubAppCredentials")
            .field("app_id", &self.app_id)
            .field("installation_id", &self.installation_id)
            .finish_non_exhaustive()
    }
}

/// How to authenticate against GitHub
#[derive(Clone)]
pub enum GitHubAuth {
    /// Personal access token or pre-issued installation token
    Token(String),
    /// App installation; a fresh token is requested per run
    App(GitHubAppCredentials),
}

impl fmt::Debug for GitHubAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(***)"),
            Self::App(creds) => f.debug_tuple("App").field(creds).finish(),
        }
    }
}

impl GitHubAuth {
    /// Resolve to a token usable for both the API and HTTPS clones
    pub async fn token(&self, api_base: &str) -> Result<String> {
        match self {
            Self::Token(token) => Ok(token.clone()),
            Self::App(creds) => fetch_installation_token(api_base, creds).await,
        }
    }
}

/// Exchange app credentials for an installation access token
///
/// The app JWT is minted and signed by octocrab's app authentication.
pub async fn fetch_installation_token(
    api_base: &str,
    creds: &GitHubAppCredentials,
) -> Result<String> {
    let key = EncodingKey::from_rsa_pem(&creds.private_key_pem)
        .map_err(|e| Error::Auth(format!("invalid GitHub app private key: {e}")))?;

    let app = Octocrab::builder()
        .app(AppId(creds.app_id), key)
        .base_uri(api_base)
        .map_err(|e| Error::Auth(e.to_string()))?
        .build()
        .map_err(|e| Error::Auth(e.to_string()))?;

    debug!(installation_id = creds.installation_id, "requesting GitHub installation token");

    let route = format!("/app/installations/{}/access_tokens", creds.installation_id);
    let token: InstallationToken = app
        .post(route, None::<&()>)
        .await
        .map_err(|e| Error::Auth(format!("GitHub installation token request failed: {e}")))?;

    Ok(token.token)
}
