//! Authentication for the external services
//!
//! GitHub is reached either with a plain token or as an app installation;
//! Jira and destination pushes use basic authentication.

mod github;

pub use github::{
    DEFAULT_GITHUB_API_URL, GitHubAppCredentials, GitHubAuth, fetch_installation_token,
};

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

/// Build an HTTP `Authorization` header value for basic authentication
pub fn basic_auth_header(username: &str, password: &str) -> String {
    let encoded = BASE64.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header() {
        assert_eq!(
            basic_auth_header("Aladdin", "open sesame"),
            "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
        );
    }
}
