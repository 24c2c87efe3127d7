//! pr-import - GitHub pull requests as GitLab merge requests
//!
//! Imports a contributor's pull request into the internal repository:
//! creates (or reuses) a Jira ticket, squashes the PR into one commit on a
//! ticket-named branch, pushes it to GitLab, opens a merge request and links
//! the source PR back to the ticket. The requester is kept informed over
//! Slack.
//!
//! The pipeline lives in [`import`]; every external system sits behind a
//! trait so runs can be assembled from test doubles.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod import;
pub mod mapping;
pub mod platform;
pub mod tracker;
pub mod types;
pub mod vcs;

pub use error::{Error, Result};
