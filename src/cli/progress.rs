//! CLI progress callback with styled output

use crate::cli::style::{arrow, check, cross, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use pr_import::import::{ImportProgress, ImportState};

/// Prints every state transition of a run
///
/// Prefixes lines with the PR being imported so batch output stays readable.
pub struct CliProgress {
    label: String,
}

impl CliProgress {
    /// Progress for the run importing `label` (e.g. `acme/widgets#42`)
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl ImportProgress for CliProgress {
    async fn on_state(&self, state: &ImportState) {
        match state {
            ImportState::Received => {
                println!("{} {}", arrow(), self.label.emphasis());
            }
            ImportState::Done => {
                println!("  {} {}", check(), "Done".success());
            }
            ImportState::Failed(reason) => {
                eprintln!(
                    "  {} {} {}",
                    cross(),
                    self.label.accent().for_stderr(),
                    reason.error()
                );
            }
            other => {
                println!("  {} {}", check(), other.to_string().muted());
            }
        }
    }
}
