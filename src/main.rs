//! pr-import - GitHub pull requests as GitLab merge requests
//!
//! CLI binary running import requests and inspecting the mapping table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "pr-import")]
#[command(about = "Import GitHub pull requests as GitLab merge requests linked to Jira tickets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run queued import requests (JSON lines or a JSON array)
    Process {
        /// File holding the requests (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Import a single pull request
    Import {
        /// Pull request link, e.g. https://github.com/acme/widgets/pull/42
        #[arg(long)]
        pr: String,

        /// Team identifier recorded on the ticket
        #[arg(long)]
        team: String,

        /// Slack user id of the requester
        #[arg(long)]
        requester: String,

        /// Existing Jira ticket to use instead of creating one
        #[arg(long)]
        ticket: Option<String>,
    },

    /// Show where a repository imports to
    Resolve {
        /// Repository as owner/repo
        repository: String,

        /// Mapping table (defaults to $PR_IMPORT_MAPPINGS)
        #[arg(long)]
        mappings: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let failed = match cli.command {
        Commands::Process { input } => cli::run_process(input.as_deref()).await?,
        Commands::Import {
            pr,
            team,
            requester,
            ticket,
        } => cli::run_import_link(&pr, &team, &requester, ticket.as_deref()).await?,
        Commands::Resolve {
            repository,
            mappings,
        } => {
            cli::run_resolve(&repository, mappings.as_deref())?;
            0
        }
    };

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
