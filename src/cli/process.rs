//! Process and import commands - run import requests

use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, cross};
use anstream::{eprintln, println};
use pr_import::config::ImporterConfig;
use pr_import::error::{Error, Result};
use pr_import::import::{ImportContext, ImportOutcome, run_import};
use pr_import::mapping::MappingTable;
use pr_import::types::ImportRequest;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Parse queued requests: one JSON array, or one JSON object per line
pub fn parse_requests(input: &str) -> Result<Vec<ImportRequest>> {
    let trimmed = input.trim();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|e| Error::Parse(format!("request on line {}: {e}", i + 1)))
        })
        .collect()
}

/// Run the process command, returning the number of failed runs
pub async fn run_process(input: Option<&Path>) -> Result<usize> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let requests = parse_requests(&raw)?;
    info!(count = requests.len(), "processing import requests");

    run_all(&requests).await
}

/// Run the import command for a single pull request link
pub async fn run_import_link(
    pr_url: &str,
    team: &str,
    requester: &str,
    ticket: Option<&str>,
) -> Result<usize> {
    let request = ImportRequest::from_pull_request_url(pr_url, team, requester, ticket)?;
    run_all(std::slice::from_ref(&request)).await
}

async fn run_all(requests: &[ImportRequest]) -> Result<usize> {
    let config = ImporterConfig::from_env()?;
    let mappings = Arc::new(MappingTable::load(&config.mappings_path)?);

    let mut failed = 0;
    for request in requests {
        let label = request.repository.to_string();

        // Installation tokens expire, so each run gets fresh services
        let ctx = match ImportContext::from_config(&config, Arc::clone(&mappings)).await {
            Ok(ctx) => ctx,
            Err(e) => {
                eprintln!("{} {}: {}", cross(), label.accent().for_stderr(), e.error());
                failed += 1;
                continue;
            }
        };

        let progress = CliProgress::new(label);
        match run_import(&ctx, request, &progress).await {
            ImportOutcome::Done(summary) => {
                println!("    {}", summary.merge_request.web_url.accent());
                println!("    {}", summary.ticket_url.muted());
            }
            ImportOutcome::Failed { .. } => failed += 1,
        }
    }

    if requests.len() > 1 {
        println!(
            "{} of {} imports succeeded",
            (requests.len() - failed).to_string().emphasis(),
            requests.len()
        );
    }
    Ok(failed)
}
