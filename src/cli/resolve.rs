//! Resolve command - show where a repository imports to

use crate::cli::style::{Stylize, check};
use anstream::println;
use pr_import::error::{Error, Result};
use pr_import::mapping::MappingTable;
use std::path::{Path, PathBuf};

/// Environment variable naming the mapping table
const MAPPINGS_ENV: &str = "PR_IMPORT_MAPPINGS";

/// Run the resolve command
pub fn run_resolve(repository: &str, mappings: Option<&Path>) -> Result<()> {
    let path = match mappings {
        Some(path) => path.to_path_buf(),
        None => std::env::var(MAPPINGS_ENV)
            .map(PathBuf::from)
            .map_err(|_| Error::Config(format!("pass --mappings or set {MAPPINGS_ENV}")))?,
    };

    let table = MappingTable::load(&path)?;
    let mapping = table.resolve(repository)?;

    println!("{} {}", check(), repository.emphasis());
    println!("  Jira project:    {}", mapping.ticket_project.accent());
    println!(
        "  GitLab project:  {}",
        mapping.destination_project_id.to_string().accent()
    );
    println!("  Push endpoint:   {}", mapping.clone_endpoint.muted());
    Ok(())
}
