//! Repository mapping table
//!
//! Maps a source repository (`owner/repo`) to its issue tracker project and
//! destination project. Loaded once at startup and only read afterwards.

use crate::error::{Error, Result};
use crate::types::RepositoryMapping;
use std::collections::HashMap;
use std::path::Path;

/// Read-only lookup table keyed by `owner/repo`
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: HashMap<String, RepositoryMapping>,
}

impl MappingTable {
    /// Create a table from explicit entries
    pub fn new(entries: HashMap<String, RepositoryMapping>) -> Self {
        Self { entries }
    }

    /// Parse a table from its JSON representation
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, RepositoryMapping> = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid repository mapping table: {e}")))?;
        Ok(Self { entries })
    }

    /// Load a table from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "cannot read repository mapping table {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }

    /// Look up the destination of `owner/repo`
    pub fn resolve(&self, full_name: &str) -> Result<&RepositoryMapping> {
        self.entries
            .get(full_name)
            .ok_or_else(|| Error::MappingNotFound(full_name.to_string()))
    }

    /// Number of mapped repositories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
