use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::history::History;

/// Overwrites `path` with the whole history. Not an append log: each call
/// replaces the previous content.
pub fn write(path: &Path, history: &History) -> Result<()> {
    let json = serde_json::to_string_pretty(history).context("Failed to serialize history")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write conversation log '{}'", path.display()))?;
    debug!(
        path = %path.display(),
        exchange_count = history.len(),
        "wrote conversation log"
    );
    Ok(())
}

pub fn read(path: &Path) -> Result<History> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read conversation log '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse conversation log '{}'", path.display()))
}
