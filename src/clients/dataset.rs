use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::clients::ClientRecord;

/// Loads a portfolio from a JSON array of client records.
pub fn load_portfolio(path: &Path) -> Result<Vec<ClientRecord>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading portfolio file: {}", path.display()))?;
    let records: Vec<ClientRecord> = serde_json::from_str(&data)
        .with_context(|| format!("failed parsing portfolio JSON: {}", path.display()))?;
    Ok(records)
}

/// Resolves a `--client` argument against the portfolio, by exact id first
/// and case-insensitive name second.
pub fn find_client<'a>(records: &'a [ClientRecord], selector: &str) -> Option<&'a ClientRecord> {
    let trimmed = selector.trim();
    if let Some(by_id) = records.iter().find(|r| r.id == trimmed) {
        return Some(by_id);
    }
    let lowered = trimmed.to_lowercase();
    records.iter().find(|r| r.nom.to_lowercase() == lowered)
}
