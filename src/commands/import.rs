use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use bugsift::db::Database;
use bugsift::models::{Bug, DecodeError};

/// Decode a batch of bug payloads.
///
/// Accepts a JSON array of bug objects, or one object per line with blank
/// lines skipped. The first payload that fails aborts the whole batch.
pub fn parse_payloads(bytes: &[u8]) -> Result<Vec<Bug>> {
    let text = std::str::from_utf8(bytes).map_err(DecodeError::from)?;

    if text.trim_start().starts_with('[') {
        let values: Vec<serde_json::Value> = serde_json::from_str(text)
            .map_err(|e| DecodeError::Deserialization(e.to_string()))?;
        return values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                Bug::from_value(value).with_context(|| format!("Invalid bug at index {}", i))
            })
            .collect();
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            Bug::from_json(line).with_context(|| format!("Invalid bug on line {}", i + 1))
        })
        .collect()
}

pub fn run(db: &mut Database, input_path: &Path) -> Result<()> {
    let bytes = fs::read(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;
    let bugs = parse_payloads(&bytes)
        .with_context(|| format!("Failed to import {}", input_path.display()))?;

    if bugs.is_empty() {
        println!("No bugs found in {}", input_path.display());
        return Ok(());
    }

    let ids = db.add_bugs(&bugs)?;
    println!("Imported {} bugs from {}", ids.len(), input_path.display());
    Ok(())
}
