//! Journal entry model and input loading.
//!
//! Entries are read-only inputs to every analysis component. They arrive as
//! JSON, either a bare array or the `{"entries": [...]}` request shape.

pub mod lenient;
pub mod types;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub use types::Entry;

#[derive(Deserialize)]
#[serde(untagged)]
enum EntriesDocument {
    List(Vec<serde_json::Value>),
    Wrapped { entries: Vec<serde_json::Value> },
}

/// Parse a JSON document holding journal entries.
///
/// Individual fields are parsed leniently, but an entry without an `id`, or a
/// document that is neither an array nor `{"entries": [...]}`, is an error.
pub fn parse_entries(json: &str) -> Result<Vec<Entry>> {
    let document: EntriesDocument = serde_json::from_str(json)
        .context("expected a JSON array of entries or an object with an `entries` array")?;
    let values = match document {
        EntriesDocument::List(values) => values,
        EntriesDocument::Wrapped { entries } => entries,
    };
    entries_from_values(values)
}

/// Convert raw JSON values (e.g. MCP tool arguments) into entries.
pub fn entries_from_values(values: Vec<serde_json::Value>) -> Result<Vec<Entry>> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            serde_json::from_value(value).with_context(|| format!("invalid entry at index {i}"))
        })
        .collect()
}

/// Read and parse an entries file.
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<Entry>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read entries file: {}", path.display()))?;
    let entries = parse_entries(&json)
        .with_context(|| format!("failed to parse entries file: {}", path.display()))?;
    tracing::info!(path = %path.display(), entries = entries.len(), "entries loaded");
    Ok(entries)
}
