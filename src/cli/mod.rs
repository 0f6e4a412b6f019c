pub mod report;
pub mod search;

use anyhow::{Context, Result};
use serde::Serialize;

/// Print a report as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    println!("{json}");
    Ok(())
}
