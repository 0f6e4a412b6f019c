//! Offline analysis commands. None of these touch the embedding service.

use anyhow::Result;
use chrono::NaiveDate;
use std::path::Path;

use vowlog::analysis::{ContradictionDetector, InsightGenerator, NextStepPlanner};
use vowlog::config::VowlogConfig;
use vowlog::journal;
use vowlog::retrieval::flags;

fn today_or(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// `vowlog contradictions <file>`
pub fn contradictions(config: &VowlogConfig, path: &Path, as_of: Option<NaiveDate>) -> Result<()> {
    let entries = journal::load_entries(path)?;
    let found = ContradictionDetector::new(config.analysis.clone()).detect_as_of(&entries, today_or(as_of));
    super::print_json(&found)
}

/// `vowlog insights <file>`
pub fn insights(config: &VowlogConfig, path: &Path) -> Result<()> {
    let entries = journal::load_entries(path)?;
    let report = InsightGenerator::new(config.analysis.clone()).generate(&entries);
    super::print_json(&report)
}

/// `vowlog next-steps <file>`
pub fn next_steps(config: &VowlogConfig, path: &Path) -> Result<()> {
    let entries = journal::load_entries(path)?;
    let steps = NextStepPlanner::new(config.analysis.clone()).plan(&entries);
    super::print_json(&steps)
}

/// `vowlog flags <file>`: the lighter retrieval-time contradiction scan.
pub fn contradiction_flags(config: &VowlogConfig, path: &Path, as_of: Option<NaiveDate>) -> Result<()> {
    let entries = journal::load_entries(path)?;
    let found = flags::scan(&entries, &config.analysis, today_or(as_of));
    super::print_json(&found)
}
