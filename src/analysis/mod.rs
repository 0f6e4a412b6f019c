//! Longitudinal analysis over journal entries.
//!
//! Three independent, stateless components. Each takes the entries as a
//! read-only slice and recomputes every aggregate on every call:
//!
//! - [`contradictions::ContradictionDetector`]: budget, timeline, and vendor conflicts
//! - [`insights::InsightGenerator`]: sentiment, spending, task, and theme statistics
//! - [`next_steps::NextStepPlanner`]: prioritized actions from the latest entry

pub mod contradictions;
pub mod insights;
pub mod next_steps;

use serde::Serialize;

pub use contradictions::{Contradiction, ContradictionDetector, ContradictionKind};
pub use insights::{InsightGenerator, InsightReport};
pub use next_steps::{NextStep, NextStepPlanner, StepPriority};

/// How urgently a finding needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count occurrences, keeping keys in first-seen order.
///
/// Ties in later max/sort steps resolve to whichever key appeared first.
pub(crate) fn ordered_counts<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(key, _)| *key == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_counts_preserve_first_seen_order() {
        let counts = ordered_counts(["venue", "budget", "venue", "guests", "budget", "venue"]);
        assert_eq!(counts, vec![("venue", 3), ("budget", 2), ("guests", 1)]);
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        assert!(Severity::Critical > Severity::Medium);
    }
}
