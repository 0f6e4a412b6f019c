//! Next-step planning from the most recent entry.

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::journal::types::{Priority, Task};
use crate::journal::Entry;

/// Urgency of a suggested step. Orders `High < Medium < Low` so that sorting
/// ascending puts the most urgent steps first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPriority {
    High,
    Medium,
    Low,
}

/// One actionable suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextStep {
    pub priority: StepPriority,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub reason: String,
}

/// Derives a prioritized action list from the latest entry.
#[derive(Debug, Clone, Default)]
pub struct NextStepPlanner {
    config: AnalysisConfig,
}

impl NextStepPlanner {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Plan next steps.
    ///
    /// Only the last entry is treated as current state; earlier entries only
    /// decide whether the history is sparse enough to warrant a nudge.
    pub fn plan(&self, entries: &[Entry]) -> Vec<NextStep> {
        tracing::info!(entries = entries.len(), "generating next steps");

        let Some(latest) = entries.last() else {
            return Vec::new();
        };

        let mut steps: Vec<NextStep> = Vec::new();

        let mut pending: Vec<&Task> = latest
            .explicit_tasks()
            .iter()
            .filter(|t| t.is_pending())
            .collect();
        // Missing deadlines sort after every real date.
        pending.sort_by(|a, b| match (a.deadline.as_deref(), b.deadline.as_deref()) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        steps.extend(pending.into_iter().take(self.config.max_task_steps).map(|task| {
            let priority = if task.is_high_priority() {
                StepPriority::High
            } else {
                StepPriority::Medium
            };
            // Missing and unrecognized priorities both read as medium.
            let stated = match task.priority {
                Some(p) if p != Priority::Other => p.as_str(),
                _ => Priority::Medium.as_str(),
            };
            NextStep {
                priority,
                action: format!("Complete: {}", task.title()),
                deadline: task.deadline.clone(),
                reason: format!("This task is {stated}-priority"),
            }
        }));

        steps.extend(
            latest
                .vendors()
                .iter()
                .filter(|v| !v.is_booked())
                .take(self.config.max_vendor_steps)
                .map(|vendor| NextStep {
                    priority: StepPriority::High,
                    action: format!(
                        "Book vendor: {} ({})",
                        vendor.name.as_deref().unwrap_or("Unknown"),
                        vendor.category.as_deref().unwrap_or("unknown")
                    ),
                    deadline: None,
                    reason: "Vendors should be booked ASAP to secure availability".into(),
                }),
        );

        if entries.len() < self.config.sparse_history {
            steps.push(NextStep {
                priority: StepPriority::Medium,
                action: "Continue journaling regularly".into(),
                deadline: None,
                reason: "More entries help identify trends and provide better insights".into(),
            });
        }

        // Stable: equal priorities keep task, vendor, nudge order.
        steps.sort_by_key(|s| s.priority);

        tracing::info!(steps = steps.len(), "next steps generated");
        steps
    }
}
