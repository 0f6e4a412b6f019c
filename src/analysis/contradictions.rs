//! Contradiction detection across journal entries.
//!
//! Three scans run over the entries in the order supplied (never re-sorted),
//! and their findings are emitted in that order: budget, then timeline, then
//! vendor. Each scan is a fold over the entries with its own accumulator, so no
//! state outlives a single call.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use super::Severity;
use crate::config::AnalysisConfig;
use crate::journal::types::VendorStatus;
use crate::journal::Entry;

/// Category of a detected contradiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionKind {
    BudgetOverrun,
    BudgetConcern,
    TimelinePressure,
    TaskOverload,
    VendorConflict,
}

impl ContradictionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetOverrun => "budget_overrun",
            Self::BudgetConcern => "budget_concern",
            Self::TimelinePressure => "timeline_pressure",
            Self::TaskOverload => "task_overload",
            Self::VendorConflict => "vendor_conflict",
        }
    }
}

impl std::fmt::Display for ContradictionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected inconsistency across entries.
#[derive(Debug, Clone, Serialize)]
pub struct Contradiction {
    #[serde(rename = "type")]
    pub kind: ContradictionKind,
    pub severity: Severity,
    pub description: String,
    #[serde(flatten)]
    pub detail: ContradictionDetail,
    /// IDs of the entries that contributed to this finding.
    pub entries: Vec<String>,
}

/// Type-specific fields, flattened into the contradiction when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContradictionDetail {
    Budget {
        budget: f64,
        spent: f64,
    },
    Timeline {
        pending_tasks: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        days_remaining: Option<i64>,
    },
    VendorConflicts {
        conflicts: Vec<VendorConflict>,
    },
    Vendor {
        vendor: String,
    },
}

/// The same vendor recorded as booked in two different entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorConflict {
    pub vendor: String,
    /// `[first_booking_entry, later_booking_entry]`.
    pub entries: [String; 2],
    pub status_1: VendorStatus,
    pub status_2: VendorStatus,
}

// ── Scan accumulators ─────────────────────────────────────────────────────────

#[derive(Default)]
struct BudgetScan {
    total_budget: Option<f64>,
    spending: f64,
    entry_ids: Vec<String>,
}

impl BudgetScan {
    fn absorb(mut self, entry: &Entry) -> Self {
        for cost in entry.costs() {
            if cost.category().to_lowercase().contains("budget") {
                // Last budget mention wins; a budget without an amount is ignored.
                if cost.amount.is_some() {
                    self.total_budget = cost.amount;
                }
            } else {
                self.spending += cost.amount();
                push_unique(&mut self.entry_ids, &entry.id);
            }
        }
        self
    }

    fn finish(self, config: &AnalysisConfig) -> Option<Contradiction> {
        let budget = self.total_budget.filter(|b| *b > 0.0)?;
        let spent = self.spending;
        let over = spent - budget;

        let (kind, severity, description) = if spent > budget * config.overrun_ratio {
            (
                ContradictionKind::BudgetOverrun,
                Severity::High,
                format!(
                    "Budget overrun: Spent ${spent:.2} of ${budget:.2} (${over:.2} over by {:.1}%)",
                    (spent / budget - 1.0) * 100.0
                ),
            )
        } else if spent > budget {
            (
                ContradictionKind::BudgetConcern,
                Severity::Medium,
                format!("Budget concern: Spent ${spent:.2} of ${budget:.2} (${over:.2} over)"),
            )
        } else {
            return None;
        };

        Some(Contradiction {
            kind,
            severity,
            description,
            detail: ContradictionDetail::Budget { budget, spent },
            entries: self.entry_ids,
        })
    }
}

#[derive(Default)]
struct TimelineScan {
    pending_tasks: usize,
    entry_ids: Vec<String>,
    wedding_date: Option<NaiveDate>,
}

impl TimelineScan {
    fn absorb(mut self, entry: &Entry) -> Self {
        let pending = entry.explicit_tasks().iter().filter(|t| t.is_pending()).count();
        if pending > 0 {
            self.pending_tasks += pending;
            push_unique(&mut self.entry_ids, &entry.id);
        }

        for mention in entry.dates() {
            if !mention.event().to_lowercase().contains("wedding") {
                continue;
            }
            if let Some(date) = mention.parsed() {
                self.wedding_date = Some(date);
            }
        }
        self
    }

    fn finish(self, config: &AnalysisConfig, today: NaiveDate) -> Option<Contradiction> {
        let pending = self.pending_tasks;
        let days_remaining = self.wedding_date.map(|d| (d - today).num_days());

        let pressing = days_remaining.filter(|days| *days < config.timeline_window_days);

        if let (true, Some(days)) = (pending > config.timeline_min_pending, pressing) {
            return Some(Contradiction {
                kind: ContradictionKind::TimelinePressure,
                severity: Severity::High,
                description: format!(
                    "Timeline pressure: {pending} tasks pending with only {days} days to wedding"
                ),
                detail: ContradictionDetail::Timeline {
                    pending_tasks: pending,
                    days_remaining: Some(days),
                },
                entries: self.entry_ids,
            });
        }

        if pending > config.overload_min_pending {
            return Some(Contradiction {
                kind: ContradictionKind::TaskOverload,
                severity: Severity::Medium,
                description: format!("High task load: {pending} pending tasks to manage"),
                detail: ContradictionDetail::Timeline {
                    pending_tasks: pending,
                    days_remaining: None,
                },
                entries: self.entry_ids,
            });
        }

        None
    }
}

/// Where a vendor was first seen booked.
struct FirstBooking {
    entry_id: String,
    status: VendorStatus,
}

#[derive(Default)]
struct VendorScan {
    booked: HashMap<String, FirstBooking>,
    conflicts: Vec<VendorConflict>,
}

impl VendorScan {
    fn absorb(mut self, entry: &Entry) -> Self {
        for vendor in entry.vendors() {
            let Some(key) = vendor.normalized_name() else {
                continue;
            };
            if !vendor.is_booked() {
                continue;
            }
            match self.booked.get(&key) {
                Some(first) if first.entry_id != entry.id => {
                    self.conflicts.push(VendorConflict {
                        vendor: vendor.name().to_string(),
                        entries: [first.entry_id.clone(), entry.id.clone()],
                        status_1: first.status,
                        status_2: VendorStatus::Booked,
                    });
                }
                Some(_) => {}
                None => {
                    self.booked.insert(
                        key,
                        FirstBooking {
                            entry_id: entry.id.clone(),
                            status: VendorStatus::Booked,
                        },
                    );
                }
            }
        }
        self
    }

    fn finish(self) -> Option<Contradiction> {
        if self.conflicts.is_empty() {
            return None;
        }

        let mut entries = Vec::new();
        for conflict in &self.conflicts {
            for id in &conflict.entries {
                push_unique(&mut entries, id);
            }
        }

        Some(Contradiction {
            kind: ContradictionKind::VendorConflict,
            severity: Severity::Medium,
            description: format!(
                "Vendor booking conflicts: {} vendors with status changes",
                self.conflicts.len()
            ),
            detail: ContradictionDetail::VendorConflicts {
                conflicts: self.conflicts,
            },
            entries,
        })
    }
}

pub(crate) fn push_unique(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Scans entries for budget, timeline, and vendor contradictions.
#[derive(Debug, Clone, Default)]
pub struct ContradictionDetector {
    config: AnalysisConfig,
}

impl ContradictionDetector {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Detect contradictions, measuring wedding countdowns from the local date.
    pub fn detect(&self, entries: &[Entry]) -> Vec<Contradiction> {
        self.detect_as_of(entries, chrono::Local::now().date_naive())
    }

    /// Detect contradictions with an explicit "today" for countdowns.
    ///
    /// At most one budget finding, one timeline finding, and one vendor
    /// finding are returned, in that order.
    pub fn detect_as_of(&self, entries: &[Entry], today: NaiveDate) -> Vec<Contradiction> {
        tracing::info!(entries = entries.len(), "analyzing entries for contradictions");

        let budget = entries.iter().fold(BudgetScan::default(), BudgetScan::absorb);
        let timeline = entries.iter().fold(TimelineScan::default(), TimelineScan::absorb);
        let vendors = entries.iter().fold(VendorScan::default(), VendorScan::absorb);

        let contradictions: Vec<Contradiction> = [
            budget.finish(&self.config),
            timeline.finish(&self.config, today),
            vendors.finish(),
        ]
        .into_iter()
        .flatten()
        .collect();

        tracing::info!(found = contradictions.len(), "contradiction scan complete");
        contradictions
    }
}
