//! Lightweight contradiction flags for retrieval callers.
//!
//! A narrower rule set than [`crate::analysis::ContradictionDetector`]:
//!
//! - only an explicit `"total budget"` cost sets the budget, and only an
//!   overrun is flagged
//! - the wedding date comes from a date mention whose event is exactly
//!   `"wedding"`, and only timeline pressure is flagged
//! - every repeat booking of a vendor already seen in an earlier entry is its
//!   own flag, whatever status that earlier mention had

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::analysis::contradictions::{push_unique, ContradictionDetail};
use crate::analysis::{Contradiction, ContradictionKind, Severity};
use crate::config::AnalysisConfig;
use crate::journal::Entry;

#[derive(Default)]
struct BudgetFlag {
    total_budget: Option<f64>,
    spending: f64,
    entry_ids: Vec<String>,
}

impl BudgetFlag {
    fn absorb(mut self, entry: &Entry) -> Self {
        for cost in entry.costs() {
            if cost.category().trim().eq_ignore_ascii_case("total budget") {
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
        if spent <= budget * config.overrun_ratio {
            return None;
        }
        Some(Contradiction {
            kind: ContradictionKind::BudgetOverrun,
            severity: Severity::High,
            description: format!(
                "Budget overrun: Spent ${spent:.2} of ${budget:.2} (${:.2} over)",
                spent - budget
            ),
            detail: ContradictionDetail::Budget { budget, spent },
            entries: self.entry_ids,
        })
    }
}

#[derive(Default)]
struct TimelineFlag {
    pending_tasks: usize,
    entry_ids: Vec<String>,
    wedding_date: Option<NaiveDate>,
}

impl TimelineFlag {
    fn absorb(mut self, entry: &Entry) -> Self {
        let pending = entry.explicit_tasks().iter().filter(|t| t.is_pending()).count();
        if pending > 0 {
            self.pending_tasks += pending;
            push_unique(&mut self.entry_ids, &entry.id);
        }
        let wedding = entry
            .dates()
            .iter()
            .filter(|m| m.event().trim().eq_ignore_ascii_case("wedding"))
            .filter_map(|m| m.parsed())
            .last();
        if wedding.is_some() {
            self.wedding_date = wedding;
        }
        self
    }

    fn finish(self, config: &AnalysisConfig, today: NaiveDate) -> Option<Contradiction> {
        let pending = self.pending_tasks;
        if pending <= config.timeline_min_pending {
            return None;
        }
        let days = (self.wedding_date? - today).num_days();
        if days >= config.timeline_window_days {
            return None;
        }
        Some(Contradiction {
            kind: ContradictionKind::TimelinePressure,
            severity: Severity::High,
            description: format!(
                "Timeline pressure: {pending} tasks pending with <{} days to wedding",
                config.timeline_window_days
            ),
            detail: ContradictionDetail::Timeline {
                pending_tasks: pending,
                days_remaining: Some(days),
            },
            entries: self.entry_ids,
        })
    }
}

#[derive(Default)]
struct VendorFlags {
    first_seen: HashMap<String, String>,
    flags: Vec<Contradiction>,
}

impl VendorFlags {
    fn absorb(mut self, entry: &Entry) -> Self {
        for vendor in entry.vendors() {
            let Some(key) = vendor.normalized_name() else {
                continue;
            };
            match self.first_seen.get(&key) {
                Some(first) if vendor.is_booked() && *first != entry.id => {
                    self.flags.push(Contradiction {
                        kind: ContradictionKind::VendorConflict,
                        severity: Severity::Medium,
                        description: format!("Vendor booked multiple times: {}", vendor.name()),
                        detail: ContradictionDetail::Vendor {
                            vendor: vendor.name().to_string(),
                        },
                        entries: vec![first.clone(), entry.id.clone()],
                    });
                }
                Some(_) => {}
                None => {
                    self.first_seen.insert(key, entry.id.clone());
                }
            }
        }
        self
    }
}

/// Run the retrieval-time contradiction flags as of `today`.
///
/// Flags come out budget first, then timeline, then one per repeated vendor
/// booking in the order encountered.
pub fn scan(entries: &[Entry], config: &AnalysisConfig, today: NaiveDate) -> Vec<Contradiction> {
    let budget = entries.iter().fold(BudgetFlag::default(), BudgetFlag::absorb);
    let timeline = entries.iter().fold(TimelineFlag::default(), TimelineFlag::absorb);
    let vendors = entries.iter().fold(VendorFlags::default(), VendorFlags::absorb);

    [budget.finish(config), timeline.finish(config, today)]
        .into_iter()
        .flatten()
        .chain(vendors.flags)
        .collect()
}
