//! Insight generation: sentiment trend, spending concentration, task load,
//! and recurring themes, with derived alerts and recommendations.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::{ordered_counts, Severity};
use crate::config::AnalysisConfig;
use crate::journal::Entry;

/// Emotions that count toward the stress alert.
const STRESS_EMOTIONS: [&str; 2] = ["stressed", "anxious"];

/// Structured insight report.
///
/// Every section is always present when serialized; a section without enough
/// data serializes as `[]` or `{}`, never `null`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InsightReport {
    pub patterns: Vec<Pattern>,
    pub recommendations: Vec<Recommendation>,
    pub alerts: Vec<Alert>,
    #[serde(serialize_with = "empty_if_none")]
    pub sentiment_trend: Option<SentimentTrend>,
    #[serde(serialize_with = "empty_if_none")]
    pub budget_status: Option<BudgetStatus>,
    #[serde(serialize_with = "empty_if_none")]
    pub task_summary: Option<TaskSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pattern {
    RecurringTheme {
        theme: String,
        frequency: usize,
        description: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recommendation {
    CostOptimization {
        area: String,
        amount: f64,
        message: String,
    },
    TaskPriority {
        message: String,
        count: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Alert {
    StressLevel {
        severity: Severity,
        message: String,
        recommendation: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentTrend {
    pub dominant_emotion: String,
    pub count: usize,
    pub distribution: BTreeMap<String, usize>,
    pub trend_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub total_spent: f64,
    pub by_category: BTreeMap<String, f64>,
    pub largest_category: String,
    pub largest_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    pub total_tasks: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage of explicit tasks completed, `0.0..=100.0`.
    pub completion_rate: f64,
    pub high_priority: usize,
}

fn empty_if_none<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    use serde::ser::SerializeMap;
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// Aggregates statistics over entries into an [`InsightReport`].
#[derive(Debug, Clone, Default)]
pub struct InsightGenerator {
    config: AnalysisConfig,
}

impl InsightGenerator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Build a report. An empty slice yields an all-empty report.
    pub fn generate(&self, entries: &[Entry]) -> InsightReport {
        tracing::info!(entries = entries.len(), "generating insights");

        let mut report = InsightReport::default();
        if entries.is_empty() {
            return report;
        }

        self.sentiment_section(entries, &mut report);
        self.budget_section(entries, &mut report);
        self.task_section(entries, &mut report);
        self.theme_section(entries, &mut report);

        tracing::info!(
            recommendations = report.recommendations.len(),
            alerts = report.alerts.len(),
            patterns = report.patterns.len(),
            "insights generated"
        );
        report
    }

    fn sentiment_section(&self, entries: &[Entry], report: &mut InsightReport) {
        let counts = ordered_counts(entries.iter().filter_map(Entry::emotion));
        let Some((dominant, count)) = first_max(&counts) else {
            return;
        };

        report.sentiment_trend = Some(SentimentTrend {
            dominant_emotion: dominant.to_string(),
            count,
            distribution: counts.iter().map(|(e, n)| (e.to_string(), *n)).collect(),
            trend_description: format!(
                "Recent entries show {dominant} sentiment (seen {count} times)"
            ),
        });

        let stress_count: usize = counts
            .iter()
            .filter(|(emotion, _)| STRESS_EMOTIONS.contains(emotion))
            .map(|(_, n)| n)
            .sum();
        if stress_count as f64 > entries.len() as f64 * self.config.stress_ratio {
            report.alerts.push(Alert::StressLevel {
                severity: Severity::High,
                message: format!(
                    "Wedding planning stress detected: {stress_count} of {} recent entries show stress",
                    entries.len()
                ),
                recommendation: "Consider delegating tasks or taking a break".into(),
            });
        }
    }

    fn budget_section(&self, entries: &[Entry], report: &mut InsightReport) {
        let mut totals: Vec<(&str, f64)> = Vec::new();
        let mut total_spent = 0.0;

        for cost in entries.iter().flat_map(Entry::costs) {
            let amount = cost.amount();
            total_spent += amount;
            match totals.iter_mut().find(|(c, _)| *c == cost.category()) {
                Some((_, sum)) => *sum += amount,
                None => totals.push((cost.category(), amount)),
            }
        }

        let Some((largest, largest_amount)) = first_max(&totals) else {
            return;
        };

        report.budget_status = Some(BudgetStatus {
            total_spent,
            by_category: totals.iter().map(|(c, a)| (c.to_string(), *a)).collect(),
            largest_category: largest.to_string(),
            largest_amount,
        });

        // Costs with no category land under "" and cannot be named in advice.
        if !largest.is_empty() {
            report.recommendations.push(Recommendation::CostOptimization {
                area: largest.to_string(),
                amount: largest_amount,
                message: format!(
                    "Your largest expense is {largest} at ${largest_amount:.2}. \
                     Consider if there are cost-saving options here."
                ),
            });
        }
    }

    fn task_section(&self, entries: &[Entry], report: &mut InsightReport) {
        let tasks: Vec<_> = entries.iter().flat_map(Entry::explicit_tasks).collect();
        if tasks.is_empty() {
            return;
        }

        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.is_completed()).count();
        let high_priority = tasks.iter().filter(|t| t.is_high_priority()).count();

        report.task_summary = Some(TaskSummary {
            total_tasks: total,
            completed,
            pending: total - completed,
            completion_rate: completed as f64 / total as f64 * 100.0,
            high_priority,
        });

        if high_priority > self.config.high_priority_alert {
            report.recommendations.push(Recommendation::TaskPriority {
                message: format!(
                    "You have {high_priority} high-priority tasks. \
                     Focus on these first to avoid last-minute stress."
                ),
                count: high_priority,
            });
        }
    }

    fn theme_section(&self, entries: &[Entry], report: &mut InsightReport) {
        if entries.len() < self.config.theme_min_entries {
            return;
        }

        let mut counts =
            ordered_counts(entries.iter().flat_map(|e| e.themes.iter().map(String::as_str)));
        // Stable: equal counts keep first-seen order.
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        report.patterns.extend(
            counts
                .into_iter()
                .take(self.config.top_themes)
                .map(|(theme, count)| Pattern::RecurringTheme {
                    theme: theme.to_string(),
                    frequency: count,
                    description: format!("'{theme}' appears in {count} of your recent entries"),
                }),
        );
    }
}

/// The entry with the largest value; on ties, the earliest one.
fn first_max<T: PartialOrd + Copy>(counts: &[(&str, T)]) -> Option<(String, T)> {
    let mut best: Option<(&str, T)> = None;
    for &(key, value) in counts {
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((key, value)),
        }
    }
    best.map(|(key, value)| (key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(values: Vec<serde_json::Value>) -> Vec<Entry> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    #[test]
    fn empty_report_serializes_all_keys() {
        let report = InsightGenerator::default().generate(&[]);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["patterns"], json!([]));
        assert_eq!(value["recommendations"], json!([]));
        assert_eq!(value["alerts"], json!([]));
        assert_eq!(value["sentiment_trend"], json!({}));
        assert_eq!(value["budget_status"], json!({}));
        assert_eq!(value["task_summary"], json!({}));
    }

    #[test]
    fn dominant_emotion_ties_go_to_first_seen() {
        let report = InsightGenerator::default().generate(&entries(vec![
            json!({"id": "a", "sentiment": {"emotion": "excited"}}),
            json!({"id": "b", "sentiment": {"emotion": "calm"}}),
            json!({"id": "c", "sentiment": {"emotion": "calm"}}),
            json!({"id": "d", "sentiment": {"emotion": "excited"}}),
        ]));
        let trend = report.sentiment_trend.unwrap();
        assert_eq!(trend.dominant_emotion, "excited");
        assert_eq!(trend.count, 2);
        assert_eq!(trend.distribution["calm"], 2);
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn stress_alert_needs_a_majority() {
        let half = InsightGenerator::default().generate(&entries(vec![
            json!({"id": "a", "sentiment": {"emotion": "stressed"}}),
            json!({"id": "b", "sentiment": {"emotion": "happy"}}),
        ]));
        assert!(half.alerts.is_empty());

        let most = InsightGenerator::default().generate(&entries(vec![
            json!({"id": "a", "sentiment": {"emotion": "stressed"}}),
            json!({"id": "b", "sentiment": {"emotion": "anxious"}}),
            json!({"id": "c", "sentiment": {"emotion": "happy"}}),
        ]));
        assert_eq!(most.alerts.len(), 1);
        let Alert::StressLevel { severity, message, .. } = &most.alerts[0];
        assert_eq!(*severity, Severity::High);
        assert!(message.contains("2 of 3"));
    }

    #[test]
    fn entries_without_emotion_leave_trend_empty() {
        let report = InsightGenerator::default().generate(&entries(vec![
            json!({"id": "a", "sentiment": {"emotion": ""}}),
            json!({"id": "b"}),
        ]));
        assert!(report.sentiment_trend.is_none());
    }

    #[test]
    fn budget_status_sums_every_cost() {
        let report = InsightGenerator::default().generate(&entries(vec![
            json!({"id": "a", "entities": {"costs": [
                {"amount": 8000, "category": "budget"},
                {"amount": 3000, "category": "venue"}
            ]}}),
            json!({"id": "b", "entities": {"costs": [
                {"amount": 1500, "category": "venue"},
                {"amount": 900, "category": "flowers"}
            ]}}),
        ]));
        let status = report.budget_status.unwrap();
        assert_eq!(status.total_spent, 13400.0);
        assert_eq!(status.by_category["venue"], 4500.0);
        assert_eq!(status.largest_category, "budget");
        assert_eq!(report.recommendations.len(), 1);
        assert!(matches!(
            &report.recommendations[0],
            Recommendation::CostOptimization { area, .. } if area == "budget"
        ));
    }

    #[test]
    fn completion_rate_and_priority_recommendation() {
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                json!({
                    "title": format!("task {i}"),
                    "status": (if i < 2 { "completed" } else { "pending" }),
                    "priority": (if i < 6 { "high" } else { "low" })
                })
            })
            .collect();
        let report = InsightGenerator::default()
            .generate(&entries(vec![json!({"id": "a", "tasks": {"explicit": tasks}})]));
        let summary = report.task_summary.unwrap();
        assert_eq!(summary.total_tasks, 8);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.pending, 6);
        assert_eq!(summary.completion_rate, 25.0);
        assert_eq!(summary.high_priority, 6);
        assert!(matches!(
            report.recommendations.last(),
            Some(Recommendation::TaskPriority { count: 6, .. })
        ));
    }

    #[test]
    fn top_three_themes_with_stable_ties() {
        let report = InsightGenerator::default().generate(&entries(vec![
            json!({"id": "a", "themes": ["flowers", "venue", "family"]}),
            json!({"id": "b", "themes": ["venue", "budget", "music"]}),
            json!({"id": "c", "themes": ["budget", "family"]}),
        ]));
        let themes: Vec<_> = report
            .patterns
            .iter()
            .map(|Pattern::RecurringTheme { theme, frequency, .. }| (theme.as_str(), *frequency))
            .collect();
        assert_eq!(themes, vec![("venue", 2), ("family", 2), ("budget", 2)]);
    }

    #[test]
    fn themes_need_minimum_history() {
        let report = InsightGenerator::default().generate(&entries(vec![
            json!({"id": "a", "themes": ["venue"]}),
            json!({"id": "b", "themes": ["venue"]}),
        ]));
        assert!(report.patterns.is_empty());
    }

    #[test]
    fn first_max_prefers_earliest() {
        let counts = [("a", 1.0), ("b", 3.0), ("c", 3.0)];
        assert_eq!(first_max(&counts), Some(("b".to_string(), 3.0)));
        assert_eq!(first_max::<f64>(&[]), None);
    }
}
