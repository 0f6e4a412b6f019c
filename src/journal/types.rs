//! Journal entry type definitions.
//!
//! An [`Entry`] is the structured record an upstream extraction step produces
//! from one free-text journal entry. Every field except `id` is optional, and
//! malformed sub-fields deserialize to their defaults (see [`super::lenient`]).
//! The accessors on these types are the single place where missing data is
//! resolved to empty containers, zero, or `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Date format used by extracted `dates` mentions.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Booking state of a vendor mentioned in an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum VendorStatus {
    Interested,
    Booked,
    Rejected,
    Pending,
    /// Any status the extraction step produced that is not one of the above.
    Other,
}

impl VendorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interested => "interested",
            Self::Booked => "booked",
            Self::Rejected => "rejected",
            Self::Pending => "pending",
            Self::Other => "other",
        }
    }
}

impl From<String> for VendorStatus {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "interested" => Self::Interested,
            "booked" => Self::Booked,
            "rejected" => Self::Rejected,
            "pending" => Self::Pending,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
    Other,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other => "other",
        }
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority as assigned by the extraction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
    Other,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Other => "other",
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured journal record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque identifier, unique per entry. The only required field.
    #[serde(deserialize_with = "lenient::identifier")]
    pub id: String,
    /// Full entry body.
    #[serde(default, alias = "raw_text", deserialize_with = "lenient::field")]
    pub text: Option<String>,
    /// Entry timestamp as supplied (ISO 8601 date or datetime).
    #[serde(default, alias = "created_at", deserialize_with = "lenient::field")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::field")]
    pub entities: Entities,
    #[serde(default, deserialize_with = "lenient::field")]
    pub tasks: Tasks,
    #[serde(default, deserialize_with = "lenient::field")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub themes: Vec<String>,
    /// Embedding of `text`. Entries without one are never ranked.
    #[serde(
        default,
        deserialize_with = "lenient::field",
        skip_serializing_if = "Option::is_none"
    )]
    pub embedding: Option<Vec<f32>>,
}

impl Entry {
    /// Entry body, or `""` when absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// The recorded emotion, if present and non-empty.
    pub fn emotion(&self) -> Option<&str> {
        self.sentiment
            .as_ref()
            .and_then(|s| s.emotion.as_deref())
            .filter(|e| !e.is_empty())
    }

    pub fn explicit_tasks(&self) -> &[Task] {
        &self.tasks.explicit
    }

    pub fn costs(&self) -> &[Cost] {
        &self.entities.costs
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.entities.vendors
    }

    pub fn dates(&self) -> &[DateMention] {
        &self.entities.dates
    }
}

/// Named things extracted from an entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub vendors: Vec<Vendor>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub costs: Vec<Cost>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub dates: Vec<DateMention>,
    /// Passed through untouched; no component inspects venues.
    #[serde(default, deserialize_with = "lenient::seq")]
    pub venues: Vec<serde_json::Value>,
    /// Passed through untouched; no component inspects people.
    #[serde(default, deserialize_with = "lenient::seq")]
    pub people: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub status: Option<VendorStatus>,
}

impl Vendor {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Lowercased name used to match the same vendor across entries. `None` if unnamed.
    pub fn normalized_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase)
    }

    pub fn is_booked(&self) -> bool {
        self.status == Some(VendorStatus::Booked)
    }
}

/// A monetary amount attached to a spending category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cost {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Cost {
    /// Amount, or `0.0` when absent.
    pub fn amount(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }
}

/// A dated event mentioned in an entry, e.g. `{"event": "wedding", "date": "2026-06-14"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateMention {
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl DateMention {
    pub fn event(&self) -> &str {
        self.event.as_deref().unwrap_or("")
    }

    /// Parse `date` as `YYYY-MM-DD`. Unparsable or missing dates yield `None`.
    pub fn parsed(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::debug!(date = raw, error = %e, "skipping unparsable date");
                None
            }
        }
    }
}

/// Explicit (stated) and implicit (inferred) tasks of an entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tasks {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub explicit: Vec<Task>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub implicit: Vec<Task>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(
        default,
        alias = "task",
        deserialize_with = "lenient::field",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "lenient::field", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl Task {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown task")
    }

    pub fn is_pending(&self) -> bool {
        self.status == Some(TaskStatus::Pending)
    }

    pub fn is_completed(&self) -> bool {
        self.status == Some(TaskStatus::Completed)
    }

    pub fn is_high_priority(&self) -> bool {
        self.priority == Some(Priority::High)
    }
}

/// Overall emotional tone of an entry.
///
/// Accepts either the full `{"emotion": .., "confidence": ..}` object or a bare
/// emotion label, which older records store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "SentimentRepr")]
pub struct Sentiment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    /// Extraction confidence in `[0.0, 1.0]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SentimentRepr {
    Label(String),
    Full {
        #[serde(default, deserialize_with = "lenient::field")]
        emotion: Option<String>,
        #[serde(default, deserialize_with = "lenient::field")]
        confidence: Option<f64>,
    },
}

impl From<SentimentRepr> for Sentiment {
    fn from(repr: SentimentRepr) -> Self {
        match repr {
            SentimentRepr::Label(emotion) => Self {
                emotion: Some(emotion),
                confidence: None,
            },
            SentimentRepr::Full {
                emotion,
                confidence,
            } => Self {
                emotion,
                confidence,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_entry_has_empty_defaults() {
        let entry: Entry = serde_json::from_str(r#"{"id": "e1"}"#).unwrap();
        assert_eq!(entry.id, "e1");
        assert_eq!(entry.text(), "");
        assert!(entry.emotion().is_none());
        assert!(entry.costs().is_empty());
        assert!(entry.vendors().is_empty());
        assert!(entry.explicit_tasks().is_empty());
        assert!(entry.themes.is_empty());
        assert!(entry.embedding.is_none());
    }

    #[test]
    fn missing_id_is_an_error() {
        assert!(serde_json::from_str::<Entry>(r#"{"text": "hi"}"#).is_err());
    }

    #[test]
    fn aliases_are_accepted() {
        let entry: Entry = serde_json::from_str(
            r#"{"id": "e1", "raw_text": "Met the florist", "created_at": "2026-03-01T10:00:00Z",
                "tasks": {"explicit": [{"task": "Call florist", "status": "pending"}]}}"#,
        )
        .unwrap();
        assert_eq!(entry.text(), "Met the florist");
        assert_eq!(entry.date.as_deref(), Some("2026-03-01T10:00:00Z"));
        assert_eq!(entry.explicit_tasks()[0].title(), "Call florist");
    }

    #[test]
    fn malformed_fields_fall_back() {
        let entry: Entry = serde_json::from_str(
            r#"{"id": "e1",
                "entities": {"costs": [{"amount": "a lot", "category": "venue"}, "junk", {"amount": 300}]},
                "sentiment": 7,
                "tasks": {"explicit": "none"},
                "embedding": "not a vector"}"#,
        )
        .unwrap();
        assert_eq!(entry.costs().len(), 2);
        assert_eq!(entry.costs()[0].amount(), 0.0);
        assert_eq!(entry.costs()[0].category(), "venue");
        assert_eq!(entry.costs()[1].amount(), 300.0);
        assert!(entry.sentiment.is_none());
        assert!(entry.explicit_tasks().is_empty());
        assert!(entry.embedding.is_none());
    }

    #[test]
    fn statuses_parse_case_insensitively() {
        let vendor: Vendor =
            serde_json::from_str(r#"{"name": "Garden Venue", "status": "Booked"}"#).unwrap();
        assert!(vendor.is_booked());
        assert_eq!(vendor.normalized_name().as_deref(), Some("garden venue"));

        let task: Task =
            serde_json::from_str(r#"{"title": "x", "status": "waiting", "priority": "HIGH"}"#)
                .unwrap();
        assert_eq!(task.status, Some(TaskStatus::Other));
        assert!(!task.is_pending());
        assert!(task.is_high_priority());
    }

    #[test]
    fn unnamed_vendor_has_no_normalized_name() {
        let vendor = Vendor::default();
        assert!(vendor.normalized_name().is_none());
    }

    #[test]
    fn date_mentions_parse_iso_dates_only() {
        let ok = DateMention {
            event: Some("Wedding".into()),
            date: Some("2026-06-14".into()),
        };
        assert_eq!(ok.parsed(), NaiveDate::from_ymd_opt(2026, 6, 14));

        let bad = DateMention {
            event: Some("wedding".into()),
            date: Some("June 14th".into()),
        };
        assert!(bad.parsed().is_none());
        assert!(DateMention::default().parsed().is_none());
    }

    #[test]
    fn bare_sentiment_label_is_an_emotion() {
        let entry: Entry =
            serde_json::from_str(r#"{"id": "e1", "sentiment": "excited"}"#).unwrap();
        assert_eq!(entry.emotion(), Some("excited"));
    }

    #[test]
    fn empty_emotion_is_ignored() {
        let entry: Entry =
            serde_json::from_str(r#"{"id": "e1", "sentiment": {"emotion": ""}}"#).unwrap();
        assert!(entry.emotion().is_none());
    }
}
