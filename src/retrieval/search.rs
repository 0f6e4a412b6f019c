use serde::Serialize;

use super::similarity::cosine_similarity;
use crate::journal::types::{Entities, Sentiment};
use crate::journal::Entry;

/// A ranked match for a query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub id: String,
    /// Leading characters of the entry body.
    pub text: String,
    pub date: Option<String>,
    /// Cosine similarity to the query, floored at `0.0`.
    pub relevance_score: f64,
    pub full_text: String,
    pub entities: Entities,
    pub sentiment: Option<Sentiment>,
}

impl SearchResult {
    fn from_entry(entry: &Entry, score: f64, preview_chars: usize) -> Self {
        Self {
            id: entry.id.clone(),
            text: preview(entry.text(), preview_chars),
            date: entry.date.clone(),
            relevance_score: score.max(0.0),
            full_text: entry.text().to_string(),
            entities: entry.entities.clone(),
            sentiment: entry.sentiment.clone(),
        }
    }
}

/// Rank entries against an already computed query embedding.
///
/// Entries without an embedding are skipped. Ties keep input order.
pub fn rank(
    query_embedding: &[f32],
    entries: &[Entry],
    top_k: usize,
    preview_chars: usize,
) -> Vec<SearchResult> {
    let mut scored: Vec<(&Entry, f64)> = entries
        .iter()
        .filter_map(|entry| match &entry.embedding {
            Some(embedding) => Some((entry, cosine_similarity(query_embedding, embedding))),
            None => {
                tracing::warn!(entry_id = %entry.id, "entry has no embedding, skipping");
                None
            }
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);

    scored
        .into_iter()
        .map(|(entry, score)| SearchResult::from_entry(entry, score, preview_chars))
        .collect()
}

/// First `max_chars` characters of `text`, split on a char boundary.
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, embedding: Option<Vec<f32>>) -> Entry {
        let mut value = json!({"id": id, "text": format!("entry {id}")});
        if let Some(embedding) = embedding {
            value["embedding"] = json!(embedding);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("héllo wörld", 4), "héll");
        assert_eq!(preview("short", 200), "short");
        assert_eq!(preview("", 10), "");
    }

    #[test]
    fn ranks_descending_and_truncates() {
        let entries = vec![
            entry("far", Some(vec![0.0, 1.0])),
            entry("near", Some(vec![1.0, 0.1])),
            entry("exact", Some(vec![1.0, 0.0])),
        ];
        let results = rank(&[1.0, 0.0], &entries, 2, 200);
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["exact", "near"]);
        assert!((results[0].relevance_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn entries_without_embeddings_are_skipped() {
        let entries = vec![entry("bare", None), entry("vec", Some(vec![1.0, 0.0]))];
        let results = rank(&[1.0, 0.0], &entries, 10, 200);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "vec");
    }

    #[test]
    fn ties_keep_input_order() {
        let entries = vec![
            entry("first", Some(vec![1.0, 0.0])),
            entry("second", Some(vec![2.0, 0.0])),
        ];
        let results = rank(&[1.0, 0.0], &entries, 10, 200);
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn negative_similarity_floors_at_zero() {
        let entries = vec![entry("opposite", Some(vec![-1.0, 0.0]))];
        let results = rank(&[1.0, 0.0], &entries, 1, 200);
        assert_eq!(results[0].relevance_score, 0.0);
    }

    #[test]
    fn overflowing_embedding_does_not_break_ordering() {
        // 1e39 does not fit in an f32 and parses as infinity.
        let entries: Vec<Entry> = serde_json::from_value(json!([
            {"id": "low", "embedding": [0.5, 1.0]},
            {"id": "overflow", "embedding": [1e39, 0.0]},
            {"id": "high", "embedding": [1.0, 0.0]}
        ]))
        .unwrap();
        assert!(entries[1].embedding.as_ref().unwrap()[0].is_infinite());

        let results = rank(&[1.0, 0.0], &entries, 10, 200);
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "low", "overflow"]);
        assert!(results
            .windows(2)
            .all(|w| w[0].relevance_score >= w[1].relevance_score));
        assert_eq!(results[2].relevance_score, 0.0);
    }

    #[test]
    fn zero_top_k_returns_nothing() {
        let entries = vec![entry("a", Some(vec![1.0]))];
        assert!(rank(&[1.0], &entries, 0, 200).is_empty());
    }
}
