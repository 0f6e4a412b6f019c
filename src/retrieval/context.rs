use super::search::SearchResult;

/// Render ranked matches as a context block for a downstream prompt.
///
/// One block per match, numbered from 1 in the order given, separated by a
/// blank line. An empty slice renders as an empty string.
pub fn render_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let emotion = result
                .sentiment
                .as_ref()
                .and_then(|s| s.emotion.as_deref())
                .filter(|e| !e.is_empty())
                .unwrap_or("unknown");
            format!(
                "[Similar Entry {} - Relevance: {:.2}%]\nDate: {}\nText: {}\nSentiment: {}\n",
                i + 1,
                result.relevance_score * 100.0,
                result.date.as_deref().unwrap_or("unknown"),
                result.full_text,
                emotion,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
