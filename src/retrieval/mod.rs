//! Embedding-based retrieval over journal entries.
//!
//! [`SemanticRetriever`] embeds a query through the injected
//! [`EmbeddingProvider`], ranks entries by cosine similarity against their
//! stored embeddings, and renders the best matches as a prompt context block.
//! The embedding call is the only suspension point; ranking and rendering are
//! synchronous.

pub mod context;
pub mod flags;
pub mod search;
pub mod similarity;

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;

use crate::analysis::Contradiction;
use crate::config::{AnalysisConfig, RetrievalConfig};
use crate::embedding::EmbeddingProvider;
use crate::journal::Entry;

pub use context::render_context;
pub use search::{rank, SearchResult};
pub use similarity::cosine_similarity;

/// Semantic search and prompt-context assembly.
///
/// Holds no per-call state; one retriever can serve concurrent calls.
#[derive(Clone)]
pub struct SemanticRetriever {
    provider: Arc<dyn EmbeddingProvider>,
    config: RetrievalConfig,
    analysis: AnalysisConfig,
}

impl SemanticRetriever {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: RetrievalConfig) -> Self {
        Self {
            provider,
            config,
            analysis: AnalysisConfig::default(),
        }
    }

    /// Use custom thresholds for [`Self::find_contradictions`].
    pub fn with_analysis_config(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = analysis;
        self
    }

    /// Rank `entries` by similarity to `query`, best first, at most `top_k`.
    ///
    /// Fails only when the query cannot be embedded.
    pub async fn search(&self, query: &str, entries: &[Entry], top_k: usize) -> Result<Vec<SearchResult>> {
        tracing::info!(entries = entries.len(), top_k, "searching entries");

        let query_embedding = match self.provider.embed(query).await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, model = self.provider.model(), "query embedding failed");
                return Err(e.context("failed to embed search query"));
            }
        };

        let results = rank(&query_embedding, entries, top_k, self.config.preview_chars);
        tracing::info!(results = results.len(), "search complete");
        Ok(results)
    }

    /// Search with `top_k = num_context` and render the hits as a context block.
    pub async fn retrieve_context(&self, query: &str, entries: &[Entry], num_context: usize) -> Result<String> {
        tracing::info!(entries = entries.len(), num_context, "retrieving context");
        let similar = self.search(query, entries, num_context).await?;
        let context = render_context(&similar);
        tracing::info!(context_entries = similar.len(), "context retrieved");
        Ok(context)
    }

    /// Retrieval-time contradiction flags, measured from the local date.
    ///
    /// See [`flags`] for how these differ from the full detector.
    pub fn find_contradictions(&self, entries: &[Entry]) -> Vec<Contradiction> {
        self.find_contradictions_as_of(entries, chrono::Local::now().date_naive())
    }

    pub fn find_contradictions_as_of(&self, entries: &[Entry], today: NaiveDate) -> Vec<Contradiction> {
        tracing::info!(entries = entries.len(), "checking entries for contradiction flags");
        let found = flags::scan(entries, &self.analysis, today);
        tracing::info!(found = found.len(), "contradiction flags complete");
        found
    }
}
