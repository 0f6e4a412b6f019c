pub mod contradictions;
pub mod entries;
pub mod retrieve_context;
pub mod search_entries;

use chrono::NaiveDate;
use contradictions::ContradictionParams;
use entries::EntriesParams;
use retrieve_context::RetrieveContextParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use search_entries::SearchEntriesParams;
use std::sync::Arc;

use vowlog::analysis::{ContradictionDetector, InsightGenerator, NextStepPlanner};
use vowlog::config::VowlogConfig;
use vowlog::embedding::EmbeddingProvider;
use vowlog::journal::{self, Entry};
use vowlog::retrieval::SemanticRetriever;

/// The Vowlog MCP tool handler. Holds the shared retriever and config and
/// exposes every analysis operation via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct VowlogTools {
    tool_router: ToolRouter<Self>,
    retriever: SemanticRetriever,
    config: Arc<VowlogConfig>,
}

#[tool_router]
impl VowlogTools {
    pub fn new(embedding: Arc<dyn EmbeddingProvider>, config: Arc<VowlogConfig>) -> Self {
        let retriever = SemanticRetriever::new(embedding, config.retrieval.clone())
            .with_analysis_config(config.analysis.clone());
        Self {
            tool_router: Self::tool_router(),
            retriever,
            config,
        }
    }

    /// Full contradiction scan: budget, timeline, and vendor conflicts.
    #[tool(description = "Detect contradictions across journal entries: budget overruns/concerns, timeline pressure or task overload, and vendors booked in more than one entry.")]
    async fn detect_contradictions(
        &self,
        Parameters(params): Parameters<ContradictionParams>,
    ) -> Result<String, String> {
        if params.entries.is_empty() {
            return Err("entries must not be empty".into());
        }
        let today = resolve_as_of(params.as_of.as_deref())?;
        let entries = parse_entries(params.entries)?;
        tracing::info!(entries = entries.len(), %today, "detect_contradictions called");

        let found = ContradictionDetector::new(self.config.analysis.clone()).detect_as_of(&entries, today);
        serde_json::to_string(&serde_json::json!({
            "contradictions": found,
            "count": found.len(),
        }))
        .map_err(|e| format!("serialization failed: {e}"))
    }

    #[tool(description = "Generate insights from journal entries: sentiment trend, spending by category, task completion, recurring themes, plus derived alerts and recommendations.")]
    async fn generate_insights(
        &self,
        Parameters(params): Parameters<EntriesParams>,
    ) -> Result<String, String> {
        if params.entries.is_empty() {
            return Err("entries must not be empty".into());
        }
        let entries = parse_entries(params.entries)?;
        tracing::info!(entries = entries.len(), "generate_insights called");

        let report = InsightGenerator::new(self.config.analysis.clone()).generate(&entries);
        serde_json::to_string(&report).map_err(|e| format!("serialization failed: {e}"))
    }

    #[tool(description = "Suggest prioritized next steps from the most recent entry's pending tasks and unbooked vendors.")]
    async fn next_steps(
        &self,
        Parameters(params): Parameters<EntriesParams>,
    ) -> Result<String, String> {
        let entries = parse_entries(params.entries)?;
        tracing::info!(entries = entries.len(), "next_steps called");

        let steps = NextStepPlanner::new(self.config.analysis.clone()).plan(&entries);
        serde_json::to_string(&serde_json::json!({
            "next_steps": steps,
            "count": steps.len(),
        }))
        .map_err(|e| format!("serialization failed: {e}"))
    }

    /// Semantic search over entries that carry embeddings.
    #[tool(description = "Search journal entries by meaning. Ranks entries that carry an embedding by cosine similarity to the query.")]
    async fn search_entries(
        &self,
        Parameters(params): Parameters<SearchEntriesParams>,
    ) -> Result<String, String> {
        if params.query.trim().is_empty() {
            return Err("query must not be empty".into());
        }
        let top_k = params.top_k.unwrap_or(self.config.retrieval.default_top_k);
        let entries = parse_entries(params.entries)?;
        tracing::info!(query = %params.query, top_k, "search_entries called");

        let results = self
            .retriever
            .search(&params.query, &entries, top_k)
            .await
            .map_err(|e| format!("search failed: {e:#}"))?;

        serde_json::to_string(&serde_json::json!({
            "results": results,
            "total": results.len(),
        }))
        .map_err(|e| format!("serialization failed: {e}"))
    }

    #[tool(description = "Build a context block of the most similar past entries, ready to paste into a prompt.")]
    async fn retrieve_context(
        &self,
        Parameters(params): Parameters<RetrieveContextParams>,
    ) -> Result<String, String> {
        let num_context = params
            .num_context
            .unwrap_or(self.config.retrieval.default_num_context);
        let entries = parse_entries(params.entries)?;
        tracing::info!(query = %params.query, num_context, "retrieve_context called");

        let context = self
            .retriever
            .retrieve_context(&params.query, &entries, num_context)
            .await
            .map_err(|e| format!("context retrieval failed: {e:#}"))?;

        serde_json::to_string(&serde_json::json!({ "context": context }))
            .map_err(|e| format!("serialization failed: {e}"))
    }

    /// Lighter contradiction flags meant to accompany retrieved context.
    #[tool(description = "Quick contradiction flags for retrieval: overruns of an explicit 'total budget', timeline pressure before the wedding, and repeat vendor bookings.")]
    async fn find_contradictions(
        &self,
        Parameters(params): Parameters<ContradictionParams>,
    ) -> Result<String, String> {
        let today = resolve_as_of(params.as_of.as_deref())?;
        let entries = parse_entries(params.entries)?;
        tracing::info!(entries = entries.len(), %today, "find_contradictions called");

        let found = self.retriever.find_contradictions_as_of(&entries, today);
        serde_json::to_string(&serde_json::json!({
            "contradictions": found,
            "count": found.len(),
        }))
        .map_err(|e| format!("serialization failed: {e}"))
    }
}

#[tool_handler]
impl ServerHandler for VowlogTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Vowlog analyzes structured wedding-planning journal entries. Use \
                 detect_contradictions and generate_insights for reports, next_steps for \
                 an action list, and search_entries or retrieve_context for semantic recall."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

fn parse_entries(values: Vec<serde_json::Value>) -> Result<Vec<Entry>, String> {
    journal::entries_from_values(values).map_err(|e| format!("{e:#}"))
}

fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate, String> {
    match as_of {
        Some(raw) => NaiveDate::parse_from_str(raw, journal::types::DATE_FORMAT)
            .map_err(|e| format!("invalid as_of date {raw:?}: {e}")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
