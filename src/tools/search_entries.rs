//! MCP `search_entries` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `search_entries` MCP tool.
///
/// Only entries that carry an `embedding` can be ranked.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchEntriesParams {
    #[schemars(description = "Natural language query to rank entries against")]
    pub query: String,

    #[schemars(
        description = "Journal entries to search. Entries without an 'embedding' array are skipped."
    )]
    pub entries: Vec<serde_json::Value>,

    /// Maximum number of results. Defaults to `retrieval.default_top_k`.
    #[schemars(description = "Maximum number of results to return. Defaults to 5.")]
    pub top_k: Option<usize>,
}
