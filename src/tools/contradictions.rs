//! MCP contradiction tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `detect_contradictions` and `find_contradictions` tools.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ContradictionParams {
    #[schemars(description = "Journal entries in chronological order. Each needs an 'id'.")]
    pub entries: Vec<serde_json::Value>,

    /// Reference date for wedding countdowns, `YYYY-MM-DD`. Defaults to today.
    #[schemars(description = "Date to count days-to-wedding from (YYYY-MM-DD). Defaults to today.")]
    pub as_of: Option<String>,
}
