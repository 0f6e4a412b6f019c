use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RetrieveContextParams {
    #[schemars(description = "Current entry text or question to find related history for")]
    pub query: String,

    #[schemars(description = "Historical journal entries with embeddings")]
    pub entries: Vec<serde_json::Value>,

    #[schemars(description = "Number of similar entries to include. Defaults to 3.")]
    pub num_context: Option<usize>,
}
