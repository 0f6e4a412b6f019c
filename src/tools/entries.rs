use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `generate_insights` and `next_steps` tools.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EntriesParams {
    #[schemars(
        description = "Journal entries in chronological order. Each needs an 'id'; entities, tasks, sentiment, and themes are optional."
    )]
    pub entries: Vec<serde_json::Value>,
}
