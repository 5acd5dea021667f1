use serde::{Deserialize, Serialize};

/// Payload handed back to the host on blur or explicit save.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// Portable expression string.
    pub expression: String,
    /// Referenced variable ids, first occurrence order, no duplicates.
    pub variable_ids: Vec<String>,
}
