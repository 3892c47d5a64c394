use serde::{Serialize, Deserialize};
use serde_json::Value;

/// Request for chart generation from a natural-language question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Full prompt assembled by the client, including column metadata
    pub prompt: String,
    /// The user's original question, used for the relevance check
    #[serde(rename = "userQuery")]
    pub user_query: String,
}

/// Response for the query endpoint: a plain-text message, a parsed
/// Vega-Lite specification, or both are absent depending on the outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(rename = "vegaSpec", skip_serializing_if = "Option::is_none")]
    pub vega_spec: Option<Value>,
}

/// Request for a one-line chart description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionRequest {
    /// Sample rows the rendered chart was built from
    pub data: Vec<Value>,
    #[serde(rename = "userQuery")]
    pub user_query: String,
}

/// Response for the describe endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionResponse {
    pub description: String,
}
