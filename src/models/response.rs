use serde::{Serialize, Deserialize};
use serde_json::Value;

/// Response for file upload endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    pub message: String,
}

/// Response for dataset preview endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub status: String,
    pub preview: Vec<Value>,
}

/// Error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status_code: u16,
}
