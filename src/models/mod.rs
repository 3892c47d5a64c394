pub mod query;
pub mod response;

pub use query::{DescriptionRequest, DescriptionResponse, QueryRequest, QueryResponse};
pub use response::{ErrorResponse, PreviewResponse, UploadResponse};
