pub mod chart;
pub mod dataset;
pub mod openai;
pub mod relevance;

#[cfg(test)]
pub mod mock;

use anyhow::Result;

/// One two-message exchange with the completion API
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

// Define trait for completion-backend functionality
#[async_trait::async_trait]
pub trait CompletionServiceTrait: Send + Sync + 'static {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

// Implement the trait for the hosted backend
#[async_trait::async_trait]
impl CompletionServiceTrait for openai::OpenAiService {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.complete(&request).await
    }
}

// Re-export the services
pub use chart::ChartService;
pub use dataset::DatasetStore;
pub use openai::OpenAiService;
pub use relevance::RelevanceFilter;
