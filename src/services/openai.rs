use std::time::Duration;
use anyhow::{Result, anyhow};
use log::{info, error, debug};
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;
use crate::services::CompletionRequest;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the OpenAI chat-completions API
#[derive(Clone, Debug)]
pub struct OpenAiService {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiService {
    /// Create a new OpenAiService using Config
    pub fn new(config: &Config) -> Result<Self> {
        let client = match Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build() {
                Ok(client) => client,
                Err(e) => {
                    error!("Failed to build HTTP client: {}", e);
                    return Err(anyhow!("Failed to build HTTP client: {}", e));
                }
            };

        info!("OpenAiService initialized with model: {}", config.openai_model);
        Ok(Self {
            client,
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        })
    }

    /// Send a single system/user exchange and return the generated text,
    /// trimmed of surrounding whitespace. The request is made once; there
    /// are no retries.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let request_body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": request.system_prompt
                },
                {
                    "role": "user",
                    "content": request.user_prompt
                }
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens
        });

        debug!("Sending request to OpenAI API with model: {}", self.model);

        let response = match self.client
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await {
                Ok(resp) => resp,
                Err(e) => {
                    error!("Failed to send request to OpenAI API: {}", e);
                    if e.is_timeout() {
                        return Err(anyhow!("OpenAI API request timed out after {} seconds", REQUEST_TIMEOUT_SECS));
                    } else if e.is_connect() {
                        return Err(anyhow!("Failed to connect to OpenAI API: {}", e));
                    } else {
                        return Err(anyhow!("Failed to send request to OpenAI API: {}", e));
                    }
                }
            };

        let status = response.status();
        debug!("OpenAI API response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            error!("OpenAI API error: Status {}, Details: {}", status, error_text);
            return Err(anyhow!("OpenAI API error: Status {}, Details: {}", status, error_text));
        }

        let response_json: Value = match response.json().await {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to parse OpenAI API response as JSON: {}", e);
                return Err(anyhow!("Failed to parse OpenAI API response: {}", e));
            }
        };

        let content = match response_json["choices"][0]["message"]["content"].as_str() {
            Some(content) => content,
            None => {
                error!("Could not extract content from OpenAI response: {:?}", response_json);
                return Err(anyhow!("Could not extract content from OpenAI response"));
            }
        };

        Ok(content.trim().to_string())
    }
}
