use anyhow::{Result, Context};
use log::{info, warn};
use serde_json::Value;

use crate::services::{CompletionRequest, CompletionServiceTrait};

/// System prompt guiding Vega-Lite generation. The placeholder keeps row
/// data out of the specification; the client substitutes the real rows.
const SPEC_SYSTEM_PROMPT: &str = "You are a data visualization assistant responsible for generating Vega-Lite specifications. \
Please create a valid Vega-Lite JSON specification based on the user's request. \
Do not include actual data in the specification. Instead, use \"data\": {\"values\": \"myData\"} as a placeholder. \
Ensure the JSON adheres to the Vega-Lite schema.";

const DESCRIPTION_SYSTEM_PROMPT: &str = "You are a data visualization assistant responsible for providing descriptions of charts. \
Please create a concise and accurate description based on the user's request and the provided data samples.";

/// Appended to the raw reply when it cannot be parsed as JSON
pub const JSON_PARSE_NOTE: &str = "\nNote: The response could not be parsed as valid JSON.";

const SPEC_TEMPERATURE: f32 = 0.0;
const SPEC_MAX_TOKENS: u32 = 1000;
const DESCRIPTION_TEMPERATURE: f32 = 0.5;
const DESCRIPTION_MAX_TOKENS: u32 = 150;

/// Result of one specification-generation round
#[derive(Debug, Clone)]
pub enum SpecOutcome {
    /// The reply parsed as JSON
    Spec(Value),
    /// The reply was not valid JSON; carries the raw text with a note appended
    Unparsed(String),
}

/// Chart generation on top of a completion backend
#[derive(Clone, Debug)]
pub struct ChartService<C>
where
    C: CompletionServiceTrait + Clone + std::fmt::Debug,
{
    completion_service: C,
}

impl<C> ChartService<C>
where
    C: CompletionServiceTrait + Clone + std::fmt::Debug,
{
    pub fn new(completion_service: C) -> Self {
        Self { completion_service }
    }

    /// Ask the completion backend for a Vega-Lite specification. The prompt
    /// is forwarded verbatim and generation is deterministic (temperature 0).
    pub async fn generate_spec(&self, prompt: &str) -> Result<SpecOutcome> {
        let request = CompletionRequest {
            system_prompt: SPEC_SYSTEM_PROMPT.to_string(),
            user_prompt: prompt.to_string(),
            temperature: SPEC_TEMPERATURE,
            max_tokens: SPEC_MAX_TOKENS,
        };

        let reply = self.completion_service.complete(request).await?;

        match serde_json::from_str::<Value>(&reply) {
            Ok(spec) => {
                info!("Chart specification parsed as JSON");
                Ok(SpecOutcome::Spec(spec))
            }
            Err(e) => {
                warn!("Chart specification reply is not valid JSON: {}", e);
                Ok(SpecOutcome::Unparsed(format!("{}{}", reply, JSON_PARSE_NOTE)))
            }
        }
    }

    /// Generate a one-line description of a chart from the sample rows it
    /// was built from and the question that produced it.
    pub async fn describe(&self, sample_rows: &[Value], user_query: &str) -> Result<String> {
        let request = CompletionRequest {
            system_prompt: DESCRIPTION_SYSTEM_PROMPT.to_string(),
            user_prompt: build_description_prompt(sample_rows, user_query)?,
            temperature: DESCRIPTION_TEMPERATURE,
            max_tokens: DESCRIPTION_MAX_TOKENS,
        };

        let reply = self.completion_service.complete(request).await?;

        Ok(reply.lines().next().unwrap_or_default().to_string())
    }
}

fn build_description_prompt(sample_rows: &[Value], user_query: &str) -> Result<String> {
    let sample_json = serde_json::to_string(sample_rows)
        .context("Failed to serialize sample rows")?;

    Ok(format!(
        "Based on the sample data: {},\n\
         and the user's request: \"{}\",\n\
         please provide a brief description of the chart that was generated based on this request.\n\
         \n\
         The description should be similar to: \"This chart visualizes the relationship between weight and miles per gallon (MPG) of different car models, with points colored by the number of cylinders.\".\n\
         \n\
         Please return only the description without any additional text.",
        sample_json, user_query
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockCompletionService;
    use serde_json::json;

    #[tokio::test]
    async fn test_generate_spec_parses_json_reply() {
        let mock = MockCompletionService::replying(r#"{"mark": "bar"}"#);
        let service = ChartService::new(mock);

        let outcome = service.generate_spec("draw a bar chart of MPG").await.unwrap();
        match outcome {
            SpecOutcome::Spec(spec) => assert_eq!(spec, json!({"mark": "bar"})),
            SpecOutcome::Unparsed(text) => panic!("expected parsed spec, got: {}", text),
        }
    }

    #[tokio::test]
    async fn test_generate_spec_annotates_unparsable_reply() {
        let mock = MockCompletionService::replying("Sorry, I cannot help with that.");
        let service = ChartService::new(mock);

        let outcome = service.generate_spec("draw something").await.unwrap();
        match outcome {
            SpecOutcome::Unparsed(text) => assert_eq!(
                text,
                format!("Sorry, I cannot help with that.{}", JSON_PARSE_NOTE)
            ),
            SpecOutcome::Spec(spec) => panic!("expected unparsed text, got: {}", spec),
        }
    }

    #[tokio::test]
    async fn test_generate_spec_uses_deterministic_parameters() {
        let mock = MockCompletionService::replying("{}");
        let service = ChartService::new(mock.clone());

        service.generate_spec("plot weight").await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, 0.0);
        assert_eq!(calls[0].max_tokens, 1000);
        assert_eq!(calls[0].user_prompt, "plot weight");
        assert!(calls[0]
            .system_prompt
            .contains("use \"data\": {\"values\": \"myData\"} as a placeholder"));
    }

    #[tokio::test]
    async fn test_describe_returns_first_line_only() {
        let mock = MockCompletionService::replying(
            "This chart shows weight by origin.\nExtra detail line.",
        );
        let service = ChartService::new(mock);

        let description = service
            .describe(&[json!({"Weight": 3449})], "weight by origin")
            .await
            .unwrap();
        assert_eq!(description, "This chart shows weight by origin.");
    }

    #[tokio::test]
    async fn test_describe_embeds_samples_and_query() {
        let mock = MockCompletionService::replying("A chart.");
        let service = ChartService::new(mock.clone());

        let rows = vec![json!({"Weight": 3449, "MPG": 17.0})];
        service.describe(&rows, "weight vs MPG").await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, 0.5);
        assert_eq!(calls[0].max_tokens, 150);
        assert!(calls[0].user_prompt.contains(r#"[{"Weight":3449,"MPG":17.0}]"#));
        assert!(calls[0].user_prompt.contains("\"weight vs MPG\""));
    }

    #[tokio::test]
    async fn test_completion_failure_propagates() {
        let service = ChartService::new(MockCompletionService::failing());
        assert!(service.generate_spec("plot weight").await.is_err());
    }
}
