//! OpenAI Provider
//!
//! Implementation of the LlmProvider trait for OpenAI's chat completions API.

use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{map_transport_error, missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    compute_cost, GenerationOptions, LlmError, LlmResponse, LlmResult, PricingEntry,
    ProviderConfig,
};
use crate::http_client::build_http_client;

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Approximate token costs (USD per 1K tokens)
const OPENAI_PRICING: &[PricingEntry] = &[
    ("gpt-4o", 0.0025, 0.01),
    ("gpt-4o-mini", 0.00015, 0.0006),
    ("gpt-4-turbo", 0.01, 0.03),
    ("gpt-3.5-turbo", 0.0005, 0.0015),
    ("o1", 0.015, 0.06),
];

/// OpenAI provider
pub struct OpenAiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(config.timeout());
        Self { config, client }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL)
    }

    /// Build the request body for the API
    fn build_request_body(
        &self,
        system_prompt: &str,
        user_input: &str,
        options: &GenerationOptions,
    ) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "max_tokens": options.max_tokens,
            "temperature": options.temperature,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_input },
            ],
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_input: &str,
        options: &GenerationOptions,
    ) -> LlmResult<LlmResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("openai"))?;

        let body = self.build_request_body(system_prompt, user_input, options);
        let started = Instant::now();

        let response = self
            .client
            .post(self.base_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.config.timeout_secs))?;

        let status = response.status().as_u16();
        let body_text = response
            .text()
            .await
            .map_err(|e| map_transport_error(e, self.config.timeout_secs))?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "openai"));
        }

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        let parsed: OpenAiResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        let text = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse {
                message: "OpenAI returned no message content".to_string(),
            });
        }

        let (input_tokens, output_tokens) = parsed
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or((0, 0));

        Ok(LlmResponse {
            text,
            model: self.config.model.clone(),
            provider: self.name().to_string(),
            input_tokens,
            output_tokens,
            cost_usd: compute_cost(OPENAI_PRICING, &self.config.model, input_tokens, output_tokens),
            latency_ms,
        })
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
    usage: Option<ResponseUsage>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}
