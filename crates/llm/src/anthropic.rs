//! Anthropic Provider
//!
//! Implementation of the LlmProvider trait for Anthropic's messages API.

use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{map_transport_error, missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    compute_cost, GenerationOptions, LlmError, LlmResponse, LlmResult, PricingEntry,
    ProviderConfig,
};
use crate::http_client::build_http_client;

/// Default Anthropic API endpoint
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// API version header required by the messages API
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Approximate token costs (USD per 1K tokens)
const ANTHROPIC_PRICING: &[PricingEntry] = &[
    ("claude-3-5-sonnet-20240620", 0.003, 0.015),
    ("claude-3-5-haiku-20241022", 0.001, 0.005),
    ("claude-3-opus-20240229", 0.015, 0.075),
    ("claude-sonnet-4-20250514", 0.003, 0.015),
];

/// Anthropic provider
pub struct AnthropicProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(config.timeout());
        Self { config, client }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(ANTHROPIC_API_URL)
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
            "system": system_prompt,
            "messages": [
                { "role": "user", "content": user_input },
            ],
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
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
            .ok_or_else(|| missing_api_key_error("anthropic"))?;

        let body = self.build_request_body(system_prompt, user_input, options);
        let started = Instant::now();

        let response = self
            .client
            .post(self.base_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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
            return Err(parse_http_error(status, &body_text, "anthropic"));
        }

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        let parsed: AnthropicResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        let text: String = parsed
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(LlmError::EmptyResponse {
                message: "Anthropic returned no text content".to_string(),
            });
        }

        let (input_tokens, output_tokens) = parsed
            .usage
            .map(|u| (u.input_tokens, u.output_tokens))
            .unwrap_or((0, 0));

        Ok(LlmResponse {
            text,
            model: self.config.model.clone(),
            provider: self.name().to_string(),
            input_tokens,
            output_tokens,
            cost_usd: compute_cost(
                ANTHROPIC_PRICING,
                &self.config.model,
                input_tokens,
                output_tokens,
            ),
            latency_ms,
        })
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Option<ResponseUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseUsage {
    input_tokens: u64,
    output_tokens: u64,
}
