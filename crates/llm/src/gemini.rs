//! Gemini Provider
//!
//! Implementation of the LlmProvider trait for Google's Gemini API
//! (generateContent). The free tier throttles at ~15 requests/minute, so this
//! provider composes a `RateLimiter` that spaces calls 4 seconds apart.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{map_transport_error, missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    compute_cost, GenerationOptions, LlmError, LlmResponse, LlmResult, PricingEntry,
    ProviderConfig,
};
use crate::http_client::build_http_client;
use crate::rate_limit::RateLimiter;

/// Default Gemini API base (model and key are appended per request)
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Free tier: ~15 RPM
const MIN_CALL_INTERVAL: Duration = Duration::from_secs(4);

/// Approximate token costs (USD per 1K tokens)
const GEMINI_PRICING: &[PricingEntry] = &[
    ("gemini-2.0-flash", 0.0, 0.0), // Free tier
    ("gemini-2.0-flash-lite", 0.0, 0.0),
    ("gemini-1.5-pro", 0.00125, 0.005),
];

/// Gemini provider with built-in request spacing.
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the default rate limiter.
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_rate_limiter(config, RateLimiter::new(MIN_CALL_INTERVAL))
    }

    /// Create a provider with an explicit rate limiter.
    pub fn with_rate_limiter(config: ProviderConfig, rate_limiter: RateLimiter) -> Self {
        let client = build_http_client(config.timeout());
        Self {
            config,
            client,
            rate_limiter,
        }
    }

    /// Build the per-request URL: `{base}/{model}:generateContent?key={key}`
    fn request_url(&self, api_key: &str) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(GEMINI_API_URL);
        format!(
            "{}/{}:generateContent?key={}",
            base, self.config.model, api_key
        )
    }

    /// Build the request body for the API.
    ///
    /// Gemini has no separate system slot in this endpoint; the role
    /// instruction is prepended to the user text.
    fn build_request_body(
        &self,
        system_prompt: &str,
        user_input: &str,
        options: &GenerationOptions,
    ) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "parts": [{ "text": format!("{}\n\n{}", system_prompt, user_input) }],
            }],
            "generationConfig": {
                "maxOutputTokens": options.max_tokens,
                "temperature": options.temperature,
            },
        })
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
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
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        self.rate_limiter.acquire().await;

        let body = self.build_request_body(system_prompt, user_input, options);
        let started = Instant::now();

        let response = self
            .client
            .post(self.request_url(api_key))
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
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        let parsed: GeminiResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        let text: String = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            // Empty candidates usually mean the safety filter fired.
            return Err(LlmError::EmptyResponse {
                message: "Gemini returned an empty response, possibly blocked by safety filters"
                    .to_string(),
            });
        }

        let (input_tokens, output_tokens) = parsed
            .usage_metadata
            .map(|u| (u.prompt_token_count, u.candidates_token_count))
            .unwrap_or((0, 0));

        Ok(LlmResponse {
            text,
            model: self.config.model.clone(),
            provider: self.name().to_string(),
            input_tokens,
            output_tokens,
            cost_usd: compute_cost(GEMINI_PRICING, &self.config.model, input_tokens, output_tokens),
            latency_ms,
        })
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u64,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u64,
}
