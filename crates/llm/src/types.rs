//! LLM Types
//!
//! Shared data types for the provider layer: configuration, generation
//! options, the standardized response shape, and the provider error taxonomy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Supported provider backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Gemini,
    OpenAi,
    Anthropic,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::Gemini => write!(f, "gemini"),
            ProviderType::OpenAi => write!(f, "openai"),
            ProviderType::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// Configuration for a single provider instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Which backend to use
    pub provider: ProviderType,
    /// API key (None means unauthenticated, which every backend rejects)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model identifier, e.g. "gpt-4o" or "gemini-2.0-flash"
    pub model: String,
    /// Override for the API base URL (testing, compatible endpoints)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-call HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderType::Gemini,
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: None,
            timeout_secs: 120,
        }
    }
}

impl ProviderConfig {
    /// Per-call timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Per-call generation parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Maximum output size in tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: 8192,
            temperature: 0.7,
        }
    }
}

/// Standardized response from any provider. One per remote call attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    /// Generated text
    pub text: String,
    /// Model that produced the response
    pub model: String,
    /// Provider name
    pub provider: String,
    /// Prompt token count
    pub input_tokens: u64,
    /// Completion token count
    pub output_tokens: u64,
    /// Cost of this call in USD
    pub cost_usd: f64,
    /// Wall-clock latency in milliseconds
    pub latency_ms: f64,
}

/// Error types for provider operations.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LlmError {
    /// Authentication failed (invalid or missing API key)
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Rate limit or quota exceeded
    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after: Option<u32>,
    },

    /// Model not found or not available
    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    /// Invalid request (bad parameters)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Server error from the provider
    #[error("Server error: {message}")]
    ServerError {
        message: String,
        status: Option<u16>,
    },

    /// Network/connection error
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// The call exceeded the per-call timeout
    #[error("Timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Response body could not be parsed
    #[error("Parse error: {message}")]
    ParseError { message: String },

    /// Provider returned no usable text (e.g. safety-filtered)
    #[error("Empty response: {message}")]
    EmptyResponse { message: String },

    /// Other error
    #[error("Error: {message}")]
    Other { message: String },
}

/// Result type for provider operations
pub type LlmResult<T> = Result<T, LlmError>;

/// Per-model pricing entry: (model name, input USD per 1K tokens,
/// output USD per 1K tokens).
pub type PricingEntry = (&'static str, f64, f64);

/// Compute the cost of a call from a provider pricing table.
///
/// Unknown models cost zero rather than erroring; pricing tables are
/// approximate and advisory.
pub fn compute_cost(
    pricing: &[PricingEntry],
    model: &str,
    input_tokens: u64,
    output_tokens: u64,
) -> f64 {
    let (input_rate, output_rate) = pricing
        .iter()
        .find(|(name, _, _)| *name == model)
        .map(|(_, i, o)| (*i, *o))
        .unwrap_or((0.0, 0.0));
    (input_tokens as f64 * input_rate + output_tokens as f64 * output_rate) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_default() {
        let config = ProviderConfig::default();
        assert_eq!(config.provider, ProviderType::Gemini);
        assert_eq!(config.timeout_secs, 120);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_provider_config_serialization() {
        let config = ProviderConfig {
            provider: ProviderType::OpenAi,
            api_key: Some("sk-test".to_string()),
            model: "gpt-4o".to_string(),
            base_url: None,
            timeout_secs: 60,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ProviderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.model, "gpt-4o");
        assert_eq!(parsed.timeout_secs, 60);
    }

    #[test]
    fn test_error_display() {
        let err = LlmError::AuthenticationFailed {
            message: "bad key".to_string(),
        };
        assert_eq!(err.to_string(), "Authentication failed: bad key");

        let err = LlmError::Timeout { seconds: 30 };
        assert_eq!(err.to_string(), "Timed out after 30s");
    }

    #[test]
    fn test_compute_cost_known_model() {
        let pricing: &[PricingEntry] = &[("gpt-4o", 0.0025, 0.01)];
        let cost = compute_cost(pricing, "gpt-4o", 1000, 2000);
        assert!((cost - (0.0025 + 0.02)).abs() < 1e-9);
    }

    #[test]
    fn test_compute_cost_unknown_model_is_free() {
        let pricing: &[PricingEntry] = &[("gpt-4o", 0.0025, 0.01)];
        assert_eq!(compute_cost(pricing, "mystery-model", 1000, 1000), 0.0);
    }
}
