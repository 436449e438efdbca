//! LLM Provider Trait
//!
//! Defines the common interface for all LLM providers. The pipeline core only
//! ever talks to this trait; each backend owns its own request construction,
//! authentication, and pricing table.

use std::sync::Arc;

use async_trait::async_trait;

use super::types::{
    GenerationOptions, LlmError, LlmResponse, LlmResult, ProviderConfig, ProviderType,
};

/// Trait that all LLM providers must implement.
///
/// A provider turns (system prompt, user prompt, options) into generated text
/// plus usage metrics, or fails with a taxonomy error. Implementations must be
/// safe to call concurrently.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Generate a completion for the given prompts.
    ///
    /// # Arguments
    /// * `system_prompt` - Fixed role instruction
    /// * `user_input` - Request payload built by the caller
    /// * `options` - Per-call generation parameters
    async fn generate(
        &self,
        system_prompt: &str,
        user_input: &str,
        options: &GenerationOptions,
    ) -> LlmResult<LlmResponse>;
}

/// Helper function to create an error for a missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to map HTTP error status codes onto the error taxonomy
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}

/// Map a reqwest transport error onto the taxonomy, distinguishing timeouts.
pub fn map_transport_error(err: reqwest::Error, timeout_secs: u64) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout {
            seconds: timeout_secs,
        }
    } else {
        LlmError::NetworkError {
            message: err.to_string(),
        }
    }
}

/// Instantiate a provider from its configuration.
pub fn create_provider(config: ProviderConfig) -> LlmResult<Arc<dyn LlmProvider>> {
    Ok(match config.provider {
        ProviderType::Gemini => Arc::new(crate::gemini::GeminiProvider::new(config)),
        ProviderType::OpenAi => Arc::new(crate::openai::OpenAiProvider::new(config)),
        ProviderType::Anthropic => Arc::new(crate::anthropic::AnthropicProvider::new(config)),
    })
}
