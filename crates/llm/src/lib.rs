//! Sitesmith LLM
//!
//! Provides a unified interface for interacting with multiple LLM providers:
//! - Google Gemini (generateContent, with free-tier request spacing)
//! - OpenAI (chat completions)
//! - Anthropic Claude (messages)
//!
//! Also includes the HTTP client factory, a minimum-interval rate limiter,
//! and a content-hash response cache that can wrap any provider.

pub mod anthropic;
pub mod cache;
pub mod gemini;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod rate_limit;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

// Re-export main types
pub use anthropic::AnthropicProvider;
pub use cache::{CachingProvider, ResponseCache};
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use openai::OpenAiProvider;
pub use provider::{create_provider, LlmProvider};
pub use rate_limit::RateLimiter;
pub use types::*;
