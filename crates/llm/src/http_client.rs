//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with a per-call
//! timeout. A timed-out request surfaces as `LlmError::Timeout` via
//! `provider::map_transport_error` and is retried by the agent layer like any
//! other collaborator failure.

use std::time::Duration;

/// Build a `reqwest::Client` with the given request timeout.
pub fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("failed to build reqwest client")
}
