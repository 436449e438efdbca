//! Agent Executor
//!
//! Role-agnostic retry loop around a single provider call. Each attempt
//! renders the prompt from an immutable feedback history, so every attempt's
//! exact payload stays inspectable after the fact. Usage totals accumulate
//! across all attempts, failed ones included.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use sitesmith_core::AttemptObserver;
use sitesmith_llm::{GenerationOptions, LlmProvider};

use crate::context::AgentContext;
use crate::outcome::AgentOutcome;
use crate::role::AgentRole;

/// Validation feedback from one failed attempt.
#[derive(Debug, Clone)]
pub struct AttemptFeedback {
    pub attempt: u32,
    pub reason: String,
}

/// The user prompt as an immutable base plus accumulated feedback.
#[derive(Debug, Clone)]
pub struct PromptHistory {
    base: String,
    feedback: Vec<AttemptFeedback>,
}

impl PromptHistory {
    pub fn new(base: String) -> Self {
        Self {
            base,
            feedback: Vec::new(),
        }
    }

    pub fn push_feedback(&mut self, attempt: u32, reason: String) {
        self.feedback.push(AttemptFeedback { attempt, reason });
    }

    pub fn feedback(&self) -> &[AttemptFeedback] {
        &self.feedback
    }

    /// Render the payload for the next attempt: the base prompt followed by
    /// every validation failure so far.
    pub fn render(&self) -> String {
        let mut prompt = self.base.clone();
        for entry in &self.feedback {
            prompt.push_str("\n\nCRITICAL: Your previous attempt had this issue: ");
            prompt.push_str(&entry.reason);
            prompt.push_str("\nYou MUST fix this in your next response.");
        }
        prompt
    }
}

/// One role bound to a provider with a retry policy.
pub struct Agent {
    role: AgentRole,
    provider: Arc<dyn LlmProvider>,
    max_attempts: u32,
    options: GenerationOptions,
    backoff_unit: Duration,
    observer: Option<AttemptObserver>,
}

impl Agent {
    pub fn new(role: AgentRole, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            role,
            provider,
            max_attempts: 3,
            options: GenerationOptions::default(),
            backoff_unit: Duration::from_secs(1),
            observer: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Scale the retry backoff; tests pass `Duration::ZERO`.
    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    pub fn with_observer(mut self, observer: AttemptObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    /// Run the role against the provider, retrying on failure up to the
    /// attempt cap. Always returns an outcome; never panics on provider or
    /// validation errors.
    pub async fn execute(&self, input: &str, ctx: &AgentContext) -> AgentOutcome {
        let system_prompt = self.role.system_prompt();
        let mut history = PromptHistory::new(self.role.build_user_prompt(input, ctx));

        let mut input_tokens: u64 = 0;
        let mut output_tokens: u64 = 0;
        let mut cost_usd: f64 = 0.0;
        let mut latency_ms: f64 = 0.0;
        let mut raw_text = String::new();
        let mut last_output: Option<Value> = None;
        let mut last_error = String::new();

        for attempt in 1..=self.max_attempts {
            if let Some(observer) = &self.observer {
                observer(self.role.name(), attempt, self.max_attempts);
            }
            debug!(
                role = self.role.name(),
                attempt, max = self.max_attempts, "agent attempt"
            );

            let user_prompt = history.render();
            let response = self
                .provider
                .generate(system_prompt, &user_prompt, &self.options)
                .await;

            let response = match response {
                Ok(response) => response,
                Err(err) => {
                    warn!(
                        role = self.role.name(),
                        attempt,
                        error = %err,
                        "provider call failed"
                    );
                    last_error = err.to_string();
                    if attempt < self.max_attempts {
                        self.backoff(attempt).await;
                    }
                    continue;
                }
            };

            input_tokens += response.input_tokens;
            output_tokens += response.output_tokens;
            cost_usd += response.cost_usd;
            latency_ms += response.latency_ms;
            raw_text = response.text.clone();

            // Parsing failure is non-fatal: fall back to the raw text and
            // let validation produce the retry feedback.
            let parsed = match self.role.parse(&response.text) {
                Ok(value) => value,
                Err(reason) => {
                    debug!(
                        role = self.role.name(),
                        attempt,
                        reason = reason.as_str(),
                        "parse fallback"
                    );
                    Value::String(response.text.trim().to_string())
                }
            };

            match self.role.validate(&parsed) {
                Ok(()) => {
                    return AgentOutcome {
                        role: self.role.name().to_string(),
                        raw_text,
                        output: Some(parsed),
                        success: true,
                        error: None,
                        attempts: attempt,
                        input_tokens,
                        output_tokens,
                        cost_usd,
                        latency_ms,
                    };
                }
                Err(reason) => {
                    warn!(
                        role = self.role.name(),
                        attempt,
                        reason = reason.as_str(),
                        "validation failed"
                    );
                    last_error = reason.clone();
                    last_output = Some(parsed);
                    if attempt < self.max_attempts {
                        history.push_feedback(attempt, reason);
                        self.backoff(attempt).await;
                    }
                }
            }
        }

        AgentOutcome {
            role: self.role.name().to_string(),
            raw_text,
            output: last_output,
            success: false,
            error: Some(last_error),
            attempts: self.max_attempts,
            input_tokens,
            output_tokens,
            cost_usd,
            latency_ms,
        }
    }

    async fn backoff(&self, attempt: u32) {
        let factor = 2u32.saturating_pow(attempt).min(8);
        let delay = self.backoff_unit * factor;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
