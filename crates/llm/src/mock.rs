//! Mock Provider
//!
//! Scripted in-memory provider for tests. Each call pops the next scripted
//! result; when the script runs dry the fallback result (if any) repeats.
//! Every call is recorded so tests can assert on the prompts actually sent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::provider::LlmProvider;
use super::types::{GenerationOptions, LlmError, LlmResponse, LlmResult};

/// One recorded provider call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
}

/// Shared call-order log; useful for asserting cross-provider sequencing.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Scripted provider for tests.
pub struct MockProvider {
    label: String,
    model: String,
    script: Mutex<VecDeque<LlmResult<LlmResponse>>>,
    fallback: Option<LlmResult<LlmResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
    call_log: Option<CallLog>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create an empty-scripted mock. Without pushes or a fallback, every
    /// call fails with a script-exhausted error.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            model: "mock-model".to_string(),
            script: Mutex::new(VecDeque::new()),
            fallback: None,
            calls: Mutex::new(Vec::new()),
            call_log: None,
            delay: None,
        }
    }

    /// Queue a successful response with default usage numbers.
    pub fn push_text(self, text: impl Into<String>) -> Self {
        let response = Self::response(&self.model, text);
        self.push_result(Ok(response))
    }

    /// Queue an arbitrary response.
    pub fn push_response(self, response: LlmResponse) -> Self {
        self.push_result(Ok(response))
    }

    /// Queue an error.
    pub fn push_err(self, err: LlmError) -> Self {
        self.push_result(Err(err))
    }

    fn push_result(self, result: LlmResult<LlmResponse>) -> Self {
        self.script.lock().unwrap().push_back(result);
        self
    }

    /// Repeat this result once the script is exhausted.
    pub fn with_fallback(mut self, result: LlmResult<LlmResponse>) -> Self {
        self.fallback = Some(result);
        self
    }

    /// Mock that fails every call with the given error.
    pub fn always_err(label: impl Into<String>, err: LlmError) -> Self {
        Self::new(label).with_fallback(Err(err))
    }

    /// Mock that answers every call with the given text.
    pub fn always_text(label: impl Into<String>, text: impl Into<String>) -> Self {
        let mock = Self::new(label);
        let response = Self::response(&mock.model, text);
        mock.with_fallback(Ok(response))
    }

    /// Record call order into a shared log under this mock's label.
    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.call_log = Some(log);
        self
    }

    /// Sleep before answering, to exercise concurrency orderings.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Build a default successful response.
    pub fn response(model: &str, text: impl Into<String>) -> LlmResponse {
        LlmResponse {
            text: text.into(),
            model: model.to_string(),
            provider: "mock".to_string(),
            input_tokens: 10,
            output_tokens: 20,
            cost_usd: 0.001,
            latency_ms: 5.0,
        }
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_input: &str,
        _options: &GenerationOptions,
    ) -> LlmResult<LlmResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_input.to_string(),
        });
        if let Some(log) = &self.call_log {
            log.lock().unwrap().push(self.label.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.script.lock().unwrap().pop_front();
        match next.or_else(|| self.fallback.clone()) {
            Some(result) => result,
            None => Err(LlmError::Other {
                message: format!("mock script exhausted for {}", self.label),
            }),
        }
    }
}
