//! Agent Execution Outcome
//!
//! Uniform envelope returned by every agent run, success or failure. Usage
//! numbers are cumulative across all attempts, including failed ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of one agent execution (all attempts included).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentOutcome {
    /// Human-readable role name, e.g. "Art Director".
    pub role: String,
    /// Raw text of the last completion received, empty if no call succeeded.
    pub raw_text: String,
    /// Parsed output when the run succeeded.
    pub output: Option<Value>,
    pub success: bool,
    /// Failure description when the run did not succeed.
    pub error: Option<String>,
    /// Number of attempts actually made.
    pub attempts: u32,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_usd: f64,
    pub latency_ms: f64,
}

impl AgentOutcome {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}
