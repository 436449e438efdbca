//! Build Outcome
//!
//! The aggregated result of one pipeline run. A run always produces one of
//! these, failed or not; partial artifacts stay attached for diagnostics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sitesmith_agents::AgentOutcome;

use crate::stage::StageRecord;

/// Artifact keys used in [`BuildOutcome::artifacts`].
pub mod artifacts {
    pub const STRATEGY: &str = "strategy";
    pub const COPY: &str = "copy";
    pub const DESIGN: &str = "design";
    /// The HTML document as last produced by the Developer, before the SEO
    /// pass. The final deliverable lives in `BuildOutcome::html`.
    pub const DOCUMENT: &str = "document";
}

/// Usage totals summed over every agent invocation in a run, failed
/// attempts included.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTotals {
    pub tokens: u64,
    pub cost_usd: f64,
    pub duration_ms: f64,
}

impl RunTotals {
    pub fn add(&mut self, outcome: &AgentOutcome) {
        self.tokens += outcome.total_tokens();
        self.cost_usd += outcome.cost_usd;
        self.duration_ms += outcome.latency_ms;
    }
}

/// Everything a pipeline run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutcome {
    pub success: bool,
    /// Final deliverable; empty when the run halted before the Developer.
    pub html: String,
    /// Named intermediate artifacts, keyed by [`artifacts`] constants.
    pub artifacts: HashMap<String, Value>,
    /// The last checker report seen, when the corrective loop ran.
    pub review_report: Option<Value>,
    /// Agent invocations in execution order.
    pub stages: Vec<StageRecord>,
    pub totals: RunTotals,
    /// Number of Developer re-invocations performed by the corrective loop.
    pub fix_iterations: u32,
    pub error: Option<String>,
}

impl BuildOutcome {
    pub fn empty() -> Self {
        Self {
            success: false,
            html: String::new(),
            artifacts: HashMap::new(),
            review_report: None,
            stages: Vec::new(),
            totals: RunTotals::default(),
            fix_iterations: 0,
            error: None,
        }
    }
}
