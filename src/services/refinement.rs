//! Refinement Service
//!
//! Post-build operations against an existing deliverable: apply user
//! instructions to the current HTML, or generate A/B copy variants. Each is
//! one agent execution, no orchestration.

use serde_json::Value;

use sitesmith_agents::{keys, Agent, AgentContext, AgentOutcome};

pub struct RefinementService {
    refinement: Agent,
    variant: Agent,
}

impl RefinementService {
    pub fn new(refinement: Agent, variant: Agent) -> Self {
        Self {
            refinement,
            variant,
        }
    }

    /// Apply the user's instructions to the current HTML document.
    pub async fn refine(&self, html: &str, instructions: &str) -> AgentOutcome {
        let ctx = AgentContext::new().with(keys::HTML, Value::String(html.to_string()));
        self.refinement.execute(instructions, &ctx).await
    }

    /// Generate A/B test variants for existing website copy.
    pub async fn ab_variants(&self, copy: &str) -> AgentOutcome {
        let ctx = AgentContext::new().with(keys::COPY, Value::String(copy.to_string()));
        self.variant.execute("", &ctx).await
    }
}
