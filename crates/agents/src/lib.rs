//! Sitesmith Agents
//!
//! The agent layer: each role pairs a fixed system prompt with an output
//! parser and validator, and the [`Agent`] executor drives the provider call
//! with retries, backoff, and feedback-augmented prompts.

pub mod agent;
pub mod context;
pub mod outcome;
pub mod parse;
pub mod prompts;
pub mod review;
pub mod role;

// Re-export main types
pub use agent::{Agent, AttemptFeedback, PromptHistory};
pub use context::{keys, AgentContext};
pub use outcome::AgentOutcome;
pub use review::{FixRequest, IssueSeverity, ReviewIssue, ReviewReport};
pub use role::AgentRole;
