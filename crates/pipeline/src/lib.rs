//! Sitesmith Pipeline
//!
//! The build orchestrator. Stages run in a fixed topology: Strategist, then
//! Copywriter and Art Director concurrently, then Developer, then a bounded
//! Reviewer/Developer corrective loop, then a best-effort SEO pass. A run
//! always yields a [`BuildOutcome`], whatever fails along the way.

pub mod orchestrator;
pub mod result;
pub mod stage;

// Re-export main types
pub use orchestrator::{AgentSet, BuildPipeline, PipelineSettings, TemplateSpec};
pub use result::{artifacts, BuildOutcome, RunTotals};
pub use stage::StageRecord;
