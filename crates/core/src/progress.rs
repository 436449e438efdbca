//! Progress Notification Types
//!
//! Shared observer types for pipeline and agent progress. Callbacks are plain
//! synchronous closures invoked from the orchestrating task; they must return
//! quickly and must never influence control flow.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a pipeline stage.
///
/// Transitions: `Waiting -> Running -> Done | Error`. A stage never returns
/// to `Waiting` and enters `Error` at most once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Not yet dispatched
    Waiting,
    /// Currently executing
    Running,
    /// Completed successfully
    Done,
    /// Failed (fatal for the stage; run-fatal unless the stage is best-effort)
    Error,
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageStatus::Waiting => write!(f, "waiting"),
            StageStatus::Running => write!(f, "running"),
            StageStatus::Done => write!(f, "done"),
            StageStatus::Error => write!(f, "error"),
        }
    }
}

/// Callback invoked by the orchestrator on every stage transition:
/// `(stage_name, status)`.
pub type StageCallback = Arc<dyn Fn(&str, StageStatus) + Send + Sync>;

/// Callback invoked by an agent before each attempt:
/// `(role_name, attempt, max_attempts)`.
pub type AttemptObserver = Arc<dyn Fn(&str, u32, u32) + Send + Sync>;
