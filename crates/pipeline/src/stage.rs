//! Stage Records
//!
//! One record per agent invocation during a run, in execution order.
//! Corrective-loop re-invocations get their own records.

use serde::{Deserialize, Serialize};

use sitesmith_core::StageStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRecord {
    /// Stage label shown in progress output, e.g. "Developer (fix 2)".
    pub name: String,
    /// Role that ran the stage.
    pub role: String,
    pub status: StageStatus,
    pub attempts: u32,
    pub duration_ms: f64,
}
