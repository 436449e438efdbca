//! Build Records
//!
//! The persisted shape of a completed run: deliverable, every intermediate
//! artifact, the last review report, and usage totals under one generated id.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use sitesmith_core::CoreResult;
use sitesmith_pipeline::{BuildOutcome, RunTotals, StageRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRecord {
    pub record_id: String,
    pub business_description: String,
    pub html: String,
    pub artifacts: HashMap<String, Value>,
    pub review_report: Option<Value>,
    pub stages: Vec<StageRecord>,
    pub totals: RunTotals,
    pub fix_iterations: u32,
    pub created_at: DateTime<Utc>,
}

impl BuildRecord {
    pub fn from_outcome(business_description: &str, outcome: &BuildOutcome) -> Self {
        Self {
            record_id: Uuid::new_v4().to_string(),
            business_description: business_description.to_string(),
            html: outcome.html.clone(),
            artifacts: outcome.artifacts.clone(),
            review_report: outcome.review_report.clone(),
            stages: outcome.stages.clone(),
            totals: outcome.totals.clone(),
            fix_iterations: outcome.fix_iterations,
            created_at: Utc::now(),
        }
    }

    pub fn save(&self, dir: &Path) -> CoreResult<()> {
        fs::create_dir_all(dir)?;
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(format!("{}.json", self.record_id)), raw)?;
        Ok(())
    }
}
