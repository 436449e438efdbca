//! Review Report and Fix Requests
//!
//! Typed view over the Reviewer's JSON report, plus the fix request handed
//! back to the Developer during the corrective loop. Deserialization is
//! lenient: unknown severities map to `Info` and missing fields default, so
//! a slightly off-shape report still drives the loop.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Critical,
    Warning,
    #[default]
    #[serde(other)]
    Info,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewIssue {
    pub severity: IssueSeverity,
    pub category: String,
    pub description: String,
    pub fix_suggestion: String,
}

/// Reviewer verdict over an HTML document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewReport {
    pub score: f64,
    #[serde(rename = "pass")]
    pub passed: bool,
    pub issues: Vec<ReviewIssue>,
    pub summary: String,
}

impl ReviewReport {
    /// Lenient parse from the reviewer's raw JSON output.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Issues worth a corrective pass: critical and warning severity.
    pub fn actionable_issues(&self) -> Vec<ReviewIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity != IssueSeverity::Info)
            .cloned()
            .collect()
    }
}

/// Instructions for the Developer's corrective re-invocation.
#[derive(Debug, Clone)]
pub struct FixRequest {
    pub issues: Vec<ReviewIssue>,
    pub current_html: String,
}

impl FixRequest {
    /// Render the fix request as the Developer's user input.
    pub fn to_prompt(&self) -> String {
        let mut lines = vec![
            "The code reviewer found issues in your HTML. Fix ALL of the following issues while keeping everything else intact:".to_string(),
            String::new(),
        ];
        for (idx, issue) in self.issues.iter().enumerate() {
            lines.push(format!(
                "{}. [{:?}] {}\n   Suggested fix: {}",
                idx + 1,
                issue.severity,
                issue.description,
                issue.fix_suggestion
            ));
        }
        lines.push(String::new());
        lines.push("Current HTML:".to_string());
        lines.push(self.current_html.clone());
        lines.push(String::new());
        lines.push(
            "Return the COMPLETE corrected HTML document. Start with <!DOCTYPE html> and end with </html>."
                .to_string(),
        );
        lines.join("\n")
    }
}
