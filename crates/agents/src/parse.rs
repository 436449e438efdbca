//! Output Extraction Helpers
//!
//! Models wrap their output in markdown fences, commentary, or both. These
//! helpers pull the usable payload out of a raw completion. Extraction is
//! best-effort: when nothing matches, callers fall back to the trimmed raw
//! text and let validation decide.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json|html)?\s*\n?(.*?)\n?\s*```").expect("valid regex")
});

static HTML_DOCUMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(<!DOCTYPE html>.*?</html>)").expect("valid regex")
});

/// Extract the body of the first markdown code fence, if any.
pub fn extract_code_fence(raw: &str) -> Option<String> {
    CODE_FENCE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract the first top-level JSON object span (first `{` to last `}`).
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end > start {
        Some(&raw[start..=end])
    } else {
        None
    }
}

/// Parse a JSON payload from a raw completion, looking inside code fences
/// and surrounding commentary.
pub fn parse_json_payload(raw: &str) -> Result<Value, String> {
    let candidate = extract_code_fence(raw).unwrap_or_else(|| raw.to_string());
    let span = extract_json_object(&candidate).unwrap_or(candidate.trim());
    serde_json::from_str(span).map_err(|e| format!("invalid JSON: {}", e))
}

/// Extract a complete HTML document from a raw completion.
///
/// Tries a code fence first, then a bare `<!DOCTYPE html>...</html>` span,
/// then falls back to the trimmed raw text.
pub fn extract_html(raw: &str) -> String {
    if let Some(fenced) = extract_code_fence(raw) {
        return fenced;
    }
    if let Some(caps) = HTML_DOCUMENT.captures(raw) {
        if let Some(m) = caps.get(1) {
            return m.as_str().trim().to_string();
        }
    }
    raw.trim().to_string()
}

/// Render an artifact value as text: strings pass through, anything else
/// pretty-prints as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
