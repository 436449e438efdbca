//! Agent Roles
//!
//! Each role bundles its system prompt, how its user prompt is assembled
//! from the shared context, how its raw completion is parsed, and what a
//! valid output looks like. The executor in `agent.rs` is role-agnostic and
//! drives everything through this enum.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::{keys, AgentContext};
use crate::parse::{extract_html, parse_json_payload};
use crate::prompts;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{3,8}$").expect("valid regex"));

/// Design JSON keys that must be present and carry a hex color.
const DESIGN_COLOR_KEYS: &[&str] = &[
    "primary_color",
    "secondary_color",
    "background_color",
    "text_color",
    "accent_color",
];

/// Design JSON keys that must be present as non-empty strings.
const DESIGN_FONT_KEYS: &[&str] = &["heading_font", "body_font"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Strategist,
    Copywriter,
    ArtDirector,
    Developer,
    Reviewer,
    SeoOptimizer,
    Refinement,
    AbVariant,
}

impl AgentRole {
    /// Display name used in progress reporting and outcome records.
    pub fn name(&self) -> &'static str {
        match self {
            AgentRole::Strategist => "Strategist",
            AgentRole::Copywriter => "Copywriter",
            AgentRole::ArtDirector => "Art Director",
            AgentRole::Developer => "Developer",
            AgentRole::Reviewer => "Reviewer",
            AgentRole::SeoOptimizer => "SEO Optimizer",
            AgentRole::Refinement => "Refinement",
            AgentRole::AbVariant => "A/B Variant",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            AgentRole::Strategist => prompts::STRATEGIST,
            AgentRole::Copywriter => prompts::COPYWRITER,
            AgentRole::ArtDirector => prompts::ART_DIRECTOR,
            AgentRole::Developer => prompts::DEVELOPER,
            AgentRole::Reviewer => prompts::REVIEWER,
            AgentRole::SeoOptimizer => prompts::SEO_OPTIMIZER,
            AgentRole::Refinement => prompts::REFINEMENT,
            AgentRole::AbVariant => prompts::AB_VARIANT,
        }
    }

    /// Assemble the user prompt from the caller's input and upstream
    /// artifacts. `input` carries the business description for the
    /// Strategist, refinement instructions for Refinement, and the fix
    /// request text for Developer re-invocations; for other roles it is
    /// usually empty and the context drives everything.
    pub fn build_user_prompt(&self, input: &str, ctx: &AgentContext) -> String {
        let mut parts: Vec<String> = Vec::new();

        match self {
            AgentRole::Strategist => {
                parts.push(format!("Business description:\n{}", input));
                if let Some(hint) = ctx.get_text(keys::SECTIONS_HINT) {
                    parts.push(hint);
                }
            }
            AgentRole::Copywriter => {
                if let Some(strategy) = ctx.get_text(keys::STRATEGY) {
                    parts.push(format!("Strategic brief:\n{}", strategy));
                }
                if let Some(hint) = ctx.get_text(keys::SECTIONS_HINT) {
                    parts.push(hint);
                }
            }
            AgentRole::ArtDirector => {
                if let Some(strategy) = ctx.get_text(keys::STRATEGY) {
                    parts.push(format!("Strategic brief:\n{}", strategy));
                }
                if let Some(hint) = ctx.get_text(keys::TEMPLATE_HINT) {
                    parts.push(format!("Template style hints: {}", hint));
                }
            }
            AgentRole::Developer => {
                // Corrective re-invocations pass the fix request as input;
                // it must lead the prompt so the model treats it as the task.
                if !input.is_empty() {
                    parts.push(input.to_string());
                }
                if let Some(copy) = ctx.get_text(keys::COPY) {
                    parts.push(format!("Website copy:\n{}", copy));
                }
                if let Some(design) = ctx.get_text(keys::DESIGN) {
                    parts.push(format!("Design JSON:\n{}", design));
                }
                if let Some(sections) = ctx.get_text(keys::SECTIONS) {
                    parts.push(format!("Sections to include, in order: {}", sections));
                }
            }
            AgentRole::Reviewer => {
                if let Some(html) = ctx.get_text(keys::HTML) {
                    parts.push(format!("HTML to review:\n{}", html));
                }
            }
            AgentRole::SeoOptimizer => {
                if let Some(desc) = ctx.get_text(keys::BUSINESS_DESCRIPTION) {
                    parts.push(format!("Business context:\n{}", desc));
                }
                if let Some(html) = ctx.get_text(keys::HTML) {
                    parts.push(format!("HTML to optimize:\n{}", html));
                }
            }
            AgentRole::Refinement => {
                if let Some(html) = ctx.get_text(keys::HTML) {
                    parts.push(format!("Current HTML:\n{}", html));
                }
                parts.push(format!("User instructions:\n{}", input));
            }
            AgentRole::AbVariant => {
                if let Some(copy) = ctx.get_text(keys::COPY) {
                    parts.push(format!("Original website copy:\n{}", copy));
                } else {
                    parts.push(input.to_string());
                }
            }
        }

        if let Some(instruction) = language_instruction(ctx) {
            parts.push(instruction);
        }

        parts.join("\n\n")
    }

    /// Parse the raw completion into this role's output shape.
    ///
    /// Text roles never fail; JSON roles report a parse error and HTML roles
    /// fall back to extraction heuristics, leaving validation to decide.
    pub fn parse(&self, raw: &str) -> Result<Value, String> {
        match self {
            AgentRole::Strategist | AgentRole::Copywriter => {
                Ok(Value::String(raw.trim().to_string()))
            }
            AgentRole::ArtDirector | AgentRole::Reviewer | AgentRole::AbVariant => {
                parse_json_payload(raw)
            }
            AgentRole::Developer | AgentRole::SeoOptimizer | AgentRole::Refinement => {
                Ok(Value::String(extract_html(raw)))
            }
        }
    }

    /// Check that a parsed output satisfies this role's contract. The error
    /// string is fed back verbatim into the next attempt's prompt.
    pub fn validate(&self, output: &Value) -> Result<(), String> {
        match self {
            AgentRole::Strategist | AgentRole::Copywriter => {
                let text = output.as_str().unwrap_or_default();
                if text.is_empty() {
                    Err("Output was empty".to_string())
                } else {
                    Ok(())
                }
            }
            AgentRole::ArtDirector => validate_design(output),
            AgentRole::Developer => validate_developer_html(output),
            AgentRole::Reviewer => validate_review(output),
            AgentRole::SeoOptimizer => validate_seo_html(output),
            AgentRole::Refinement => validate_refined_html(output),
            AgentRole::AbVariant => validate_variants(output),
        }
    }
}

/// Append an output-language instruction unless the target is English.
/// Right-to-left languages also get a text-direction sentence.
fn language_instruction(ctx: &AgentContext) -> Option<String> {
    let language = ctx.get_text(keys::LANGUAGE)?;
    if language.eq_ignore_ascii_case("english") {
        return None;
    }
    let mut instruction = format!(
        "IMPORTANT: Write ALL text content in {}. Keep code, attribute names, and technical identifiers in English.",
        language
    );
    let rtl = ctx
        .get_text(keys::TEXT_DIRECTION)
        .is_some_and(|dir| dir.eq_ignore_ascii_case("rtl"));
    if rtl {
        instruction.push_str(
            "\nText direction is RTL (right-to-left): set dir=\"rtl\" on the html tag and mirror the layout accordingly.",
        );
    }
    Some(instruction)
}

fn validate_design(output: &Value) -> Result<(), String> {
    let obj = output
        .as_object()
        .ok_or_else(|| "Design output must be a JSON object".to_string())?;
    for key in DESIGN_COLOR_KEYS {
        let color = obj
            .get(*key)
            .and_then(Value::as_str)
            .ok_or_else(|| format!("Missing required design key: {}", key))?;
        if !HEX_COLOR.is_match(color) {
            return Err(format!("Key {} must be a hex color, got: {}", key, color));
        }
    }
    for key in DESIGN_FONT_KEYS {
        let font = obj
            .get(*key)
            .and_then(Value::as_str)
            .ok_or_else(|| format!("Missing required design key: {}", key))?;
        if font.trim().is_empty() {
            return Err(format!("Key {} must not be empty", key));
        }
    }
    Ok(())
}

fn validate_developer_html(output: &Value) -> Result<(), String> {
    let html = output.as_str().unwrap_or_default();
    let lower = html.to_lowercase();
    if !lower.contains("<!doctype html>") {
        return Err("Missing <!DOCTYPE html> declaration".to_string());
    }
    if !lower.contains("</html>") {
        return Err("HTML document is incomplete, missing closing </html> tag".to_string());
    }
    if !lower.contains("tailwindcss") {
        return Err("Missing Tailwind CSS CDN script tag".to_string());
    }
    Ok(())
}

fn validate_review(output: &Value) -> Result<(), String> {
    let obj = output
        .as_object()
        .ok_or_else(|| "Review output must be a JSON object".to_string())?;
    for key in ["score", "pass", "issues"] {
        if !obj.contains_key(key) {
            return Err(format!("Review report missing key: {}", key));
        }
    }
    Ok(())
}

fn validate_seo_html(output: &Value) -> Result<(), String> {
    let html = output.as_str().unwrap_or_default();
    let lower = html.to_lowercase();
    if !lower.contains("</html>") {
        return Err("HTML document is incomplete, missing closing </html> tag".to_string());
    }
    if !lower.contains("<title>") {
        return Err("Missing <title> tag".to_string());
    }
    if !lower.contains("name=\"description\"") {
        return Err("Missing meta description tag".to_string());
    }
    Ok(())
}

fn validate_refined_html(output: &Value) -> Result<(), String> {
    let html = output.as_str().unwrap_or_default();
    if !html.to_lowercase().contains("</html>") {
        return Err("HTML document is incomplete, missing closing </html> tag".to_string());
    }
    Ok(())
}

fn validate_variants(output: &Value) -> Result<(), String> {
    let obj = output
        .as_object()
        .ok_or_else(|| "Variant output must be a JSON object".to_string())?;
    if !obj.contains_key("variants") {
        return Err("Variant output missing key: variants".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_design() -> Value {
        json!({
            "primary_color": "#2563eb",
            "secondary_color": "#1e40af",
            "background_color": "#ffffff",
            "text_color": "#111827",
            "accent_color": "#f59e0b",
            "heading_font": "Playfair Display",
            "body_font": "Inter"
        })
    }

    #[test]
    fn test_design_validation_passes() {
        assert!(AgentRole::ArtDirector.validate(&valid_design()).is_ok());
    }

    #[test]
    fn test_design_validation_rejects_bad_color() {
        let mut design = valid_design();
        design["primary_color"] = json!("blue");
        let err = AgentRole::ArtDirector.validate(&design).unwrap_err();
        assert!(err.contains("hex color"));
    }

    #[test]
    fn test_design_validation_rejects_missing_font() {
        let mut design = valid_design();
        design.as_object_mut().unwrap().remove("body_font");
        let err = AgentRole::ArtDirector.validate(&design).unwrap_err();
        assert!(err.contains("body_font"));
    }

    #[test]
    fn test_developer_validation() {
        let good = Value::String(
            "<!DOCTYPE html><html><head><script src=\"https://cdn.tailwindcss.com\"></script></head><body></body></html>".to_string(),
        );
        assert!(AgentRole::Developer.validate(&good).is_ok());

        let no_doctype = Value::String("<html></html>".to_string());
        let err = AgentRole::Developer.validate(&no_doctype).unwrap_err();
        assert_eq!(err, "Missing <!DOCTYPE html> declaration");
    }

    #[test]
    fn test_seo_validation_requires_meta() {
        let missing_desc = Value::String(
            "<!DOCTYPE html><html><head><title>Hi</title></head></html>".to_string(),
        );
        let err = AgentRole::SeoOptimizer.validate(&missing_desc).unwrap_err();
        assert!(err.contains("meta description"));
    }

    #[test]
    fn test_reviewer_parse_and_validate() {
        let raw = "```json\n{\"score\": 88, \"pass\": true, \"issues\": []}\n```";
        let parsed = AgentRole::Reviewer.parse(raw).unwrap();
        assert!(AgentRole::Reviewer.validate(&parsed).is_ok());
    }

    #[test]
    fn test_text_roles_trim_and_reject_empty() {
        let parsed = AgentRole::Strategist.parse("  brief  ").unwrap();
        assert_eq!(parsed, Value::String("brief".to_string()));
        assert!(AgentRole::Strategist.validate(&parsed).is_ok());
        assert!(AgentRole::Copywriter
            .validate(&Value::String(String::new()))
            .is_err());
    }

    #[test]
    fn test_developer_prompt_leads_with_fix_request() {
        let ctx = AgentContext::new()
            .with(keys::COPY, "headline copy")
            .with(keys::DESIGN, json!({"primary_color": "#123456"}));
        let prompt = AgentRole::Developer.build_user_prompt("Fix the nav bar", &ctx);
        let fix_pos = prompt.find("Fix the nav bar").unwrap();
        let copy_pos = prompt.find("headline copy").unwrap();
        assert!(fix_pos < copy_pos);
    }

    #[test]
    fn test_language_instruction_skipped_for_english() {
        let english = AgentContext::new().with(keys::LANGUAGE, "English");
        let prompt = AgentRole::Strategist.build_user_prompt("A bakery", &english);
        assert!(!prompt.contains("IMPORTANT: Write ALL text content"));

        let spanish = AgentContext::new().with(keys::LANGUAGE, "Spanish");
        let prompt = AgentRole::Strategist.build_user_prompt("A bakery", &spanish);
        assert!(prompt.contains("in Spanish"));
        assert!(!prompt.contains("RTL"));
    }

    #[test]
    fn test_rtl_direction_threaded_into_prompts() {
        let ctx = AgentContext::new()
            .with(keys::LANGUAGE, "Arabic")
            .with(keys::TEXT_DIRECTION, "rtl")
            .with(keys::COPY, "copy")
            .with(keys::DESIGN, json!({"primary_color": "#123456"}));

        let copywriter = AgentRole::Copywriter.build_user_prompt("", &ctx);
        assert!(copywriter.contains("in Arabic"));
        assert!(copywriter.contains("Text direction is RTL"));

        let developer = AgentRole::Developer.build_user_prompt("", &ctx);
        assert!(developer.contains("dir=\"rtl\""));
    }

    #[test]
    fn test_variant_validation() {
        let good = json!({"variants": {"headline": {"A": "x", "B": "y", "C": "z"}}});
        assert!(AgentRole::AbVariant.validate(&good).is_ok());
        let bad = json!({"rationale": "no variants"});
        assert!(AgentRole::AbVariant.validate(&bad).is_err());
    }
}
