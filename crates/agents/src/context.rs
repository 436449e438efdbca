//! Shared Pipeline Context
//!
//! A string-keyed bag of upstream artifacts that each agent reads when
//! building its user prompt. Keys are defined in [`keys`] so producers and
//! consumers cannot drift apart.

use std::collections::HashMap;

use serde_json::Value;

/// Well-known context keys.
pub mod keys {
    /// Strategist output (plain text brief).
    pub const STRATEGY: &str = "strategy";
    /// Copywriter output (plain text copy).
    pub const COPY: &str = "copy";
    /// Art Director output (design JSON).
    pub const DESIGN: &str = "design";
    /// Current HTML document.
    pub const HTML: &str = "html";
    /// Template section list.
    pub const SECTIONS: &str = "sections";
    /// Original business description.
    pub const BUSINESS_DESCRIPTION: &str = "business_description";
    /// Template style hints for the Art Director.
    pub const TEMPLATE_HINT: &str = "template_hint";
    /// Section hint text for the Strategist and Copywriter.
    pub const SECTIONS_HINT: &str = "sections_hint";
    /// Output language name, e.g. "English" or "Spanish".
    pub const LANGUAGE: &str = "language";
    /// Text direction of the output language: "ltr" or "rtl".
    pub const TEXT_DIRECTION: &str = "text_direction";
}

/// Artifacts accumulated across pipeline stages.
#[derive(Debug, Clone, Default)]
pub struct AgentContext {
    values: HashMap<String, Value>,
}

impl AgentContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Value as text: strings pass through, other values render as JSON.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.values.get(key).map(crate::parse::value_text)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}
