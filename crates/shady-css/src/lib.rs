//! Shady CSS - parsing and custom properties
//!
//! CSS parsing using lightningcss into a flat rule list of selector text and
//! declaration text, plus the custom property (variable) machinery that part
//! scoping consumes: the `var()` collector, a per-host cascade and a
//! fingerprinted style cache.

mod cascade;
mod parser;
pub mod style_cache;
pub mod variables;

pub use cascade::PropertyCascade;
pub use parser::CssParser;
pub use style_cache::{CacheStats, StyleCache};
pub use variables::{
    PropertyTable, apply_properties, collect_consumed_properties, parse_custom_declarations,
};

/// Parse a CSS stylesheet
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet, CssError> {
    CssParser::new().parse(css)
}

/// Parsed stylesheet
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// CSS style rule with a single selector.
///
/// Selector lists are split so that every rule carries exactly one complex
/// selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Serialized selector
    pub selector: String,
    /// Serialized declaration block, without braces
    pub css_text: String,
}

impl Rule {
    pub fn new(selector: impl Into<String>, css_text: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            css_text: css_text.into(),
        }
    }

    /// Serialize back to `selector { declarations }`
    pub fn to_css(&self) -> String {
        format!("{} {{ {} }}", self.selector, self.css_text)
    }
}

/// CSS parsing error
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: u32, message: String },

    #[error("Failed to serialize {what}: {message}")]
    Serialize { what: &'static str, message: String },
}
