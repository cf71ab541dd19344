//! CSS Parser using lightningcss
//!
//! Parses CSS stylesheets into our internal representation.

use lightningcss::declaration::DeclarationBlock;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::{CssError, Rule, Stylesheet};

/// CSS Parser
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSS stylesheet
    pub fn parse(&self, css: &str) -> Result<Stylesheet, CssError> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default()).map_err(|e| {
            CssError::ParseError {
                line: e.loc.as_ref().map(|loc| loc.line + 1).unwrap_or(0),
                message: e.kind.to_string(),
            }
        })?;

        let mut result = Stylesheet::new();
        for rule in stylesheet.rules.0.iter() {
            self.convert_rule(rule, &mut result)?;
        }

        tracing::debug!("Parsed {} style rules", result.len());
        Ok(result)
    }

    fn convert_rule(&self, rule: &CssRule, out: &mut Stylesheet) -> Result<(), CssError> {
        match rule {
            CssRule::Style(style_rule) => {
                let selectors = style_rule
                    .selectors
                    .to_css_string(PrinterOptions::default())
                    .map_err(|e| CssError::Serialize {
                        what: "selector",
                        message: e.to_string(),
                    })?;
                let css_text = self.convert_declarations(&style_rule.declarations)?;

                for selector in split_selector_list(&selectors) {
                    out.rules.push(Rule::new(selector, css_text.clone()));
                }
                Ok(())
            }
            // Skip other rule types (media queries, keyframes, etc.)
            _ => Ok(()),
        }
    }

    fn convert_declarations(&self, declarations: &DeclarationBlock) -> Result<String, CssError> {
        let mut parts = Vec::new();

        for decl in declarations.declarations.iter() {
            parts.push(self.convert_declaration(decl, false)?);
        }
        for decl in declarations.important_declarations.iter() {
            parts.push(self.convert_declaration(decl, true)?);
        }

        Ok(parts.join("; "))
    }

    fn convert_declaration(
        &self,
        decl: &lightningcss::properties::Property,
        important: bool,
    ) -> Result<String, CssError> {
        decl.to_css_string(important, PrinterOptions::default())
            .map_err(|e| CssError::Serialize {
                what: "declaration",
                message: e.to_string(),
            })
    }
}

impl Default for CssParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a serialized selector list on top-level commas
fn split_selector_list(list: &str) -> Vec<String> {
    let mut selectors = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                selectors.push(list[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    selectors.push(list[start..].trim().to_string());
    selectors.retain(|s| !s.is_empty());
    selectors
}
