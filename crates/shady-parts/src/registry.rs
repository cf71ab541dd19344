//! Registry of `::part()` rules that consume custom properties
//!
//! Rules without `var()` references can be rewritten once when a template is
//! prepared. Rules with them depend on values that differ per host instance,
//! so they are kept here and materialized while scoping.

use std::collections::{BTreeSet, HashMap};

use shady_css::{Rule, Stylesheet, collect_consumed_properties};

use crate::selector::{PartSelector, parse_part_selector};

/// A template rule targeting a part and consuming custom properties
#[derive(Debug, Clone)]
pub struct PartRule {
    pub rule: Rule,
    pub selector: PartSelector,
    /// Custom properties referenced by the declarations
    pub consumed: BTreeSet<String>,
}

/// `(template element, custom element, raw part list)`
type RuleKey = (String, String, String);

/// Part rules indexed by the scope pair they style
#[derive(Debug, Default)]
pub struct PartRuleRegistry {
    rules: HashMap<RuleKey, Vec<PartRule>>,
}

impl PartRuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the custom-property `::part()` rules of `element_name`'s
    /// template stylesheet, returning how many were added
    pub fn prepare_template(&mut self, element_name: &str, stylesheet: &Stylesheet) -> usize {
        let mut added = 0;
        for rule in &stylesheet.rules {
            if !rule.selector.contains("::part") {
                continue;
            }
            let consumed = collect_consumed_properties(&rule.css_text);
            if consumed.is_empty() {
                continue;
            }
            let Some(selector) = parse_part_selector(&rule.selector) else {
                tracing::debug!("Skipping unscopable part rule `{}`", rule.selector);
                continue;
            };

            let key = (
                element_name.to_string(),
                selector.custom_element.clone(),
                selector.part_list.clone(),
            );
            self.rules.entry(key).or_default().push(PartRule {
                rule: rule.clone(),
                selector,
                consumed,
            });
            added += 1;
        }

        tracing::debug!("Registered {} custom property part rules for <{}>", added, element_name);
        added
    }

    /// Rules styling `part_name` of `scope` elements from `host_scope`'s
    /// template
    pub fn custom_property_rules_for_part(
        &self,
        host_scope: &str,
        scope: &str,
        part_name: &str,
    ) -> &[PartRule] {
        self.rules
            .get(&(host_scope.to_string(), scope.to_string(), part_name.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a rule has been registered for this selector of the template
    pub fn is_registered(&self, element_name: &str, rule: &Rule) -> bool {
        parse_part_selector(&rule.selector).is_some_and(|selector| {
            self.custom_property_rules_for_part(element_name, &selector.custom_element, &selector.part_list)
                .iter()
                .any(|registered| registered.rule == *rule)
        })
    }

    /// Total number of registered rules
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rules: &[(&str, &str)]) -> Stylesheet {
        Stylesheet {
            rules: rules.iter().map(|(s, t)| Rule::new(*s, *t)).collect(),
        }
    }

    #[test]
    fn test_only_custom_property_part_rules() {
        let mut registry = PartRuleRegistry::new();
        let stylesheet = sheet(&[
            ("x-b::part(b1)", "color: var(--fg)"),
            ("x-b::part(b1)", "background: var(--bg, white)"),
            ("x-b::part(b2)", "color: red"),
            (".plain", "color: var(--fg)"),
            ("::part(b1)", "color: var(--fg)"),
        ]);

        assert_eq!(registry.prepare_template("x-a", &stylesheet), 2);
        assert_eq!(registry.len(), 2);

        let rules = registry.custom_property_rules_for_part("x-a", "x-b", "b1");
        assert_eq!(rules.len(), 2);
        assert!(rules[1].consumed.contains("--bg"));
        assert!(registry.is_registered("x-a", &stylesheet.rules[0]));
        assert!(!registry.is_registered("x-a", &stylesheet.rules[2]));
    }

    #[test]
    fn test_missing_key() {
        let registry = PartRuleRegistry::new();
        assert!(registry.custom_property_rules_for_part("document", "x-a", "a1").is_empty());
        assert!(registry.is_empty());
    }
}
