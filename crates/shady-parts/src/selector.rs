//! `::part()` selector matching
//!
//! Only selectors anchored on a custom element type are eligible:
//! `<pre><custom-element><post>::part(<names>)`. Anything else is reported as
//! "no match" and left alone.

use crate::specifier::PartTokens;

/// A decomposed `::part()` selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSelector {
    /// Everything before the custom element, trailing combinator included
    pub pre: String,
    /// Custom element tag the part belongs to
    pub custom_element: String,
    /// Compound selector suffix between the tag and `::part`
    pub post: String,
    /// Raw part name list inside the parentheses
    pub part_list: String,
}

impl PartSelector {
    /// Selector for the same element with `::part(...)` replaced by the
    /// attribute selectors of `part_list`, styled from `host_scope`
    pub fn scoped_selector(&self, tokens: &PartTokens<'_>, part_list: &str, host_scope: &str) -> String {
        format!(
            "{}{}{} {}",
            self.pre,
            self.custom_element,
            self.post,
            tokens.selector(part_list, &self.custom_element, host_scope)
        )
    }
}

/// Decompose a `::part()` selector, or `None` when it is not eligible
pub fn parse_part_selector(selector: &str) -> Option<PartSelector> {
    let selector = selector.trim();
    let body = selector.strip_suffix(')')?;
    let part_at = body.rfind("::part(")?;
    let part_list = body[part_at + "::part(".len()..].trim();
    if part_list.is_empty() || part_list.contains(['(', ')']) {
        return None;
    }

    let head = &body[..part_at];
    let compound_at = last_compound_start(head);
    let (pre, compound) = head.split_at(compound_at);

    let tag_len = compound
        .char_indices()
        .find(|&(_, c)| !is_tag_char(c))
        .map(|(i, _)| i)
        .unwrap_or(compound.len());
    let (tag, post) = compound.split_at(tag_len);

    if !tag.starts_with(|c: char| c.is_ascii_lowercase()) || !tag.contains('-') {
        return None;
    }
    if tag.chars().any(|c| c.is_ascii_uppercase()) {
        return None;
    }

    Some(PartSelector {
        pre: pre.to_string(),
        custom_element: tag.to_string(),
        post: post.to_string(),
        part_list: part_list.to_string(),
    })
}

/// Rewrite a template's `::part()` selector into attribute selectors scoped
/// to `element_name`
pub fn rewrite_part_rule_selector(element_name: &str, selector: &str) -> Option<String> {
    let parsed = parse_part_selector(selector)?;
    Some(parsed.scoped_selector(&PartTokens::DEFAULT, &parsed.part_list, element_name))
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// Byte offset where the last compound selector of `head` starts
fn last_compound_start(head: &str) -> usize {
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in head.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if depth == 0 && (c.is_whitespace() || matches!(c, '>' | '+' | '~')) => {
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_custom_element() {
        assert_eq!(
            parse_part_selector("x-a::part(foo)"),
            Some(PartSelector {
                pre: String::new(),
                custom_element: "x-a".to_string(),
                post: String::new(),
                part_list: "foo".to_string(),
            })
        );
    }

    #[test]
    fn test_rejects_unanchored() {
        assert_eq!(parse_part_selector("::part(foo)"), None);
        assert_eq!(parse_part_selector(".cls::part(foo)"), None);
        assert_eq!(parse_part_selector("[x]::part(foo)"), None);
        assert_eq!(parse_part_selector("div::part(foo)"), None);
        assert_eq!(parse_part_selector("X-A::part(foo)"), None);
        assert_eq!(parse_part_selector("x-a::part()"), None);
        assert_eq!(parse_part_selector("x-a .inner"), None);
    }

    #[test]
    fn test_prefix_and_suffix() {
        let parsed = parse_part_selector(".cls x-a::part(foo)").unwrap();
        assert_eq!(parsed.pre, ".cls ");
        assert_eq!(parsed.custom_element, "x-a");

        let parsed = parse_part_selector("main > x-tab.active[open]::part(label icon)").unwrap();
        assert_eq!(parsed.pre, "main > ");
        assert_eq!(parsed.custom_element, "x-tab");
        assert_eq!(parsed.post, ".active[open]");
        assert_eq!(parsed.part_list, "label icon");
    }

    #[test]
    fn test_rewrite() {
        assert_eq!(
            rewrite_part_rule_selector("x-b", "x-c::part(c1)").as_deref(),
            Some("x-c [shady-part~=\"part_x-b_x-c_c1\"]")
        );
        assert_eq!(rewrite_part_rule_selector("x-b", "::part(c1)"), None);
    }
}
