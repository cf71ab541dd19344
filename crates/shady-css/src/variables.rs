//! CSS Custom Properties (Variables) Module
//!
//! Collects `var()` references, parses `--name: value` declarations and
//! substitutes resolved values back into declaration text.

use std::collections::{BTreeMap, BTreeSet};

/// Resolved custom property values, ordered by name
pub type PropertyTable = BTreeMap<String, String>;

/// Nesting limit for var() substitution through property values
const MAX_SUBSTITUTION_DEPTH: usize = 16;

/// Names of all custom properties referenced through `var()` in `css_text`,
/// fallbacks included.
pub fn collect_consumed_properties(css_text: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut rest = css_text;

    while let Some(start) = rest.find("var(") {
        let after = rest[start + 4..].trim_start();
        let name = read_custom_ident(after);
        if !name.is_empty() {
            names.insert(name.to_string());
        }
        rest = &rest[start + 4..];
    }

    names
}

/// Parse `--name: value` declarations, ignoring everything else.
///
/// Later declarations of the same name win.
pub fn parse_custom_declarations(text: &str) -> Vec<(String, String)> {
    let mut result: Vec<(String, String)> = Vec::new();

    for decl in split_top_level(text, ';') {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if !name.starts_with("--") || name.len() == 2 || value.is_empty() {
            continue;
        }
        result.retain(|(n, _)| n != name);
        result.push((name.to_string(), value.to_string()));
    }

    result
}

/// Substitute `var(--name[, fallback])` references using `table`.
///
/// Unknown properties fall back to their fallback, or to nothing.
pub fn apply_properties(css_text: &str, table: &PropertyTable) -> String {
    substitute(css_text, table, 0)
}

fn substitute(text: &str, table: &PropertyTable, depth: usize) -> String {
    if depth > MAX_SUBSTITUTION_DEPTH {
        tracing::warn!("var() substitution nested too deeply, giving up");
        return String::new();
    }

    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("var(") {
        result.push_str(&rest[..start]);
        let body_start = start + 4;
        let Some(len) = matching_paren(&rest[body_start..]) else {
            // Malformed var(), keep the remainder untouched
            result.push_str(&rest[start..]);
            return result;
        };
        let body = &rest[body_start..body_start + len];
        let (name, fallback) = match split_top_level(body, ',').first() {
            Some(first) if first.len() < body.len() => {
                (first.trim(), Some(body[first.len() + 1..].trim()))
            }
            _ => (body.trim(), None),
        };

        match (table.get(name), fallback) {
            (Some(value), _) => result.push_str(&substitute(value, table, depth + 1)),
            (None, Some(fallback)) => result.push_str(&substitute(fallback, table, depth + 1)),
            (None, None) => {}
        }
        rest = &rest[body_start + len + 1..];
    }

    result.push_str(rest);
    result
}

/// Length of the text up to the `)` closing an already opened paren
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn read_custom_ident(text: &str) -> &str {
    if !text.starts_with("--") {
        return "";
    }
    let end = text
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}
