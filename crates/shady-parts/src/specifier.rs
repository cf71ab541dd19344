//! Part specifiers
//!
//! A specifier names one part as seen from one stylesheet context:
//! `hostScope_scope_partName`. Elements carry specifiers as `part_`-prefixed
//! tokens in their shady-part attribute, and generated selectors match those
//! tokens with `[shady-part~="..."]`.

use std::fmt;

use shady_dom::{DomTree, NodeId};

use crate::attr::parse_part_attribute;

/// Attribute receiving part tokens
pub const SHADY_PART_ATTRIBUTE: &str = "shady-part";

/// Prefix of every part token
pub const PART_TOKEN_PREFIX: &str = "part_";

/// Name of the top-level document scope
pub const DOCUMENT_SCOPE: &str = "document";

/// Stylesheet context: the document, or a custom element's template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Document,
    Element(String),
}

impl Scope {
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element(tag.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Document => DOCUMENT_SCOPE,
            Self::Element(tag) => tag,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope whose stylesheet styles the children of `root`: the document for
/// the document node, the host's tag for a shadow root, and nothing for a
/// detached subtree
pub fn scope_for_root(tree: &DomTree, root: NodeId) -> Option<Scope> {
    if tree.is_document(root) {
        return Some(Scope::Document);
    }
    let host = tree.shadow_host(root)?;
    tree.tag_name(host).map(Scope::element)
}

/// `host_scope_scope_part_name`, verbatim
pub fn format_part_specifier(part_name: &str, scope: &str, host_scope: &str) -> String {
    format!("{host_scope}_{scope}_{part_name}")
}

/// Compound attribute selector requiring every part of `part_name_list`
pub fn format_part_selector(part_name_list: &str, scope: &str, host_scope: &str) -> String {
    PartTokens::DEFAULT.selector(part_name_list, scope, host_scope)
}

/// Attach a specifier to an element
pub fn add_part_specifier(tree: &mut DomTree, element: NodeId, specifier: &str) {
    PartTokens::DEFAULT.add(tree, element, specifier);
}

/// Strip every specifier from an element
pub fn remove_all_part_specifiers(tree: &mut DomTree, element: NodeId) {
    PartTokens::DEFAULT.remove_all(tree, element);
}

/// Tokens currently attached to an element
pub fn part_specifiers(tree: &DomTree, element: NodeId) -> Vec<String> {
    PartTokens::DEFAULT.read(tree, element)
}

/// Attribute name and token prefix used to store specifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartTokens<'a> {
    pub attribute: &'a str,
    pub prefix: &'a str,
}

impl PartTokens<'static> {
    pub const DEFAULT: Self = Self {
        attribute: SHADY_PART_ATTRIBUTE,
        prefix: PART_TOKEN_PREFIX,
    };
}

impl PartTokens<'_> {
    /// Attribute token for a specifier
    pub fn token(&self, specifier: &str) -> String {
        format!("{}{}", self.prefix, specifier)
    }

    /// `[attr~="token"]` for every name in the list, concatenated
    pub fn selector(&self, part_name_list: &str, scope: &str, host_scope: &str) -> String {
        parse_part_attribute(Some(part_name_list))
            .iter()
            .map(|name| {
                let specifier = format_part_specifier(name, scope, host_scope);
                format!("[{}~=\"{}\"]", self.attribute, self.token(&specifier))
            })
            .collect()
    }

    /// Append a specifier's token, keeping order and skipping duplicates.
    ///
    /// Repeated names (`part="a a"`, `exportparts="p:q,p:q"`) therefore add
    /// a token once; `~=` matching makes a second copy meaningless.
    pub fn add(&self, tree: &mut DomTree, element: NodeId, specifier: &str) {
        let token = self.token(specifier);
        let value = match tree.get_attribute(element, self.attribute) {
            Some(current) if current.split_whitespace().any(|t| t == token) => return,
            Some(current) if !current.trim().is_empty() => format!("{} {}", current.trim_end(), token),
            _ => token,
        };
        if let Err(e) = tree.set_attribute(element, self.attribute, &value) {
            tracing::warn!("Cannot attach part specifier {}: {}", specifier, e);
        }
    }

    /// Remove the token attribute entirely
    pub fn remove_all(&self, tree: &mut DomTree, element: NodeId) {
        tree.remove_attribute(element, self.attribute);
    }

    /// Tokens in attachment order
    pub fn read(&self, tree: &DomTree, element: NodeId) -> Vec<String> {
        parse_part_attribute(tree.get_attribute(element, self.attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shady_dom::ShadowRootMode;

    #[test]
    fn test_format_part_specifier() {
        assert_eq!(format_part_specifier("x", "a", "b"), "b_a_x");
        assert_eq!(format_part_specifier("Label", "x-b", "document"), "document_x-b_Label");
    }

    #[test]
    fn test_format_part_selector() {
        assert_eq!(
            format_part_selector("a  b", "x-b", "x-a"),
            "[shady-part~=\"part_x-a_x-b_a\"][shady-part~=\"part_x-a_x-b_b\"]"
        );
        assert_eq!(format_part_selector("", "x-b", "x-a"), "");
    }

    #[test]
    fn test_add_and_remove() {
        let mut tree = DomTree::new();
        let el = tree.create_element("div");

        add_part_specifier(&mut tree, el, "document_x-a_a1");
        add_part_specifier(&mut tree, el, "x-a_x-b_b1");
        add_part_specifier(&mut tree, el, "document_x-a_a1");
        assert_eq!(
            tree.get_attribute(el, SHADY_PART_ATTRIBUTE),
            Some("part_document_x-a_a1 part_x-a_x-b_b1")
        );
        assert_eq!(part_specifiers(&tree, el).len(), 2);

        remove_all_part_specifiers(&mut tree, el);
        assert!(part_specifiers(&tree, el).is_empty());
        assert!(!tree.has_attribute(el, SHADY_PART_ATTRIBUTE));
    }

    #[test]
    fn test_scope_for_root() {
        let mut tree = DomTree::new();
        let host = tree.create_element("x-host");
        assert_eq!(scope_for_root(&tree, tree.root()), Some(Scope::Document));
        assert_eq!(scope_for_root(&tree, host), None);

        let root = tree.attach_shadow(host, ShadowRootMode::Open).unwrap();
        assert_eq!(scope_for_root(&tree, root), Some(Scope::element("x-host")));
        assert_eq!(Scope::Document.to_string(), "document");
    }
}
