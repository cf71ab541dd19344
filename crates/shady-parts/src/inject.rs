//! Style injection sinks
//!
//! Generated part rules are handed to a [`StyleInjector`]. The default
//! [`StyleRecorder`] only keeps them; [`StyleElementInjector`] writes them
//! into the tree as `<style>` elements.

use shady_dom::{DomTree, NodeId};

use crate::specifier::Scope;

/// Receiver of generated stylesheet text
pub trait StyleInjector {
    /// Add `css_text` for the stylesheet of `scope`
    fn inject(&mut self, tree: &mut DomTree, css_text: &str, scope: &Scope);
}

/// One injected stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedStyle {
    pub scope: Scope,
    pub css_text: String,
}

/// Injector keeping every sheet in injection order
#[derive(Debug, Default)]
pub struct StyleRecorder {
    styles: Vec<InjectedStyle>,
}

impl StyleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn styles(&self) -> &[InjectedStyle] {
        &self.styles
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Concatenated text of every sheet
    pub fn css_text(&self) -> String {
        self.styles
            .iter()
            .map(|s| s.css_text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl StyleInjector for StyleRecorder {
    fn inject(&mut self, _tree: &mut DomTree, css_text: &str, scope: &Scope) {
        self.styles.push(InjectedStyle {
            scope: scope.clone(),
            css_text: css_text.to_string(),
        });
    }
}

/// Attribute naming the scope a generated `<style>` belongs to
pub const STYLE_SCOPE_ATTRIBUTE: &str = "shady-scope";

/// Injector appending `<style>` elements to the document head
#[derive(Debug, Default)]
pub struct StyleElementInjector {
    injected: Vec<NodeId>,
}

impl StyleElementInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<style>` elements created so far
    pub fn injected(&self) -> &[NodeId] {
        &self.injected
    }

    /// `<head>`, else the document element, else the document itself
    fn container(tree: &DomTree) -> NodeId {
        let root = tree.root();
        tree.descendants(root)
            .find(|&id| tree.tag_name(id) == Some("head"))
            .or_else(|| tree.children(root).find(|&id| tree.get(id).is_some_and(|n| n.is_element())))
            .unwrap_or(root)
    }
}

impl StyleInjector for StyleElementInjector {
    fn inject(&mut self, tree: &mut DomTree, css_text: &str, scope: &Scope) {
        let style = tree.create_element("style");
        let text = tree.create_text(css_text);
        let container = Self::container(tree);

        let result = tree
            .set_attribute(style, STYLE_SCOPE_ATTRIBUTE, scope.as_str())
            .and_then(|_| tree.append_child(style, text))
            .and_then(|_| tree.append_child(container, style));

        match result {
            Ok(()) => self.injected.push(style),
            Err(e) => tracing::warn!("Failed to inject part styles for {}: {}", scope, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_order() {
        let mut tree = DomTree::new();
        let mut recorder = StyleRecorder::new();
        recorder.inject(&mut tree, "a { color: red }", &Scope::Document);
        recorder.inject(&mut tree, "b { color: blue }", &Scope::element("x-a"));

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.styles()[1].scope, Scope::element("x-a"));
        assert_eq!(recorder.css_text(), "a { color: red }\nb { color: blue }");
    }

    #[test]
    fn test_style_element_goes_to_head() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        tree.append_child(root, html).unwrap();
        tree.append_child(html, head).unwrap();

        let mut injector = StyleElementInjector::new();
        injector.inject(&mut tree, "x-a [shady-part~=\"p\"] { color: red }", &Scope::Document);

        let style = injector.injected()[0];
        assert_eq!(tree.parent(style), Some(head));
        assert_eq!(tree.get_attribute(style, STYLE_SCOPE_ATTRIBUTE), Some("document"));
        assert_eq!(tree.text_content(style), "x-a [shady-part~=\"p\"] { color: red }");
    }

    #[test]
    fn test_style_element_without_head() {
        let mut tree = DomTree::new();
        let mut injector = StyleElementInjector::new();
        injector.inject(&mut tree, "p { }", &Scope::Document);
        assert_eq!(tree.parent(injector.injected()[0]), Some(tree.root()));
    }
}
