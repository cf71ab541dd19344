//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our DOM format.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use shady_dom::{DomTree, NodeId, ShadowRootMode};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML document
    pub fn parse(&self, html: &str) -> DomTree {
        tracing::debug!("Parsing HTML document ({} bytes)", html.len());

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut tree = DomTree::new();
        let root = tree.root();
        self.convert_children(&dom.document, &mut tree, root);

        tracing::debug!("Parsed {} nodes", tree.len());
        tree
    }

    fn convert_children(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        for child in handle.children.borrow().iter() {
            self.convert_node(child, tree, parent);
        }
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => self.convert_children(handle, tree, parent),
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    self.attach(tree, parent, id);
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                self.attach(tree, parent, id);
            }
            RcNodeData::Element {
                name,
                attrs,
                template_contents,
                ..
            } => {
                let local: &str = &name.local;

                if local == "template" {
                    let mode = attrs
                        .borrow()
                        .iter()
                        .find(|a| &*a.name.local == "shadowrootmode")
                        .and_then(|a| ShadowRootMode::from_attr(&a.value));

                    if let Some(mode) = mode {
                        match tree.attach_shadow(parent, mode) {
                            Ok(root) => {
                                if let Some(contents) = template_contents.borrow().as_ref() {
                                    self.convert_children(contents, tree, root);
                                }
                                return;
                            }
                            Err(e) => {
                                tracing::debug!("Keeping declarative template as element: {}", e);
                            }
                        }
                    }
                }

                let id = tree.create_element(local);
                for attr in attrs.borrow().iter() {
                    if let Err(e) = tree.set_attribute(id, &attr.name.local, &attr.value) {
                        tracing::warn!("Dropping attribute {}: {}", &*attr.name.local, e);
                    }
                }
                self.attach(tree, parent, id);
                self.convert_children(handle, tree, id);
            }
            // Doctype and processing instructions carry nothing we style
            _ => {}
        }
    }

    fn attach(&self, tree: &mut DomTree, parent: NodeId, child: NodeId) {
        if let Err(e) = tree.append_child(parent, child) {
            tracing::warn!("Failed to attach parsed node: {}", e);
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let tree = HtmlParser::new().parse("<div id=main part=label>Hello</div>");
        let div = tree
            .descendants(tree.root())
            .find(|&id| tree.tag_name(id) == Some("div"))
            .unwrap();

        assert_eq!(tree.get_attribute(div, "part"), Some("label"));
        assert_eq!(tree.text_content(div), "Hello");
    }

    #[test]
    fn test_declarative_shadow_root() {
        let html = r#"
            <x-host>
                <template shadowrootmode="open"><span part="inner">in</span></template>
                <p>light</p>
            </x-host>
        "#;
        let tree = HtmlParser::new().parse(html);
        let host = tree
            .descendants(tree.root())
            .find(|&id| tree.tag_name(id) == Some("x-host"))
            .unwrap();

        let root = tree.shadow_root(host).expect("shadow root attached");
        let parts = tree.query_attribute_all(root, "part");
        assert_eq!(parts.len(), 1);
        assert_eq!(tree.tag_name(parts[0]), Some("span"));

        // Light children stay light, shadow content is not a light descendant
        assert!(tree.query_attribute_all(host, "part").is_empty());
        assert!(tree.descendants(host).any(|id| tree.tag_name(id) == Some("p")));
    }
}
