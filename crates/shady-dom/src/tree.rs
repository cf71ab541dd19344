//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed; removed nodes simply become detached. Index 0 is
//! always the document node.

use crate::{DomError, Node, NodeData, NodeId, ShadowRootData, ShadowRootMode};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree (detached ones included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node is created up front
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, local_name: &str) -> NodeId {
        self.push(Node::element(local_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    // --- Structure ---

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// All descendants in document order, excluding `id` itself.
    ///
    /// Shadow roots are not children of their hosts, so the walk stays
    /// inside the tree `id` belongs to.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Check whether `ancestor` is `node` or one of its shadow-including
    /// ancestors (a shadow root steps to its host)
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.composed_parent(id);
        }
        false
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or append when `None`).
    ///
    /// A child that is already attached somewhere is moved.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        let parent_node = self.get(parent).ok_or(DomError::InvalidNode(parent))?;
        if matches!(parent_node.data, NodeData::Text(_) | NodeData::Comment(_)) {
            return Err(DomError::HierarchyRequest { parent, node: child });
        }
        let child_node = self.get(child).ok_or(DomError::InvalidNode(child))?;
        if matches!(child_node.data, NodeData::Document | NodeData::ShadowRoot(_))
            || self.is_inclusive_ancestor(child, parent)
        {
            return Err(DomError::HierarchyRequest { parent, node: child });
        }
        if let Some(reference) = reference {
            if reference == child {
                return Ok(());
            }
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild { parent, reference });
            }
        }

        self.detach(child);

        let prev = match reference {
            Some(reference) => self.nodes[reference.index()].prev_sibling,
            None => self.nodes[parent.index()].last_child,
        };
        let next = reference.unwrap_or(NodeId::NONE);

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }
        Ok(())
    }

    /// Remove `child` from `parent`, leaving it detached
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild {
                parent,
                reference: child,
            });
        }
        self.detach(child);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }
        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    // --- Shadow DOM ---

    /// Attach a shadow root to an element
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> Result<NodeId, DomError> {
        let element = self
            .get(host)
            .ok_or(DomError::InvalidNode(host))?
            .as_element()
            .ok_or(DomError::NotAnElement(host))?;
        if element.shadow_root.is_some() {
            return Err(DomError::ShadowRootExists(host));
        }

        let root = self.push(Node::shadow_root(ShadowRootData::new(host, mode)));
        if let Some(element) = self.nodes[host.index()].as_element_mut() {
            element.shadow_root = Some(root);
        }
        tracing::trace!("Attached {:?} shadow root {:?} to {:?}", mode, root, host);
        Ok(root)
    }

    /// Shadow root hosted by an element
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.get(host)?.as_element()?.shadow_root
    }

    /// Host of a shadow root (None for any other node)
    pub fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        self.get(root)?.as_shadow_root().map(|s| s.host)
    }

    /// Topmost light-tree ancestor: the document, a shadow root, or the top
    /// of a detached subtree
    pub fn root_node(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Check if `id` is the document node
    #[inline]
    pub fn is_document(&self, id: NodeId) -> bool {
        matches!(self.get(id).map(|n| &n.data), Some(NodeData::Document))
    }

    /// Parent in the composed tree: the light parent, or the host for a
    /// shadow root
    pub fn composed_parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).or_else(|| self.shadow_host(id))
    }

    // --- Elements and attributes ---

    /// Lowercase local name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.local_name.as_str())
    }

    /// Get an attribute value
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Check attribute presence
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Set an attribute, returning the previous value
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Result<Option<String>, DomError> {
        let element = self
            .get_mut(id)
            .ok_or(DomError::InvalidNode(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))?;
        Ok(element.attrs.set(name, value))
    }

    /// Remove an attribute, returning its value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.get_mut(id)?.as_element_mut()?.attrs.remove(name)
    }

    /// Elements below `scope` carrying attribute `name`, in document order
    pub fn query_attribute_all(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&id| self.has_attribute(id, name))
            .collect()
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|child| self.get(child).and_then(Node::as_text))
            .collect()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self
            .tree
            .get(current)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(current)
    }
}

/// Pre-order iterator over descendants
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            // Climb until a node with a next sibling, stopping at the root
            let mut n = current;
            loop {
                if n == self.root {
                    break NodeId::NONE;
                }
                let Some(nd) = self.tree.get(n) else {
                    break NodeId::NONE;
                };
                if nd.next_sibling.is_valid() {
                    break nd.next_sibling;
                }
                n = nd.parent;
                if !n.is_valid() {
                    break NodeId::NONE;
                }
            }
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let html = tree.create_element("HTML");
        let a = tree.create_element("div");
        let b = tree.create_element("span");
        let c = tree.create_element("p");
        tree.append_child(tree.root(), html).unwrap();
        tree.append_child(html, a).unwrap();
        tree.append_child(a, b).unwrap();
        tree.append_child(html, c).unwrap();
        (tree, html, a, b, c)
    }

    #[test]
    fn test_document_order() {
        let (tree, html, a, b, c) = sample();
        let order: Vec<_> = tree.descendants(tree.root()).collect();
        assert_eq!(order, vec![html, a, b, c]);
        assert_eq!(tree.tag_name(html), Some("html"));
    }

    #[test]
    fn test_descendants_stop_at_scope() {
        let (tree, _, a, b, _) = sample();
        let order: Vec<_> = tree.descendants(a).collect();
        assert_eq!(order, vec![b]);
    }

    #[test]
    fn test_insert_before_and_remove() {
        let (mut tree, html, a, _, c) = sample();
        let d = tree.create_element("section");
        tree.insert_before(html, d, Some(c)).unwrap();
        assert_eq!(tree.children(html).collect::<Vec<_>>(), vec![a, d, c]);

        tree.remove_child(html, a).unwrap();
        assert_eq!(tree.children(html).collect::<Vec<_>>(), vec![d, c]);
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.root_node(a), a);
    }

    #[test]
    fn test_insert_rejects_cycles() {
        let (mut tree, html, a, b, _) = sample();
        assert_eq!(
            tree.append_child(b, a),
            Err(DomError::HierarchyRequest { parent: b, node: a })
        );
        let stray = tree.create_element("i");
        assert_eq!(
            tree.insert_before(html, stray, Some(b)),
            Err(DomError::NotAChild { parent: html, reference: b })
        );
    }

    #[test]
    fn test_shadow_root_is_separate_tree() {
        let (mut tree, _, a, b, _) = sample();
        let root = tree.attach_shadow(a, ShadowRootMode::Open).unwrap();
        let inner = tree.create_element("em");
        tree.append_child(root, inner).unwrap();

        assert_eq!(tree.shadow_root(a), Some(root));
        assert_eq!(tree.shadow_host(root), Some(a));
        assert_eq!(tree.root_node(inner), root);
        assert_eq!(tree.composed_parent(root), Some(a));
        assert_eq!(tree.descendants(a).collect::<Vec<_>>(), vec![b]);
        assert_eq!(
            tree.attach_shadow(a, ShadowRootMode::Open),
            Err(DomError::ShadowRootExists(a))
        );
    }

    #[test]
    fn test_query_attribute_all() {
        let (mut tree, html, a, _, c) = sample();
        tree.set_attribute(c, "part", "x").unwrap();
        tree.set_attribute(a, "part", "y").unwrap();
        assert_eq!(tree.query_attribute_all(html, "part"), vec![a, c]);
        assert_eq!(tree.remove_attribute(a, "part"), Some("y".to_string()));
        assert_eq!(tree.query_attribute_all(html, "part"), vec![c]);
    }
}
