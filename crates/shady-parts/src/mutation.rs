//! Mutation hooks
//!
//! The embedder reports DOM changes through these hooks, or performs them
//! through the helpers at the bottom which mutate the tree and dispatch the
//! matching hook.

use shady_dom::{DomTree, NodeId};

use crate::error::PartsError;
use crate::inject::StyleInjector;
use crate::scoper::ShadowParts;

impl<I: StyleInjector> ShadowParts<I> {
    /// A `<style>` inside `host`'s shadow tree changed; rescope on the next
    /// frame
    pub fn on_style_element(&mut self, host: NodeId) {
        tracing::trace!("Queueing rescope of {:?}", host);
        self.frames.request(host);
    }

    /// Run the rescopes queued before this frame started, returning how
    /// many ran
    pub fn run_animation_frame(&mut self, tree: &mut DomTree) -> usize {
        let hosts = self.frames.take_frame();
        for &host in &hosts {
            self.scope_all_host_parts(tree, host);
        }
        if !hosts.is_empty() {
            tracing::debug!(
                "Frame {} rescoped {} hosts",
                self.frames.frame_count(),
                hosts.len()
            );
        }
        hosts.len()
    }

    /// `node` was inserted under `parent`
    pub fn on_insert_before(&mut self, tree: &mut DomTree, parent: NodeId, node: NodeId) {
        let root = tree.root_node(node);
        if let Some(host) = tree.shadow_host(root) {
            tracing::trace!("Node {:?} inserted under {:?} in shadow of {:?}", node, parent, host);
            self.rescope_recursive(tree, host);
        }
    }

    /// An element's `part` attribute changed.
    ///
    /// Call after the attribute is written: `new` only decides whether the
    /// tokens are stripped, the part names are read back from the tree.
    pub fn on_part_attribute_changed(
        &mut self,
        tree: &mut DomTree,
        element: NodeId,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        tracing::trace!("part of {:?}: {:?} -> {:?}", element, old, new);
        if new.is_none_or(|value| value.trim().is_empty()) {
            self.config.tokens().remove_all(tree, element);
            return;
        }
        self.scope_single_element(tree, element);
    }

    /// An element's `exportparts` attribute changed
    pub fn on_export_parts_attribute_changed(
        &mut self,
        tree: &mut DomTree,
        element: NodeId,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        tracing::trace!("exportparts of {:?}: {:?} -> {:?}", element, old, new);
        self.rescope_recursive(tree, element);
    }

    // --- Integration helpers ---

    /// Set an attribute and dispatch the hook it concerns
    pub fn set_attribute(
        &mut self,
        tree: &mut DomTree,
        element: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), PartsError> {
        let old = tree.set_attribute(element, name, value)?;
        self.attribute_changed(tree, element, name, old.as_deref(), Some(value));
        Ok(())
    }

    /// Remove an attribute and dispatch the hook it concerns
    pub fn remove_attribute(&mut self, tree: &mut DomTree, element: NodeId, name: &str) -> Option<String> {
        let old = tree.remove_attribute(element, name)?;
        self.attribute_changed(tree, element, name, Some(&old), None);
        Some(old)
    }

    /// Insert `node` and rescope the shadow tree it landed in. A `<style>`
    /// also queues its host for the next frame.
    pub fn insert_before(
        &mut self,
        tree: &mut DomTree,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), PartsError> {
        tree.insert_before(parent, node, reference)?;
        self.on_insert_before(tree, parent, node);

        if tree.tag_name(node) == Some("style")
            && let Some(host) = tree.shadow_host(tree.root_node(node))
        {
            self.on_style_element(host);
        }
        Ok(())
    }

    pub fn append_child(&mut self, tree: &mut DomTree, parent: NodeId, node: NodeId) -> Result<(), PartsError> {
        self.insert_before(tree, parent, node, None)
    }

    fn attribute_changed(
        &mut self,
        tree: &mut DomTree,
        element: NodeId,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        if name == self.config.part_attribute {
            self.on_part_attribute_changed(tree, element, old, new);
        } else if name == self.config.export_parts_attribute {
            self.on_export_parts_attribute_changed(tree, element, old, new);
        } else if name == "style" && tree.shadow_root(element).is_some() {
            // Inline custom properties feed the part rules of this host
            self.on_style_element(element);
        }
    }
}
