//! Custom property cascade
//!
//! Resolves the custom properties visible at a host element. Properties come
//! from the document level, from values set programmatically on a host, and
//! from `--name: value` declarations in a host's inline `style` attribute.
//! The nearest declaration along the composed ancestor chain wins.

use std::collections::{BTreeSet, HashMap};

use shady_dom::{DomTree, NodeId};

use crate::variables::{PropertyTable, apply_properties, parse_custom_declarations};

/// Per-host custom property cascade
#[derive(Debug, Default)]
pub struct PropertyCascade {
    /// Properties declared at the document level
    document: PropertyTable,
    /// Properties set programmatically, keyed by host
    hosts: HashMap<NodeId, PropertyTable>,
}

impl PropertyCascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property at the document level
    pub fn set_document_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.document.insert(name.into(), value.into());
    }

    /// Declare a property on a host element
    pub fn set_host_property(
        &mut self,
        host: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.hosts
            .entry(host)
            .or_default()
            .insert(name.into(), value.into());
    }

    /// Drop every property set programmatically on a host
    pub fn clear_host(&mut self, host: NodeId) {
        self.hosts.remove(&host);
    }

    /// Properties declared directly on `element`; the inline style wins over
    /// programmatic values
    pub fn declared_properties(&self, tree: &DomTree, element: NodeId) -> PropertyTable {
        let mut declared = self.hosts.get(&element).cloned().unwrap_or_default();
        if let Some(style) = tree.get_attribute(element, "style") {
            declared.extend(parse_custom_declarations(style));
        }
        declared
    }

    /// Names of the properties declared on the host's own scope
    pub fn own_property_names(&self, tree: &DomTree, host: NodeId) -> BTreeSet<String> {
        self.declared_properties(tree, host).into_keys().collect()
    }

    /// Live property table at `host`, with `var()` references between
    /// properties already substituted
    pub fn style_properties(&self, tree: &DomTree, host: NodeId) -> PropertyTable {
        let mut chain = Vec::new();
        let mut current = Some(host);
        while let Some(id) = current {
            if tree.get(id).is_some_and(|n| n.is_element()) {
                chain.push(id);
            }
            current = tree.composed_parent(id);
        }

        let mut table = self.document.clone();
        for &element in chain.iter().rev() {
            table.extend(self.declared_properties(tree, element));
        }

        let raw = table.clone();
        for value in table.values_mut() {
            if value.contains("var(") {
                *value = apply_properties(value, &raw);
            }
        }

        tracing::trace!("Resolved {} custom properties for {:?}", table.len(), host);
        table
    }

    /// Substitute the resolved values into a rule's declaration text
    pub fn apply_properties(&self, css_text: &str, table: &PropertyTable) -> String {
        apply_properties(css_text, table)
    }
}
