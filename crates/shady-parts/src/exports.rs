//! `exportparts` forwarding resolution
//!
//! A part exported by a host is visible to the stylesheet of the tree
//! containing that host under its outer name, and again to every further
//! tree the outer name is re-exported to.

use std::collections::HashMap;

use shady_dom::{DomTree, NodeId};

use crate::attr::parse_export_parts_attribute;
use crate::config::PartsConfig;
use crate::specifier::{Scope, format_part_specifier, scope_for_root};

/// One context an inner part is visible from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OuterPart {
    /// Scope of the tree containing `scope`'s host
    pub host_scope: Scope,
    /// Tag of the host the part was exported through
    pub scope: Scope,
    /// Name the part is known by in that context
    pub part_name: String,
}

impl OuterPart {
    pub fn specifier(&self) -> String {
        format_part_specifier(&self.part_name, self.scope.as_str(), self.host_scope.as_str())
    }
}

/// Inner part name to every context it is forwarded to, nearest first
pub type ExportPartsMap = HashMap<String, Vec<OuterPart>>;

/// Resolve the transitive forwarding chain of `host`'s `exportparts`
pub fn get_export_parts_map(tree: &DomTree, host: NodeId, config: &PartsConfig) -> ExportPartsMap {
    export_parts_map(tree, host, config, 0)
}

fn export_parts_map(tree: &DomTree, host: NodeId, config: &PartsConfig, depth: usize) -> ExportPartsMap {
    let mut map = ExportPartsMap::new();

    let mappings = parse_export_parts_attribute(tree.get_attribute(host, &config.export_parts_attribute));
    if mappings.is_empty() {
        return map;
    }

    let root = tree.root_node(host);
    let Some(super_host) = tree.shadow_host(root) else {
        return map;
    };
    let Some(scope) = tree.tag_name(super_host).map(Scope::element) else {
        return map;
    };
    let Some(host_scope) = scope_for_root(tree, tree.root_node(super_host)) else {
        return map;
    };

    let super_map = if depth + 1 >= config.max_export_depth {
        tracing::warn!(
            "exportparts chain deeper than {} hosts at <{}>, not following further",
            config.max_export_depth,
            scope
        );
        ExportPartsMap::new()
    } else {
        export_parts_map(tree, super_host, config, depth + 1)
    };

    for mapping in mappings {
        let forwarded = map.entry(mapping.inner).or_default();
        forwarded.push(OuterPart {
            host_scope: host_scope.clone(),
            scope: scope.clone(),
            part_name: mapping.outer.clone(),
        });
        if let Some(further) = super_map.get(&mapping.outer) {
            forwarded.extend(further.iter().cloned());
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use shady_dom::ShadowRootMode;

    fn host_in(tree: &mut DomTree, parent: NodeId, tag: &str) -> (NodeId, NodeId) {
        let host = tree.create_element(tag);
        tree.append_child(parent, host).unwrap();
        let root = tree.attach_shadow(host, ShadowRootMode::Open).unwrap();
        (host, root)
    }

    #[test]
    fn test_document_level_host_is_empty() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let (host, _) = host_in(&mut tree, root, "x-a");
        tree.set_attribute(host, "exportparts", "a1, a2:b").unwrap();

        assert!(get_export_parts_map(&tree, host, &PartsConfig::default()).is_empty());
    }

    #[test]
    fn test_single_level() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let (_, a_root) = host_in(&mut tree, root, "x-a");
        let (b, _) = host_in(&mut tree, a_root, "x-b");
        tree.set_attribute(b, "exportparts", "b1:a2").unwrap();

        let map = get_export_parts_map(&tree, b, &PartsConfig::default());
        let outer = &map["b1"];
        assert_eq!(outer.len(), 1);
        assert_eq!(outer[0].specifier(), "document_x-a_a2");
    }

    #[test]
    fn test_depth_guard() {
        let mut tree = DomTree::new();
        let mut parent = tree.root();
        let mut hosts = Vec::new();
        for _ in 0..4 {
            let (host, root) = host_in(&mut tree, parent, "x-n");
            tree.set_attribute(host, "exportparts", "p").unwrap();
            hosts.push(host);
            parent = root;
        }
        let innermost = hosts[3];

        let full = get_export_parts_map(&tree, innermost, &PartsConfig::default());
        assert_eq!(full["p"].len(), 3);

        let bounded = PartsConfig::default().with_max_export_depth(2);
        let map = get_export_parts_map(&tree, innermost, &bounded);
        assert_eq!(map["p"].len(), 2);
    }
}
