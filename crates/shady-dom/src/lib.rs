//! Shady DOM - Document Object Model
//!
//! Memory-efficient arena DOM with shadow roots. Shadow roots are nodes of
//! their own that hang off their host element instead of its child list, so
//! ordinary tree walks never cross a shadow boundary.

mod attributes;
mod node;
mod shadow;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use node::{ElementData, Node, NodeData};
pub use shadow::{ShadowRootData, ShadowRootMode};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the NONE sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Structural DOM errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node {0:?} does not exist")]
    InvalidNode(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Element {0:?} already hosts a shadow root")]
    ShadowRootExists(NodeId),

    #[error("Reference node {reference:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, reference: NodeId },

    #[error("Inserting {node:?} into {parent:?} would break the tree")]
    HierarchyRequest { parent: NodeId, node: NodeId },
}
