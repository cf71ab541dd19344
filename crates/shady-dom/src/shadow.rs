//! Shadow DOM
//!
//! Shadow root bookkeeping. The root's children live in the tree arena like
//! any other nodes; this only records the back-reference to the host.

use crate::NodeId;

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

impl ShadowRootMode {
    /// Parse the `shadowrootmode` attribute of a declarative template
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Shadow root data
#[derive(Debug, Clone)]
pub struct ShadowRootData {
    /// Host element
    pub host: NodeId,
    /// Mode (open/closed)
    pub mode: ShadowRootMode,
}

impl ShadowRootData {
    pub fn new(host: NodeId, mode: ShadowRootMode) -> Self {
        Self { host, mode }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_attr() {
        assert_eq!(ShadowRootMode::from_attr("open"), Some(ShadowRootMode::Open));
        assert_eq!(ShadowRootMode::from_attr(" Closed "), Some(ShadowRootMode::Closed));
        assert_eq!(ShadowRootMode::from_attr("sideways"), None);
    }
}
