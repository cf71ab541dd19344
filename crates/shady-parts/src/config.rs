//! Scoping configuration

use crate::specifier::{PART_TOKEN_PREFIX, PartTokens, SHADY_PART_ATTRIBUTE};

/// Default bound on `exportparts` forwarding depth
pub const DEFAULT_MAX_EXPORT_DEPTH: usize = 64;

/// Attribute names and limits used while scoping parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartsConfig {
    /// Attribute declaring part names
    pub part_attribute: String,
    /// Attribute declaring export mappings
    pub export_parts_attribute: String,
    /// Attribute receiving the computed part tokens
    pub shady_part_attribute: String,
    /// Prefix turning a specifier into an attribute token
    pub token_prefix: String,
    /// Maximum number of hosts an export chain is followed through
    pub max_export_depth: usize,
}

impl Default for PartsConfig {
    fn default() -> Self {
        Self {
            part_attribute: "part".to_string(),
            export_parts_attribute: "exportparts".to_string(),
            shady_part_attribute: SHADY_PART_ATTRIBUTE.to_string(),
            token_prefix: PART_TOKEN_PREFIX.to_string(),
            max_export_depth: DEFAULT_MAX_EXPORT_DEPTH,
        }
    }
}

impl PartsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shady_part_attribute(mut self, name: impl Into<String>) -> Self {
        self.shady_part_attribute = name.into();
        self
    }

    pub fn with_token_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.token_prefix = prefix.into();
        self
    }

    pub fn with_max_export_depth(mut self, depth: usize) -> Self {
        self.max_export_depth = depth.max(1);
        self
    }

    /// Token formatting bound to this configuration
    pub fn tokens(&self) -> PartTokens<'_> {
        PartTokens {
            attribute: &self.shady_part_attribute,
            prefix: &self.token_prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = PartsConfig::new()
            .with_shady_part_attribute("data-part")
            .with_token_prefix("p-")
            .with_max_export_depth(0);

        assert_eq!(config.part_attribute, "part");
        assert_eq!(config.max_export_depth, 1);
        assert_eq!(config.tokens().token("a_b_c"), "p-a_b_c");
        assert_eq!(config.tokens().attribute, "data-part");
    }
}
