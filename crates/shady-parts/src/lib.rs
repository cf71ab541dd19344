//! Shady Parts - CSS Shadow Parts without `::part()`
//!
//! Emulates `::part()` and `exportparts` for engines that cannot match
//! across shadow boundaries. Every part element gets a `shady-part` attribute
//! listing one token per stylesheet context that may style it, and template
//! `::part()` rules are rewritten to attribute selectors on those tokens.
//!
//! ```text
//! <x-a>                       document:  x-a::part(a3)
//!   #shadow  <x-b exportparts="b2:a3">
//!     #shadow  <span part="b2" shady-part="part_x-a_x-b_b2 part_document_x-a_a3">
//! ```
//!
//! Rules that consume custom properties are generated per host instance and
//! handed to a [`StyleInjector`].

mod attr;
mod config;
mod error;
mod exports;
mod frame;
mod inject;
mod mutation;
mod registry;
mod scope_id;
mod scoper;
mod selector;
mod specifier;

pub use attr::{ExportPart, parse_export_parts_attribute, parse_part_attribute};
pub use config::{DEFAULT_MAX_EXPORT_DEPTH, PartsConfig};
pub use error::PartsError;
pub use exports::{ExportPartsMap, OuterPart, get_export_parts_map};
pub use frame::FrameScheduler;
pub use inject::{
    InjectedStyle, STYLE_SCOPE_ATTRIBUTE, StyleElementInjector, StyleInjector, StyleRecorder,
};
pub use registry::{PartRule, PartRuleRegistry};
pub use scope_id::{PartId, ScopeIdCache};
pub use scoper::ShadowParts;
pub use selector::{PartSelector, parse_part_selector, rewrite_part_rule_selector};
pub use specifier::{
    DOCUMENT_SCOPE, PART_TOKEN_PREFIX, PartTokens, SHADY_PART_ATTRIBUTE, Scope,
    add_part_specifier, format_part_selector, format_part_specifier, part_specifiers,
    remove_all_part_specifiers, scope_for_root,
};
