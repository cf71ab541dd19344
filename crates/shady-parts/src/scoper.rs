//! Tree scoper
//!
//! Walks the part-bearing elements of a host's shadow tree and writes the
//! tokens every stylesheet that may target them will match: the host's own
//! context, then each context the part is forwarded to through
//! `exportparts`.

use shady_css::{PropertyCascade, PropertyTable, Rule, Stylesheet, parse_stylesheet};
use shady_dom::{DomTree, NodeId};

use crate::attr::parse_part_attribute;
use crate::config::PartsConfig;
use crate::error::PartsError;
use crate::exports::{ExportPartsMap, get_export_parts_map};
use crate::frame::FrameScheduler;
use crate::inject::{StyleInjector, StyleRecorder};
use crate::registry::PartRuleRegistry;
use crate::scope_id::ScopeIdCache;
use crate::selector::parse_part_selector;
use crate::specifier::{Scope, format_part_specifier, scope_for_root};

/// Part scoping state for one document
#[derive(Debug)]
pub struct ShadowParts<I: StyleInjector = StyleRecorder> {
    pub(crate) config: PartsConfig,
    pub(crate) registry: PartRuleRegistry,
    pub(crate) part_ids: ScopeIdCache,
    pub(crate) cascade: PropertyCascade,
    pub(crate) injector: I,
    pub(crate) frames: FrameScheduler,
}

/// Everything a host contributes to the tokens of its parts
struct HostContext {
    host: NodeId,
    scope: Scope,
    host_scope: Scope,
    exports: ExportPartsMap,
    /// Resolved on first use; most parts have no custom property rules
    properties: Option<PropertyTable>,
}

impl Default for ShadowParts {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowParts {
    pub fn new() -> Self {
        Self::with_config(PartsConfig::default())
    }

    pub fn with_config(config: PartsConfig) -> Self {
        Self::with_injector(config, StyleRecorder::new())
    }
}

impl<I: StyleInjector> ShadowParts<I> {
    pub fn with_injector(config: PartsConfig, injector: I) -> Self {
        Self {
            config,
            registry: PartRuleRegistry::new(),
            part_ids: ScopeIdCache::new(),
            cascade: PropertyCascade::new(),
            injector,
            frames: FrameScheduler::new(),
        }
    }

    pub fn config(&self) -> &PartsConfig {
        &self.config
    }

    pub fn registry(&self) -> &PartRuleRegistry {
        &self.registry
    }

    pub fn part_ids(&self) -> &ScopeIdCache {
        &self.part_ids
    }

    pub fn cascade(&self) -> &PropertyCascade {
        &self.cascade
    }

    pub fn cascade_mut(&mut self) -> &mut PropertyCascade {
        &mut self.cascade
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }

    pub fn injector_mut(&mut self) -> &mut I {
        &mut self.injector
    }

    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    // --- Templates ---

    /// Register the custom property part rules of a template stylesheet.
    /// The document's own stylesheet is registered as `"document"`.
    pub fn prepare_template(&mut self, element_name: &str, stylesheet: &Stylesheet) -> usize {
        self.registry.prepare_template(element_name, stylesheet)
    }

    /// Parse template CSS and register its custom property part rules
    pub fn prepare_template_css(&mut self, element_name: &str, css: &str) -> Result<usize, PartsError> {
        let stylesheet = parse_stylesheet(css)?;
        Ok(self.prepare_template(element_name, &stylesheet))
    }

    /// Stylesheet to install for `element_name`'s template: static `::part()`
    /// rules rewritten to token selectors, registered custom property rules
    /// removed (they are generated per instance), everything else unchanged
    pub fn transform_template(&self, element_name: &str, stylesheet: &Stylesheet) -> Stylesheet {
        let tokens = self.config.tokens();
        let mut transformed = Stylesheet::new();

        for rule in &stylesheet.rules {
            if !rule.selector.contains("::part") {
                transformed.rules.push(rule.clone());
                continue;
            }
            if self.registry.is_registered(element_name, rule) {
                continue;
            }
            match parse_part_selector(&rule.selector) {
                Some(selector) => {
                    let rewritten = selector.scoped_selector(&tokens, &selector.part_list, element_name);
                    transformed.rules.push(Rule::new(rewritten, rule.css_text.clone()));
                }
                None => transformed.rules.push(rule.clone()),
            }
        }

        transformed
    }

    // --- Scoping ---

    /// Forwarding chain of `host`'s `exportparts`
    pub fn get_export_parts_map(&self, tree: &DomTree, host: NodeId) -> ExportPartsMap {
        get_export_parts_map(tree, host, &self.config)
    }

    /// Recompute the tokens of every part in `host`'s shadow tree
    pub fn scope_all_host_parts(&mut self, tree: &mut DomTree, host: NodeId) {
        let Some(shadow) = tree.shadow_root(host) else {
            return;
        };
        let parts = tree.query_attribute_all(shadow, &self.config.part_attribute);
        if parts.is_empty() {
            return;
        }
        let Some(mut context) = self.host_context(tree, host) else {
            tracing::debug!("Host {:?} is not connected to a scope, skipping", host);
            return;
        };

        tracing::debug!(
            "Scoping {} parts of <{}> in {}",
            parts.len(),
            context.scope,
            context.host_scope
        );
        for element in parts {
            self.scope_element(tree, &mut context, element);
        }
    }

    /// Scope `element`'s parts, then every exporting host below it
    pub fn rescope_recursive(&mut self, tree: &mut DomTree, element: NodeId) {
        self.scope_all_host_parts(tree, element);

        let Some(shadow) = tree.shadow_root(element) else {
            return;
        };
        for host in tree.query_attribute_all(shadow, &self.config.export_parts_attribute) {
            self.rescope_recursive(tree, host);
        }
    }

    /// Recompute a single element's tokens. Elements outside shadow trees
    /// are left untouched.
    pub(crate) fn scope_single_element(&mut self, tree: &mut DomTree, element: NodeId) {
        let Some(host) = tree.shadow_host(tree.root_node(element)) else {
            return;
        };
        if let Some(mut context) = self.host_context(tree, host) {
            self.scope_element(tree, &mut context, element);
        }
    }

    fn host_context(&self, tree: &DomTree, host: NodeId) -> Option<HostContext> {
        let scope = tree.tag_name(host).map(Scope::element)?;
        let host_scope = scope_for_root(tree, tree.root_node(host))?;
        Some(HostContext {
            host,
            scope,
            host_scope,
            exports: self.get_export_parts_map(tree, host),
            properties: None,
        })
    }

    fn scope_element(&mut self, tree: &mut DomTree, context: &mut HostContext, element: NodeId) {
        let tokens = self.config.tokens();
        let names = parse_part_attribute(tree.get_attribute(element, &self.config.part_attribute));
        tokens.remove_all(tree, element);

        let scope = context.scope.as_str();
        let host_scope = context.host_scope.as_str();

        for name in &names {
            let rules = self
                .registry
                .custom_property_rules_for_part(host_scope, scope, name);

            if rules.is_empty() {
                tokens.add(tree, element, &format_part_specifier(name, scope, host_scope));
            } else {
                let properties = context
                    .properties
                    .get_or_insert_with(|| self.cascade.style_properties(tree, context.host));

                let mut watched = self.cascade.own_property_names(tree, context.host);
                for rule in rules {
                    watched.extend(rule.consumed.iter().cloned());
                }

                let part_id = self
                    .part_ids
                    .get_part_id(name, host_scope, scope, properties, &watched);
                let scoped_name = format!("{}-{}", name, part_id.id);

                if part_id.is_new {
                    for rule in rules {
                        let css_text = format!(
                            "{} {{ {} }}",
                            rule.selector.scoped_selector(&tokens, &scoped_name, host_scope),
                            self.cascade.apply_properties(&rule.rule.css_text, properties)
                        );
                        self.injector.inject(tree, &css_text, &context.host_scope);
                    }
                }
                tokens.add(tree, element, &format_part_specifier(&scoped_name, scope, host_scope));
            }

            if let Some(forwarded) = context.exports.get(name) {
                for outer in forwarded {
                    tokens.add(tree, element, &outer.specifier());
                }
            }
        }

        tracing::trace!(
            "Scoped {:?} as {:?}",
            element,
            tree.get_attribute(element, tokens.attribute)
        );
    }
}
