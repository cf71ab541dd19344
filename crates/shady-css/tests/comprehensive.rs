//! Comprehensive tests for shady-css
//!
//! Parsing template stylesheets and resolving custom properties across
//! shadow boundaries.

use std::collections::BTreeSet;

use shady_css::{CssError, PropertyCascade, StyleCache, collect_consumed_properties, parse_stylesheet};
use shady_dom::{DomTree, ShadowRootMode};

#[test]
fn test_parse_template_stylesheet() {
    let css = r#"
        :host { display: block; }
        x-b::part(label), x-b::part(icon) { color: var(--accent, black); }
        @media (min-width: 600px) { .wide { display: none; } }
        .plain { margin: 0; }
    "#;
    let stylesheet = parse_stylesheet(css).unwrap();

    let part_rules: Vec<_> = stylesheet
        .rules
        .iter()
        .filter(|r| r.selector.contains("::part"))
        .collect();
    assert_eq!(part_rules.len(), 2);
    for rule in part_rules {
        assert!(collect_consumed_properties(&rule.css_text).contains("--accent"));
    }
    assert!(stylesheet.rules.iter().all(|r| r.selector != ".wide"));
}

#[test]
fn test_parse_error_is_reported() {
    let err = parse_stylesheet("$$$ { color: red; }").unwrap_err();
    assert!(matches!(err, CssError::ParseError { line: 1, .. }));

    let empty = parse_stylesheet("").unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_cascade_through_nested_shadow_roots() {
    let mut tree = DomTree::new();
    let doc = tree.root();
    let outer = tree.create_element("x-outer");
    tree.append_child(doc, outer).unwrap();
    let outer_root = tree.attach_shadow(outer, ShadowRootMode::Open).unwrap();
    let inner = tree.create_element("x-inner");
    tree.append_child(outer_root, inner).unwrap();

    let mut cascade = PropertyCascade::new();
    cascade.set_document_property("--fg", "black");
    cascade.set_document_property("--bg", "white");
    cascade.set_host_property(outer, "--fg", "red");
    tree.set_attribute(inner, "style", "--bg: var(--fg)").unwrap();

    let props = cascade.style_properties(&tree, inner);
    assert_eq!(props.get("--fg").map(String::as_str), Some("red"));
    assert_eq!(props.get("--bg").map(String::as_str), Some("red"));

    let names: Vec<_> = cascade.own_property_names(&tree, inner).into_iter().collect();
    assert_eq!(names, vec!["--bg"]);

    assert_eq!(
        cascade.apply_properties("background: var(--bg); color: var(--fg)", &props),
        "background: red; color: red"
    );

    cascade.clear_host(outer);
    let props = cascade.style_properties(&tree, inner);
    assert_eq!(props.get("--bg").map(String::as_str), Some("black"));
}

#[test]
fn test_style_cache_fingerprints() {
    let mut tree = DomTree::new();
    let doc = tree.root();
    let host = tree.create_element("x-a");
    tree.append_child(doc, host).unwrap();

    let mut cascade = PropertyCascade::new();
    cascade.set_host_property(host, "--fg", "red");
    let names: BTreeSet<String> = ["--fg".to_string()].into();

    let mut cache = StyleCache::new();
    let props = cascade.style_properties(&tree, host);
    assert!(cache.fetch("a1", &props, &names).is_none());
    cache.store("a1", props.clone(), 7u32);
    assert_eq!(cache.fetch("a1", &props, &names), Some(&7));

    cascade.set_host_property(host, "--fg", "blue");
    let props = cascade.style_properties(&tree, host);
    assert!(cache.fetch("a1", &props, &names).is_none());

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
}
