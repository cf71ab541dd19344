//! Shady HTML Parser
//!
//! HTML5 parser built on html5ever that produces a `shady_dom::DomTree`.
//! Declarative shadow roots (`<template shadowrootmode="open">`) become real
//! shadow roots of their parent element.

mod parser;

pub use parser::HtmlParser;

use shady_dom::DomTree;

/// Parse an HTML string into a DOM tree
pub fn parse(html: &str) -> DomTree {
    HtmlParser::new().parse(html)
}
