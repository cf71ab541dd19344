//! `part` and `exportparts` attribute grammars

/// One `exportparts` record: `inner` inside the shadow tree is visible to
/// the host's scope as `outer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPart {
    pub inner: String,
    pub outer: String,
}

impl ExportPart {
    pub fn new(inner: impl Into<String>, outer: impl Into<String>) -> Self {
        Self {
            inner: inner.into(),
            outer: outer.into(),
        }
    }
}

/// Split a `part` attribute on whitespace runs
pub fn parse_part_attribute(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| s.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Parse an `exportparts` attribute.
///
/// Tokens are comma separated; `name` maps to itself and `inner:outer`
/// renames. Tokens with several colons or an empty side are skipped without
/// affecting the rest of the list.
pub fn parse_export_parts_attribute(raw: Option<&str>) -> Vec<ExportPart> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let mut sides = token.split(':');
            let inner = sides.next()?.trim();
            let outer = match (sides.next(), sides.next()) {
                (None, _) => inner,
                (Some(outer), None) => outer.trim(),
                (Some(_), Some(_)) => return None,
            };
            if inner.is_empty() || outer.is_empty() {
                return None;
            }
            Some(ExportPart::new(inner, outer))
        })
        .collect()
}
