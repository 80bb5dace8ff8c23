//! schema.org types declared in JSON-LD blocks or microdata `itemtype`.

use std::sync::LazyLock;

use regex::Regex;

use crate::category::BusinessCategory;
use crate::html::{json_ld_nodes, json_ld_types, strip_schema_prefix};
use crate::scoring::MARKUP_CONFIDENCE;
use crate::types::{DetectionMethod, EvidenceCandidate};

use super::Page;

static ITEMTYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)itemtype\s*=\s*["']([^"']+)["']"#).expect("valid itemtype regex")
});

/// Every declared schema.org type, JSON-LD first, in document order.
#[must_use]
pub fn declared_types(html: &str) -> Vec<String> {
    let mut types: Vec<String> = json_ld_nodes(html).iter().flat_map(json_ld_types).collect();
    types.extend(ITEMTYPE_RE.captures_iter(html).filter_map(|cap| {
        cap.get(1)
            .map(|m| strip_schema_prefix(m.as_str()).to_string())
    }));
    types
}

/// The first declared type with a category mapping decides.
#[must_use]
pub fn extract(page: &Page<'_>) -> Option<EvidenceCandidate> {
    declared_types(page.html)
        .iter()
        .find_map(|t| BusinessCategory::from_schema_type(t))
        .map(|category| EvidenceCandidate {
            category,
            confidence: MARKUP_CONFIDENCE,
            method: DetectionMethod::Markup,
        })
}
