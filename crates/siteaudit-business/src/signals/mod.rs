//! The six independent signal extractors.
//!
//! Each extractor looks at one surface of the page and returns at most one
//! [`EvidenceCandidate`]. Finding nothing is a normal outcome, not an error.

pub mod content;
pub mod domain;
pub mod markup;
pub mod navigation;
pub mod region;
pub mod url;

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::category::BusinessCategory;
use crate::html::{navigation_text, normalize_domain, visible_text};
use crate::types::EvidenceCandidate;

/// A page prepared once and shared by every extractor.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub html: &'a str,
    /// Normalized host, e.g. `smith-solicitors.co.uk`.
    pub domain: String,
    /// Visible text with scripts, styles and tags removed.
    pub text: String,
    /// Text of `<nav>` blocks and menu lists.
    pub nav_text: String,
}

impl<'a> Page<'a> {
    #[must_use]
    pub fn new(html: &'a str, domain: &str) -> Self {
        Self {
            html,
            domain: normalize_domain(domain),
            text: visible_text(html),
            nav_text: navigation_text(html),
        }
    }
}

/// Run every extractor over the page and collect whatever fired.
#[must_use]
pub fn extract_all(page: &Page<'_>) -> Vec<EvidenceCandidate> {
    let candidates: Vec<EvidenceCandidate> = [
        content::extract(page),
        url::extract(page),
        markup::extract(page),
        domain::extract(page),
        region::extract(page),
        navigation::extract(page),
    ]
    .into_iter()
    .flatten()
    .collect();

    tracing::debug!(
        domain = %page.domain,
        count = candidates.len(),
        "signal extraction complete"
    );
    candidates
}

static KEYWORD_PATTERNS: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    let mut patterns = HashMap::new();
    for category in BusinessCategory::ALL {
        let profile = category.profile();
        let refinements = profile.subcategories.iter().flat_map(|s| s.keywords.iter());
        for &keyword in profile
            .keywords
            .iter()
            .chain(profile.region_terms.iter())
            .chain(refinements)
        {
            patterns
                .entry(keyword)
                .or_insert_with(|| word_regex(keyword));
        }
    }
    patterns
});

fn word_regex(keyword: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))).expect("valid keyword regex")
}

/// Case-insensitive whole-word occurrences of `keyword` in `text`.
#[must_use]
pub fn count_occurrences(text: &str, keyword: &str) -> usize {
    match KEYWORD_PATTERNS.get(keyword) {
        Some(re) => re.find_iter(text).count(),
        None => word_regex(keyword).find_iter(text).count(),
    }
}

#[must_use]
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    count_occurrences(text, keyword) > 0
}

/// Keywords of `category` that appear in `text`, most frequent first.
#[must_use]
pub fn matched_keywords(category: BusinessCategory, text: &str) -> Vec<(&'static str, usize)> {
    let mut matched: Vec<(&'static str, usize)> = category
        .all_keywords()
        .map(|kw| (kw, count_occurrences(text, kw)))
        .filter(|(_, n)| *n > 0)
        .collect();
    matched.sort_by(|a, b| b.1.cmp(&a.1));
    matched
}

/// Drop zero scores and sort descending; ties keep category declaration order.
pub(crate) fn rank_scores(mut scores: Vec<(BusinessCategory, u32)>) -> Vec<(BusinessCategory, u32)> {
    scores.retain(|(_, score)| *score > 0);
    scores.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occurrences_respect_word_boundaries() {
        let text = "Solicitor services. Our solicitors are SOLICITOR qualified.";
        assert_eq!(count_occurrences(text, "solicitor"), 2);
        assert_eq!(count_occurrences(text, "solicitors"), 1);
    }

    #[test]
    fn multiword_keywords_match() {
        assert!(contains_keyword("Need Legal Aid today?", "legal aid"));
        assert!(!contains_keyword("legalaid", "legal aid"));
    }

    #[test]
    fn extract_all_is_empty_for_blank_page() {
        let page = Page::new("", "example.com");
        assert!(extract_all(&page).is_empty());
    }

    #[test]
    fn rank_scores_breaks_ties_by_category_order() {
        let ranked = rank_scores(vec![
            (BusinessCategory::Marketing, 4),
            (BusinessCategory::LegalServices, 4),
            (BusinessCategory::Retail, 0),
        ]);
        assert_eq!(
            ranked,
            vec![
                (BusinessCategory::LegalServices, 4),
                (BusinessCategory::Marketing, 4)
            ]
        );
    }
}
