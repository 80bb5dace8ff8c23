//! Category keywords inside `<nav>` blocks and menu lists.

use crate::category::BusinessCategory;
use crate::scoring::{NAVIGATION_CONFIDENCE, NAVIGATION_MIN_MATCHES};
use crate::types::{DetectionMethod, EvidenceCandidate};

use super::{count_occurrences, rank_scores, Page};

#[must_use]
pub fn extract(page: &Page<'_>) -> Option<EvidenceCandidate> {
    if page.nav_text.is_empty() {
        return None;
    }

    let scores = BusinessCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let matches: usize = category
                .all_keywords()
                .map(|kw| count_occurrences(&page.nav_text, kw))
                .sum();
            (matches >= NAVIGATION_MIN_MATCHES)
                .then(|| (category, u32::try_from(matches).unwrap_or(u32::MAX)))
        })
        .collect();

    let (category, _) = *rank_scores(scores).first()?;
    Some(EvidenceCandidate {
        category,
        confidence: NAVIGATION_CONFIDENCE,
        method: DetectionMethod::Navigation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_keywords_are_counted() {
        let html = r#"<nav><a href="/a">Conveyancing</a><a href="/b">Probate</a></nav>"#;
        let candidate = extract(&Page::new(html, "x.example")).unwrap();
        assert_eq!(candidate.category, BusinessCategory::LegalServices);
        assert!((candidate.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn body_text_outside_nav_is_ignored() {
        let html = "<nav><a>Home</a></nav><p>Conveyancing and probate</p>";
        assert!(extract(&Page::new(html, "x.example")).is_none());
    }

    #[test]
    fn single_match_is_not_enough() {
        let html = r#"<ul class="menu"><li>Menu</li><li>About</li></ul>"#;
        assert!(extract(&Page::new(html, "x.example")).is_none());
    }
}
