//! Category keywords embedded in the registrable domain label.

use crate::category::BusinessCategory;
use crate::html::domain_label;
use crate::scoring::{DOMAIN_CONFIDENCE, DOMAIN_MIN_KEYWORD_LEN};
use crate::types::{DetectionMethod, EvidenceCandidate};

use super::{rank_scores, Page};

fn compact(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect()
}

#[must_use]
pub fn extract(page: &Page<'_>) -> Option<EvidenceCandidate> {
    let label = compact(&domain_label(&page.domain));
    if label.is_empty() {
        return None;
    }

    let scores = BusinessCategory::ALL
        .into_iter()
        .map(|category| {
            let hits = category
                .all_keywords()
                .map(compact)
                .filter(|kw| kw.len() >= DOMAIN_MIN_KEYWORD_LEN && label.contains(kw.as_str()))
                .count();
            (category, u32::try_from(hits).unwrap_or(u32::MAX))
        })
        .collect();

    let (category, _) = *rank_scores(scores).first()?;
    Some(EvidenceCandidate {
        category,
        confidence: DOMAIN_CONFIDENCE,
        method: DetectionMethod::Domain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenated_label_matches() {
        let candidate = extract(&Page::new("", "www.smith-solicitors.co.uk")).unwrap();
        assert_eq!(candidate.category, BusinessCategory::LegalServices);
        assert!((candidate.confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn short_keywords_are_ignored() {
        // "bar" and "car" are too short to be trusted inside a label.
        assert!(extract(&Page::new("", "barcar.com")).is_none());
    }

    #[test]
    fn brand_only_label_has_no_signal() {
        assert!(extract(&Page::new("", "acme.com")).is_none());
    }
}
