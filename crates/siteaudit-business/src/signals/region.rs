//! Distinct region-specific industry terms in the visible text.

use crate::category::BusinessCategory;
use crate::scoring::{REGION_CONFIDENCE, REGION_MIN_DISTINCT_TERMS};
use crate::types::{DetectionMethod, EvidenceCandidate};

use super::{contains_keyword, rank_scores, Page};

#[must_use]
pub fn distinct_terms(category: BusinessCategory, text: &str) -> usize {
    category
        .profile()
        .region_terms
        .iter()
        .filter(|term| contains_keyword(text, term))
        .count()
}

#[must_use]
pub fn extract(page: &Page<'_>) -> Option<EvidenceCandidate> {
    let scores = BusinessCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let n = distinct_terms(category, &page.text);
            (n >= REGION_MIN_DISTINCT_TERMS).then(|| (category, u32::try_from(n).unwrap_or(u32::MAX)))
        })
        .collect();

    let (category, _) = *rank_scores(scores).first()?;
    Some(EvidenceCandidate {
        category,
        confidence: REGION_CONFIDENCE,
        method: DetectionMethod::Region,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_two_distinct_terms() {
        let one = Page::new("<p>solicitor solicitor solicitor</p>", "x.example");
        assert!(extract(&one).is_none());

        let two = Page::new("<p>solicitor and probate</p>", "x.example");
        let candidate = extract(&two).unwrap();
        assert_eq!(candidate.category, BusinessCategory::LegalServices);
        assert!((candidate.confidence - 0.8).abs() < 1e-9);
    }
}
