//! Weighted keyword frequency over the visible page text.

use crate::category::BusinessCategory;
use crate::scoring::{content_confidence, GENERIC_KEYWORD_WEIGHT, REGION_TERM_WEIGHT};
use crate::types::{DetectionMethod, EvidenceCandidate};

use super::{count_occurrences, rank_scores, Page};

/// Content score of one category: weighted occurrence count of its keywords.
#[must_use]
pub fn category_score(category: BusinessCategory, text: &str) -> u32 {
    let profile = category.profile();
    let weighted = |keywords: &[&str], weight: u32| -> u32 {
        keywords
            .iter()
            .map(|kw| u32::try_from(count_occurrences(text, kw)).unwrap_or(u32::MAX))
            .fold(0_u32, |acc, n| acc.saturating_add(n.saturating_mul(weight)))
    };
    weighted(profile.keywords, GENERIC_KEYWORD_WEIGHT)
        .saturating_add(weighted(profile.region_terms, REGION_TERM_WEIGHT))
}

#[must_use]
pub fn extract(page: &Page<'_>) -> Option<EvidenceCandidate> {
    let ranked = rank_scores(
        BusinessCategory::ALL
            .into_iter()
            .map(|category| (category, category_score(category, &page.text)))
            .collect(),
    );
    let (category, winner) = *ranked.first()?;
    let runner_up = ranked.get(1).map_or(0, |&(_, score)| score);

    Some(EvidenceCandidate {
        category,
        confidence: content_confidence(winner, runner_up),
        method: DetectionMethod::Content,
    })
}
