//! Merge generated, content-derived, suggested and competitor keywords into one
//! deduplicated pool, then enrich it from the external collaborators.

use std::collections::HashMap;
use std::time::Duration;

use futures::future::join_all;
use siteaudit_business::BusinessCategory;

use crate::content::{ContentPhrase, MIN_FREQUENCY};
use crate::intent::classify_intent;
use crate::providers::{RankProvider, SuggestionProvider, VolumeProvider};
use crate::types::{normalize_keyword, GeneratedKeywordSet, KeywordCandidate, KeywordSource};

pub const CONTENT_BASE_RELEVANCE: f64 = 0.6;
pub const CONTENT_FREQUENCY_STEP: f64 = 0.05;
pub const CONTENT_MAX_RELEVANCE: f64 = 0.8;
pub const SUGGESTION_RELEVANCE: f64 = 0.7;
pub const COMPETITOR_RELEVANCE: f64 = 0.6;
/// Primary keywords used to seed suggestion lookups.
pub const SUGGESTION_SEEDS: usize = 3;

const COMPETITOR_TEMPLATES: &[&str] = &["top {} companies", "{} comparison", "{} alternatives"];

/// The merged pool and whether search volumes could be fetched for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryOutcome {
    pub candidates: Vec<KeywordCandidate>,
    pub api_available: bool,
}

/// Repeated page phrases as candidates; more repetitions score higher.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn content_candidates(phrases: &[ContentPhrase]) -> Vec<KeywordCandidate> {
    phrases
        .iter()
        .map(|p| {
            let extra = p.count.saturating_sub(MIN_FREQUENCY) as f64;
            let relevance =
                (CONTENT_BASE_RELEVANCE + CONTENT_FREQUENCY_STEP * extra).min(CONTENT_MAX_RELEVANCE);
            KeywordCandidate::new(
                &p.phrase,
                relevance,
                classify_intent(&p.phrase),
                KeywordSource::Extracted,
            )
        })
        .collect()
}

#[must_use]
pub fn competitor_fillers(category: BusinessCategory) -> Vec<KeywordCandidate> {
    category
        .profile()
        .service_phrases
        .iter()
        .take(2)
        .flat_map(|phrase| {
            COMPETITOR_TEMPLATES.iter().map(move |template| {
                let keyword = template.replace("{}", phrase);
                KeywordCandidate::new(
                    &keyword,
                    COMPETITOR_RELEVANCE,
                    classify_intent(&keyword),
                    KeywordSource::Competitor,
                )
            })
        })
        .collect()
}

/// Suggestions for each seed. A failed lookup only loses that seed's results.
pub async fn fetch_suggestions(
    provider: &dyn SuggestionProvider,
    seeds: &[String],
) -> Vec<KeywordCandidate> {
    let mut out = Vec::new();
    for seed in seeds {
        match provider.suggest(seed).await {
            Ok(suggestions) => out.extend(suggestions.iter().map(|s| {
                KeywordCandidate::new(
                    s,
                    SUGGESTION_RELEVANCE,
                    classify_intent(s),
                    KeywordSource::Suggestion,
                )
            })),
            Err(e) => {
                tracing::warn!(seed = %seed, error = %e, "suggestion lookup failed");
            }
        }
    }
    out
}

/// One entry per normalized keyword, keeping the most relevant duplicate in
/// the position the keyword was first seen.
#[must_use]
pub fn dedupe_candidates(candidates: Vec<KeywordCandidate>) -> Vec<KeywordCandidate> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<KeywordCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate.keyword.is_empty() {
            continue;
        }
        match index.get(&candidate.keyword) {
            Some(&i) => {
                if candidate.relevance_score > out[i].relevance_score {
                    out[i] = candidate;
                }
            }
            None => {
                index.insert(candidate.keyword.clone(), out.len());
                out.push(candidate);
            }
        }
    }
    out
}

/// Fill search volumes with a single provider call over the whole pool.
///
/// Returns `false` if the provider failed; every volume is then `None`.
pub async fn enrich_volumes(
    provider: &dyn VolumeProvider,
    candidates: &mut [KeywordCandidate],
    country: &str,
) -> bool {
    for c in candidates.iter_mut() {
        c.search_volume = None;
    }
    if candidates.is_empty() {
        return true;
    }

    let keywords: Vec<String> = candidates.iter().map(|c| c.keyword.clone()).collect();
    match provider.search_volumes(&keywords, country).await {
        Ok(volumes) => {
            let by_keyword: HashMap<String, Option<u64>> = volumes
                .into_iter()
                .map(|v| (normalize_keyword(&v.keyword), v.volume))
                .collect();
            for c in candidates.iter_mut() {
                c.search_volume = by_keyword.get(&c.keyword).copied().flatten();
            }
            tracing::debug!(
                keywords = keywords.len(),
                with_volume = candidates.iter().filter(|c| c.search_volume.is_some()).count(),
                "volume enrichment complete"
            );
            true
        }
        Err(e) => {
            tracing::warn!(
                keywords = keywords.len(),
                error = %e,
                "volume provider unavailable, all volumes left empty"
            );
            false
        }
    }
}

/// Check SERP positions for the first `limit` candidates, `batch_size` at a
/// time with `batch_delay` between batches. A failed lookup leaves that
/// keyword unranked.
pub async fn enrich_positions(
    provider: &dyn RankProvider,
    candidates: &mut [KeywordCandidate],
    domain: &str,
    limit: usize,
    batch_size: usize,
    batch_delay: Duration,
) {
    let take = limit.min(candidates.len());
    let batch_size = batch_size.max(1);
    let mut checked = 0usize;

    for (batch_index, batch) in candidates[..take].chunks_mut(batch_size).enumerate() {
        if batch_index > 0 && !batch_delay.is_zero() {
            tokio::time::sleep(batch_delay).await;
        }
        let lookups = batch
            .iter()
            .map(|c| provider.keyword_position(&c.keyword, domain));
        let results = join_all(lookups).await;
        for (candidate, result) in batch.iter_mut().zip(results) {
            candidate.serp_position = match result {
                Ok(position) => position,
                Err(e) => {
                    tracing::warn!(
                        keyword = %candidate.keyword,
                        error = %e,
                        "SERP position lookup failed"
                    );
                    None
                }
            };
            checked += 1;
        }
    }
    tracing::debug!(domain, checked, "SERP positions checked");
}

/// Build the merged, deduplicated pool and enrich it with search volumes.
pub async fn discover(
    generated: &GeneratedKeywordSet,
    content_phrases: &[ContentPhrase],
    category: BusinessCategory,
    suggestions: &dyn SuggestionProvider,
    volumes: &dyn VolumeProvider,
    country: &str,
) -> DiscoveryOutcome {
    let mut pool = generated.all();
    pool.extend(content_candidates(content_phrases));

    let seeds: Vec<String> = generated
        .primary
        .iter()
        .take(SUGGESTION_SEEDS)
        .map(|c| c.keyword.clone())
        .collect();
    pool.extend(fetch_suggestions(suggestions, &seeds).await);
    pool.extend(competitor_fillers(category));

    let merged = pool.len();
    let mut candidates = dedupe_candidates(pool);
    let api_available = enrich_volumes(volumes, &mut candidates, country).await;

    tracing::info!(
        merged,
        unique = candidates.len(),
        api_available,
        "keyword discovery complete"
    );
    DiscoveryOutcome {
        candidates,
        api_available,
    }
}
