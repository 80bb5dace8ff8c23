//! Brand identification across heterogeneous page evidence.
//!
//! Every surface yields zero or more raw values. Each value is cleaned, given
//! its source's fixed confidence, and optionally reduced by the compound-name
//! heuristics. Candidates are then deduplicated case-insensitively and the
//! highest-confidence survivor is the brand. The domain label is always a
//! candidate, so a non-blank domain always resolves to a brand.

pub mod clean;
pub mod sources;

use serde::{Deserialize, Serialize};

pub use clean::{clean_brand, BUSINESS_DESCRIPTORS};
pub use sources::BrandSource;

/// Confidence added to a compound-name reduction over the value it came from.
pub const COMPOUND_BOOST: f64 = 0.03;
pub const MAX_CONFIDENCE: f64 = 0.99;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandCandidate {
    pub source: BrandSource,
    pub value: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandIdentification {
    pub brand_name: String,
    /// Deduplicated, highest confidence first.
    pub candidates: Vec<BrandCandidate>,
}

fn raw_evidence(domain: &str, html: &str) -> Vec<(BrandSource, String)> {
    let mut raw = sources::json_ld(html);
    raw.extend(sources::meta_tags(html));
    raw.extend(sources::copyright(html));
    raw.extend(sources::microdata(html));
    raw.extend(sources::twitter_site(html));
    raw.extend(sources::logo_alt(html));
    raw.extend(sources::social_profiles(html));
    raw.extend(sources::title(html, domain));
    raw.extend(sources::heading(html));
    raw.extend(sources::domain(domain));
    raw
}

/// All cleaned candidates before deduplication, in evidence order.
#[must_use]
pub fn extract_candidates(domain: &str, html: &str) -> Vec<BrandCandidate> {
    let mut candidates = Vec::new();

    for (source, raw) in raw_evidence(domain, html) {
        let Some(weight) = source.weight() else {
            continue;
        };
        let Some(value) = clean_brand(&raw) else {
            continue;
        };

        let boosted = (weight + COMPOUND_BOOST).min(MAX_CONFIDENCE);
        if let Some(acronym) = clean::acronym_compound(&value) {
            candidates.push(BrandCandidate {
                source: BrandSource::AcronymCompound,
                value: acronym,
                confidence: boosted,
            });
        }
        if let Some(person) = clean::person_compound(&value) {
            candidates.push(BrandCandidate {
                source: BrandSource::PersonCompound,
                value: person,
                confidence: boosted,
            });
        }
        candidates.push(BrandCandidate {
            source,
            value,
            confidence: weight,
        });
    }

    candidates
}

/// Keep the highest-confidence candidate per lowercase value, then sort
/// descending. Ties keep evidence order.
#[must_use]
pub fn resolve_brand(candidates: Vec<BrandCandidate>) -> Vec<BrandCandidate> {
    let mut unique: Vec<BrandCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let key = candidate.value.to_lowercase();
        match unique.iter_mut().find(|c| c.value.to_lowercase() == key) {
            Some(existing) if candidate.confidence > existing.confidence => *existing = candidate,
            Some(_) => {}
            None => unique.push(candidate),
        }
    }
    unique.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    unique
}

/// Resolve the brand from page evidence, falling back to the domain label.
///
/// # Empty input
///
/// The name is empty only when the domain is blank and the page yields no
/// candidate. Callers that need a brand must validate the domain first.
#[must_use]
pub fn identify_brand(domain: &str, html: &str) -> BrandIdentification {
    let candidates = resolve_brand(extract_candidates(domain, html));
    let brand_name = candidates
        .first()
        .map(|c| c.value.clone())
        .unwrap_or_else(|| crate::html::domain_label(domain));

    tracing::debug!(
        domain,
        brand = %brand_name,
        candidates = candidates.len(),
        "brand identified"
    );
    BrandIdentification {
        brand_name,
        candidates,
    }
}

/// The resolved brand name for a page. Empty under the same conditions as
/// [`identify_brand`].
#[must_use]
pub fn extract_brand(domain: &str, html: &str) -> String {
    identify_brand(domain, html).brand_name
}
