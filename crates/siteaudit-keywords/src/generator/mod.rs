//! Keyword candidate generation.
//!
//! Four independent strategies (category patterns, synonym substitution,
//! location combination, question templates) plus the urgency and branded
//! templates. Each strategy is a pure function of its inputs.

pub mod location;
pub mod patterns;
pub mod questions;
pub mod semantic;

use siteaudit_business::signals::contains_keyword;
use siteaudit_business::{BusinessCategory, BusinessDetectionResult, ConfidenceLevel, LocationContext};

use crate::content::ContentPhrase;
use crate::intent::classify_intent;
use crate::types::{GeneratedKeywordSet, Intent, KeywordCandidate, KeywordSource};

/// Seeds fed to the expansion strategies.
pub const MAX_SEEDS: usize = 8;
pub const SECONDARY_PHRASE_RELEVANCE: f64 = 0.85;
pub const URGENCY_RELEVANCE: f64 = 0.8;

const URGENCY_PREFIXES: &[&str] = &["emergency", "24 hour", "same day"];

/// Everything generation depends on, already resolved.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub business: &'a BusinessDetectionResult,
    pub location: &'a LocationContext,
    pub brand: &'a str,
    pub content_phrases: &'a [ContentPhrase],
}

/// Service phrases of the primary category, then content phrases that
/// mention one of its keywords.
#[must_use]
pub fn seed_keywords(category: BusinessCategory, content_phrases: &[ContentPhrase]) -> Vec<String> {
    let mut seeds: Vec<String> = category
        .profile()
        .service_phrases
        .iter()
        .map(|p| (*p).to_string())
        .collect();
    for phrase in content_phrases {
        if seeds.len() >= MAX_SEEDS {
            break;
        }
        let on_topic = category
            .all_keywords()
            .any(|kw| contains_keyword(&phrase.phrase, kw));
        if on_topic && !seeds.contains(&phrase.phrase) {
            seeds.push(phrase.phrase.clone());
        }
    }
    seeds.truncate(MAX_SEEDS);
    seeds
}

fn urgency(category: BusinessCategory) -> Vec<KeywordCandidate> {
    let profile = category.profile();
    if !profile.urgent_demand {
        return Vec::new();
    }
    URGENCY_PREFIXES
        .iter()
        .flat_map(|prefix| {
            profile.service_phrases.iter().map(move |phrase| {
                KeywordCandidate::new(
                    &format!("{prefix} {phrase}"),
                    URGENCY_RELEVANCE,
                    Intent::Commercial,
                    KeywordSource::Semantic,
                )
            })
        })
        .collect()
}

fn branded(brand: &str, category: BusinessCategory) -> Vec<KeywordCandidate> {
    let brand = brand.trim().to_lowercase();
    if brand.is_empty() {
        return Vec::new();
    }
    let mut out: Vec<KeywordCandidate> = category
        .profile()
        .service_phrases
        .iter()
        .take(3)
        .map(|phrase| {
            let keyword = format!("{brand} {phrase}");
            KeywordCandidate::new(&keyword, 0.9, classify_intent(&keyword), KeywordSource::Semantic)
        })
        .collect();
    out.push(KeywordCandidate::new(
        &format!("{brand} reviews"),
        0.85,
        Intent::Commercial,
        KeywordSource::Semantic,
    ));
    out.push(KeywordCandidate::new(
        &format!("{brand} contact"),
        0.8,
        Intent::Navigational,
        KeywordSource::Semantic,
    ));
    out
}

/// Run every strategy and group the results.
#[must_use]
pub fn generate_keywords(ctx: &GenerationContext<'_>) -> GeneratedKeywordSet {
    let category = ctx.business.primary_type.category_id;
    let seeds = seed_keywords(category, ctx.content_phrases);

    let primary = patterns::base_phrases(category, patterns::BASE_PHRASE_RELEVANCE);
    let commercial = patterns::modified_phrases(category);

    let (long_tail, mut secondary): (Vec<_>, Vec<_>) =
        semantic::expand(&seeds).into_iter().partition(|c| c.longtail);
    for other in &ctx.business.secondary_types {
        secondary.extend(patterns::base_phrases(other.category_id, SECONDARY_PHRASE_RELEVANCE));
    }

    let local = location::expand(&seeds, ctx.location);
    let informational = questions::expand(&seeds);
    let urgency = urgency(category);
    let branded = branded(ctx.brand, category);

    let mut set = GeneratedKeywordSet {
        primary,
        secondary,
        long_tail,
        local,
        commercial,
        informational,
        urgency,
        branded,
        total_generated: 0,
        industry_specific: category != BusinessCategory::FALLBACK
            || ctx.business.primary_type.confidence != ConfidenceLevel::Low,
    };
    set.total_generated = set.all().len();

    tracing::debug!(
        category = %category,
        seeds = seeds.len(),
        total = set.total_generated,
        "keyword candidates generated"
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteaudit_business::detect_business;

    fn phrase(p: &str, count: usize) -> ContentPhrase {
        ContentPhrase {
            phrase: p.to_string(),
            count,
        }
    }

    #[test]
    fn seeds_prefer_service_phrases_then_on_topic_content() {
        let seeds = seed_keywords(
            BusinessCategory::HomeServices,
            &[phrase("boiler servicing", 4), phrase("garden party", 3)],
        );
        assert_eq!(seeds[0], "plumber");
        assert!(seeds.contains(&"boiler servicing".to_string()));
        assert!(!seeds.contains(&"garden party".to_string()));
        assert!(seeds.len() <= MAX_SEEDS);
    }

    #[test]
    fn generation_fills_groups() {
        let html = "<p>Emergency plumber and boiler repair. Gas safe engineers. Plumbing and heating.</p>";
        let business = detect_business("leedsplumbing.co.uk", html);
        let location = LocationContext {
            is_local_business: true,
            primary_location: Some("Leeds".to_string()),
            target_cities: vec!["Leeds".to_string()],
            ..LocationContext::default()
        };
        let set = generate_keywords(&GenerationContext {
            business: &business,
            location: &location,
            brand: "Leeds Plumbing",
            content_phrases: &[],
        });

        assert!(set.industry_specific);
        assert!(!set.primary.is_empty());
        assert!(!set.commercial.is_empty());
        assert!(set.local.iter().any(|c| c.keyword == "plumber in leeds"));
        assert!(set.urgency.iter().any(|c| c.keyword == "emergency plumber"));
        assert!(set.branded.iter().any(|c| c.keyword == "leeds plumbing reviews"));
        assert!(set.informational.iter().all(|c| c.intent == Intent::Informational));
        assert_eq!(set.total_generated, set.all().len());
        assert!(set
            .all()
            .iter()
            .all(|c| (0.0..=1.0).contains(&c.relevance_score)));
    }

    #[test]
    fn fallback_business_is_not_industry_specific() {
        let business = detect_business("example.com", "");
        let set = generate_keywords(&GenerationContext {
            business: &business,
            location: &LocationContext::default(),
            brand: "",
            content_phrases: &[],
        });
        assert!(!set.industry_specific);
        assert!(set.branded.is_empty());
        assert!(set.urgency.is_empty());
    }
}
