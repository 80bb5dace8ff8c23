//! Keyword × location combinations.

use siteaudit_business::LocationContext;

use crate::intent::classify_intent;
use crate::types::{KeywordCandidate, KeywordSource};

pub const NEAR_ME_RELEVANCE: f64 = 0.85;
pub const IN_LOCATION_RELEVANCE: f64 = 0.8;
pub const BEST_IN_LOCATION_RELEVANCE: f64 = 0.75;
/// Cities combined with each seed.
pub const MAX_LOCATIONS: usize = 3;

fn candidate(keyword: &str, relevance: f64) -> KeywordCandidate {
    KeywordCandidate::new(keyword, relevance, classify_intent(keyword), KeywordSource::Extracted)
}

/// `"<kw> near me"` for local businesses, and `"<kw> in <city>"`,
/// `"<kw> <city>"`, `"best <kw> in <city>"` for each target city.
#[must_use]
pub fn expand(seeds: &[String], location: &LocationContext) -> Vec<KeywordCandidate> {
    let cities: Vec<String> = location
        .target_cities
        .iter()
        .take(MAX_LOCATIONS)
        .map(|c| c.to_lowercase())
        .collect();

    let mut out = Vec::new();
    for seed in seeds {
        if location.is_local_business {
            out.push(candidate(&format!("{seed} near me"), NEAR_ME_RELEVANCE));
        }
        for city in &cities {
            out.push(candidate(&format!("{seed} in {city}"), IN_LOCATION_RELEVANCE));
            out.push(candidate(&format!("{seed} {city}"), IN_LOCATION_RELEVANCE));
            out.push(candidate(&format!("best {seed} in {city}"), BEST_IN_LOCATION_RELEVANCE));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_seed_with_cities() {
        let location = LocationContext {
            is_local_business: true,
            target_cities: vec!["Leeds".to_string()],
            ..LocationContext::default()
        };
        let out = expand(&["plumber".to_string()], &location);
        let keywords: Vec<&str> = out.iter().map(|c| c.keyword.as_str()).collect();
        assert_eq!(
            keywords,
            vec!["plumber near me", "plumber in leeds", "plumber leeds", "best plumber in leeds"]
        );
    }

    #[test]
    fn non_local_business_without_cities_gets_nothing() {
        let out = expand(&["crm software".to_string()], &LocationContext::default());
        assert!(out.is_empty());
    }
}
