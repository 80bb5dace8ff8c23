//! Category phrase templates crossed with category modifier words.

use siteaudit_business::BusinessCategory;

use crate::intent::classify_intent;
use crate::types::{KeywordCandidate, KeywordSource};

pub const BASE_PHRASE_RELEVANCE: f64 = 0.9;
pub const MODIFIED_PHRASE_RELEVANCE: f64 = 0.85;

fn candidate(keyword: &str, relevance: f64) -> KeywordCandidate {
    KeywordCandidate::new(keyword, relevance, classify_intent(keyword), KeywordSource::Semantic)
}

/// The category's core service phrases.
#[must_use]
pub fn base_phrases(category: BusinessCategory, relevance: f64) -> Vec<KeywordCandidate> {
    category
        .profile()
        .service_phrases
        .iter()
        .map(|phrase| candidate(phrase, relevance))
        .collect()
}

/// Every modifier in front of every service phrase.
#[must_use]
pub fn modified_phrases(category: BusinessCategory) -> Vec<KeywordCandidate> {
    let profile = category.profile();
    profile
        .modifiers
        .iter()
        .flat_map(|modifier| {
            profile
                .service_phrases
                .iter()
                .map(move |phrase| candidate(&format!("{modifier} {phrase}"), MODIFIED_PHRASE_RELEVANCE))
        })
        .collect()
}
