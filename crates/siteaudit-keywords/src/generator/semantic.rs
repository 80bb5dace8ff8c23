//! Word-by-word synonym substitution.

use crate::intent::classify_intent;
use crate::types::{KeywordCandidate, KeywordSource};

pub const SEMANTIC_RELEVANCE: f64 = 0.8;

const SYNONYMS: &[(&str, &[&str])] = &[
    ("service", &["solution", "support", "assistance", "help"]),
    ("services", &["solutions", "support"]),
    ("company", &["firm", "business", "provider"]),
    ("agency", &["firm", "consultancy"]),
    ("repair", &["fix", "maintenance"]),
    ("repairs", &["fixes", "maintenance"]),
    ("installation", &["fitting", "install"]),
    ("cheap", &["affordable", "budget"]),
    ("best", &["top", "leading"]),
    ("shop", &["store"]),
    ("lawyer", &["solicitor", "attorney"]),
    ("solicitor", &["lawyer"]),
    ("solicitors", &["lawyers", "law firm"]),
    ("clinic", &["practice", "centre"]),
    ("advice", &["guidance", "consultation"]),
    ("builders", &["contractors"]),
    ("restaurant", &["eatery", "dining"]),
    ("accountants", &["accounting firm", "bookkeepers"]),
    ("salon", &["studio"]),
    ("courses", &["classes", "training"]),
];

fn synonyms_of(word: &str) -> &'static [&'static str] {
    SYNONYMS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, syns)| *syns)
        .unwrap_or_default()
}

/// Replace one word at a time with each of its synonyms.
#[must_use]
pub fn expand(seeds: &[String]) -> Vec<KeywordCandidate> {
    let mut out = Vec::new();
    for seed in seeds {
        let words: Vec<&str> = seed.split_whitespace().collect();
        for (i, word) in words.iter().enumerate() {
            for synonym in synonyms_of(&word.to_lowercase()) {
                let mut replaced = words.clone();
                replaced[i] = *synonym;
                let keyword = replaced.join(" ");
                out.push(KeywordCandidate::new(
                    &keyword,
                    SEMANTIC_RELEVANCE,
                    classify_intent(&keyword),
                    KeywordSource::Semantic,
                ));
            }
        }
    }
    out
}
