//! Question-stem templates over seed keywords.

use crate::types::{Intent, KeywordCandidate, KeywordSource};

pub const QUESTION_RELEVANCE: f64 = 0.7;

const QUESTION_STEMS: &[(&str, &str)] = &[
    ("how to choose ", ""),
    ("what is the best ", ""),
    ("how much does ", " cost"),
    ("do i need ", ""),
];

/// Each stem around each seed; intent is always informational.
#[must_use]
pub fn expand(seeds: &[String]) -> Vec<KeywordCandidate> {
    seeds
        .iter()
        .flat_map(|seed| {
            QUESTION_STEMS.iter().map(move |(prefix, suffix)| {
                KeywordCandidate::new(
                    &format!("{prefix}{seed}{suffix}"),
                    QUESTION_RELEVANCE,
                    Intent::Informational,
                    KeywordSource::Extracted,
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_are_informational() {
        let out = expand(&["conveyancing solicitor".to_string()]);
        assert_eq!(out.len(), QUESTION_STEMS.len());
        assert!(out.iter().all(|c| c.intent == Intent::Informational));
        assert!(out
            .iter()
            .any(|c| c.keyword == "how much does conveyancing solicitor cost"));
        // "what is the best ..." would be commercial by regex; the stem forces informational.
        assert!(out.iter().any(|c| c.keyword.starts_with("what is the best")));
    }
}
