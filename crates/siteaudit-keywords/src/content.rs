//! Repeated 2–4 word phrases from visible page text.

use std::collections::HashMap;

pub const MIN_NGRAM: usize = 2;
pub const MAX_NGRAM: usize = 4;
pub const MIN_FREQUENCY: usize = 2;
pub const MAX_PHRASES: usize = 30;

const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "been", "before", "being", "but", "by", "can", "could", "did", "do", "does", "for", "from",
    "get", "had", "has", "have", "he", "her", "here", "his", "how", "i", "if", "in", "into", "is",
    "it", "its", "just", "me", "more", "most", "my", "no", "not", "now", "of", "on", "one", "only",
    "or", "other", "our", "out", "over", "she", "so", "some", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "to", "too", "up", "us", "very",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "why", "will", "with",
    "would", "you", "your",
];

/// Boilerplate that repeats on every page without describing the business.
const STOP_PHRASES: &[&str] = &[
    "click here",
    "read more",
    "learn more",
    "find out",
    "find out more",
    "sign up",
    "log in",
    "contact us",
    "about us",
    "privacy policy",
    "cookie policy",
    "cookie settings",
    "terms conditions",
    "terms and conditions",
    "all rights reserved",
    "rights reserved",
    "skip content",
    "skip to content",
    "accept cookies",
    "follow us",
    "get in touch",
    "view all",
    "see all",
    "back to top",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPhrase {
    pub phrase: String,
    pub count: usize,
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .map(|w| w.trim_matches(|c: char| c == '\'' || c == '-').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// A phrase is meaningful when it does not start or end on a stopword, holds
/// no bare numbers, and has at least one word of four or more letters.
fn is_meaningful(words: &[String]) -> bool {
    let (Some(first), Some(last)) = (words.first(), words.last()) else {
        return false;
    };
    !is_stopword(first)
        && !is_stopword(last)
        && words.iter().all(|w| !w.chars().all(|c| c.is_ascii_digit()))
        && words.iter().any(|w| w.chars().filter(|c| c.is_alphabetic()).count() >= 4)
}

/// Phrases seen at least twice, most frequent first, at most [`MAX_PHRASES`].
#[must_use]
pub fn extract_phrases(text: &str) -> Vec<ContentPhrase> {
    let tokens = tokenize(text);
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for n in MIN_NGRAM..=MAX_NGRAM {
        for (pos, window) in tokens.windows(n).enumerate() {
            if !is_meaningful(window) {
                continue;
            }
            let phrase = window.join(" ");
            if STOP_PHRASES.contains(&phrase.as_str()) {
                continue;
            }
            let entry = counts.entry(phrase).or_insert((0, pos * MAX_NGRAM + n));
            entry.0 += 1;
        }
    }

    let mut phrases: Vec<(String, usize, usize)> = counts
        .into_iter()
        .filter(|(_, (count, _))| *count >= MIN_FREQUENCY)
        .map(|(phrase, (count, first_seen))| (phrase, count, first_seen))
        .collect();
    phrases.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    phrases.truncate(MAX_PHRASES);

    phrases
        .into_iter()
        .map(|(phrase, count, _)| ContentPhrase { phrase, count })
        .collect()
}
