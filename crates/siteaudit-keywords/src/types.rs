use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Commercial,
    Informational,
    Navigational,
    Transactional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordSource {
    Extracted,
    Semantic,
    Competitor,
    Suggestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    /// Short head terms are the most contested.
    #[must_use]
    pub fn from_word_count(words: usize) -> Self {
        match words {
            0 | 1 => Difficulty::High,
            2 => Difficulty::Medium,
            _ => Difficulty::Low,
        }
    }
}

/// Phrases of at least this many words are long-tail.
pub const LONGTAIL_MIN_WORDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCandidate {
    pub keyword: String,
    /// Always within `[0, 1]`.
    pub relevance_score: f64,
    pub intent: Intent,
    pub longtail: bool,
    pub source: KeywordSource,
    /// `None` whenever no provider supplied a number.
    pub search_volume: Option<u64>,
    pub difficulty: Option<Difficulty>,
    pub serp_position: Option<u32>,
}

impl KeywordCandidate {
    /// Build a candidate with normalized text, a clamped score and the
    /// word-count-derived flags filled in.
    #[must_use]
    pub fn new(keyword: &str, relevance: f64, intent: Intent, source: KeywordSource) -> Self {
        let keyword = normalize_keyword(keyword);
        let words = keyword.split_whitespace().count();
        Self {
            relevance_score: clamp_relevance(relevance),
            intent,
            longtail: words >= LONGTAIL_MIN_WORDS,
            source,
            search_volume: None,
            difficulty: Some(Difficulty::from_word_count(words)),
            serp_position: None,
            keyword,
        }
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.keyword.split_whitespace().count()
    }
}

/// Lowercase and collapse whitespace.
#[must_use]
pub fn normalize_keyword(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[must_use]
pub fn clamp_relevance(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Generated candidates grouped by the role they play.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedKeywordSet {
    pub primary: Vec<KeywordCandidate>,
    pub secondary: Vec<KeywordCandidate>,
    pub long_tail: Vec<KeywordCandidate>,
    pub local: Vec<KeywordCandidate>,
    pub commercial: Vec<KeywordCandidate>,
    pub informational: Vec<KeywordCandidate>,
    pub urgency: Vec<KeywordCandidate>,
    pub branded: Vec<KeywordCandidate>,
    pub total_generated: usize,
    /// Whether category-specific tables drove generation.
    pub industry_specific: bool,
}

impl GeneratedKeywordSet {
    /// Every candidate across all groups, in group order.
    #[must_use]
    pub fn all(&self) -> Vec<KeywordCandidate> {
        [
            &self.primary,
            &self.secondary,
            &self.long_tail,
            &self.local,
            &self.commercial,
            &self.informational,
            &self.urgency,
            &self.branded,
        ]
        .into_iter()
        .flat_map(|group| group.iter().cloned())
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    Full,
    SafeFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedKeywordAnalysis {
    pub domain: String,
    pub brand_name: String,
    pub branded: Vec<KeywordCandidate>,
    pub non_branded: Vec<KeywordCandidate>,
    pub top_keywords: Vec<KeywordCandidate>,
    /// Checked keywords the domain ranks for near the top of the results.
    pub above_fold: Vec<KeywordCandidate>,
    pub intent_distribution: BTreeMap<Intent, usize>,
    pub difficulty_distribution: BTreeMap<Difficulty, usize>,
    /// Mean relevance across every merged candidate.
    pub business_relevance_score: f64,
    pub total_candidates: usize,
    pub api_available: bool,
    pub method: AnalysisMethod,
    pub generated_at: DateTime<Utc>,
}

impl EnhancedKeywordAnalysis {
    /// The minimal valid result: empty lists, zero counts, no API data.
    #[must_use]
    pub fn safe_fallback(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            brand_name: String::new(),
            branded: Vec::new(),
            non_branded: Vec::new(),
            top_keywords: Vec::new(),
            above_fold: Vec::new(),
            intent_distribution: BTreeMap::new(),
            difficulty_distribution: BTreeMap::new(),
            business_relevance_score: 0.0,
            total_candidates: 0,
            api_available: false,
            method: AnalysisMethod::SafeFallback,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_normalizes_and_clamps() {
        let c = KeywordCandidate::new("  Emergency   PLUMBER London ", 1.7, Intent::Commercial, KeywordSource::Semantic);
        assert_eq!(c.keyword, "emergency plumber london");
        assert!((c.relevance_score - 1.0).abs() < f64::EPSILON);
        assert!(c.longtail);
        assert_eq!(c.difficulty, Some(Difficulty::Low));
        assert_eq!(c.search_volume, None);
    }

    #[test]
    fn nan_relevance_becomes_zero() {
        assert!(clamp_relevance(f64::NAN).abs() < f64::EPSILON);
        assert!(clamp_relevance(-0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn difficulty_from_word_count() {
        assert_eq!(Difficulty::from_word_count(1), Difficulty::High);
        assert_eq!(Difficulty::from_word_count(2), Difficulty::Medium);
        assert_eq!(Difficulty::from_word_count(4), Difficulty::Low);
    }

    #[test]
    fn safe_fallback_is_empty() {
        let a = EnhancedKeywordAnalysis::safe_fallback("example.com");
        assert_eq!(a.method, AnalysisMethod::SafeFallback);
        assert_eq!(a.total_candidates, 0);
        assert!(a.branded.is_empty() && a.non_branded.is_empty() && a.top_keywords.is_empty());
        assert!(!a.api_available);
    }

    #[test]
    fn null_volume_serializes_as_null() {
        let c = KeywordCandidate::new("plumber", 0.9, Intent::Commercial, KeywordSource::Extracted);
        let json = serde_json::to_value(&c).unwrap();
        assert!(json["searchVolume"].is_null());
        assert_eq!(json["intent"], "commercial");
        assert_eq!(json["relevanceScore"], 0.9);
    }
}
