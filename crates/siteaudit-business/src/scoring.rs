//! Weights and confidence bands shared by every extractor and the classifier.

/// Content score contribution per generic-keyword occurrence.
pub const GENERIC_KEYWORD_WEIGHT: u32 = 2;
/// Content score contribution per region-specific-term occurrence.
pub const REGION_TERM_WEIGHT: u32 = 3;

/// `(minimum content score, confidence)`, checked top to bottom.
pub const CONTENT_CONFIDENCE_BANDS: &[(u32, f64)] = &[(20, 0.9), (10, 0.8), (5, 0.7), (2, 0.6)];
pub const CONTENT_BASE_CONFIDENCE: f64 = 0.5;
/// Added when the winning content score is more than twice the runner-up's.
pub const CONTENT_DOMINANCE_BONUS: f64 = 0.1;

/// URL score contribution per matching same-domain link.
pub const URL_FRAGMENT_WEIGHT: u32 = 5;
pub const URL_SCORE_DIVISOR: f64 = 10.0;
pub const URL_MAX_CONFIDENCE: f64 = 0.9;

pub const MARKUP_CONFIDENCE: f64 = 0.95;
pub const DOMAIN_CONFIDENCE: f64 = 0.7;
pub const REGION_CONFIDENCE: f64 = 0.8;
pub const REGION_MIN_DISTINCT_TERMS: usize = 2;
pub const NAVIGATION_CONFIDENCE: f64 = 0.6;
pub const NAVIGATION_MIN_MATCHES: usize = 2;
/// Shortest category keyword the domain extractor will look for in a label.
pub const DOMAIN_MIN_KEYWORD_LEN: usize = 4;

/// Added once to a category backed by both content scoring and region terms.
pub const CORROBORATION_BONUS: f64 = 0.25;

/// Aggregated scores at or above these bounds map to `high` / `medium`.
pub const HIGH_CONFIDENCE_SCORE: f64 = 2.0;
pub const MEDIUM_CONFIDENCE_SCORE: f64 = 1.0;

pub const MAX_SECONDARY_TYPES: usize = 2;
pub const MAX_RELEVANT_KEYWORDS: usize = 10;

/// Confidence for a content-scoring winner.
#[must_use]
pub fn content_confidence(winner: u32, runner_up: u32) -> f64 {
    let base = CONTENT_CONFIDENCE_BANDS
        .iter()
        .find(|(min, _)| winner >= *min)
        .map_or(CONTENT_BASE_CONFIDENCE, |&(_, confidence)| confidence);
    let bonus = if f64::from(winner) > 2.0 * f64::from(runner_up) {
        CONTENT_DOMINANCE_BONUS
    } else {
        0.0
    };
    (base + bonus).min(1.0)
}

#[must_use]
pub fn url_confidence(score: u32) -> f64 {
    (f64::from(score) / URL_SCORE_DIVISOR).min(URL_MAX_CONFIDENCE)
}
