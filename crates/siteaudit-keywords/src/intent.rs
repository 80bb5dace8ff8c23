//! Regex-family intent classification.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Intent;

static COMMERCIAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:best|top|cheap|cheapest|affordable|compare|comparison|review|reviews|vs|price|prices|pricing|cost|costs|quote|quotes|hire|near me|services?|company|agency|specialists?)\b")
        .expect("valid commercial intent regex")
});
static INFORMATIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:how|what|why|when|where|who|which|guide|tips|ideas|examples|meaning|definition|learn|tutorial)\b|\?")
        .expect("valid informational intent regex")
});
static TRANSACTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:buy|order|book|booking|subscribe|download|sign up|signup|login|log in|account|register|checkout|purchase|discount|coupon|deal)\b")
        .expect("valid transactional intent regex")
});
static NAVIGATIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:contact|website|official|address|directions|phone number|opening hours|location)\b")
        .expect("valid navigational intent regex")
});

/// Classify a keyword by the first matching family.
///
/// Families are checked commercial, informational, transactional, then
/// navigational; anything unmatched is commercial.
#[must_use]
pub fn classify_intent(keyword: &str) -> Intent {
    if COMMERCIAL_RE.is_match(keyword) {
        return Intent::Commercial;
    }
    if INFORMATIONAL_RE.is_match(keyword) {
        return Intent::Informational;
    }
    if TRANSACTIONAL_RE.is_match(keyword) {
        return Intent::Transactional;
    }
    if NAVIGATIONAL_RE.is_match(keyword) {
        return Intent::Navigational;
    }
    Intent::Commercial
}
