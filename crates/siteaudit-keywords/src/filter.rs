//! Branded / non-branded partition, relevance filtering and ranking.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use siteaudit_business::brand::clean::is_descriptor;
use siteaudit_business::html::domain_label;
use siteaudit_business::{mentions_region, BusinessCategory, BusinessDetectionResult};
use siteaudit_core::KeywordThresholds;

use crate::types::{normalize_keyword, Difficulty, Intent, KeywordCandidate};

/// Brand words shorter than this are too ambiguous to match on their own.
pub const MIN_BRAND_WORD_LEN: usize = 4;

/// Terms too broad to rank for without something more specific alongside.
pub const GENERIC_TERMS: &[&str] = &[
    "marketing",
    "digital marketing",
    "online marketing",
    "web design",
    "website design",
    "seo",
    "seo services",
    "social media",
    "advertising",
    "branding",
    "business",
    "business services",
    "services",
    "solutions",
    "consulting",
    "design",
];

/// Modifiers that make a query specific whatever the category.
const SPECIFIC_MODIFIERS: &[&str] = &[
    "near me",
    "local",
    "best",
    "cheap",
    "affordable",
    "emergency",
    "professional",
    "specialist",
    "certified",
    "independent",
];

/// Everything the filter needs to know about the audited business.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub brand: &'a str,
    pub domain: &'a str,
    pub business: &'a BusinessDetectionResult,
    pub thresholds: &'a KeywordThresholds,
    /// Volume bands only apply when volumes were actually fetched.
    pub api_available: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedKeywords {
    pub branded: Vec<KeywordCandidate>,
    pub non_branded: Vec<KeywordCandidate>,
    pub top_keywords: Vec<KeywordCandidate>,
}

fn contains_phrase(keyword: &str, phrase: &str) -> bool {
    !phrase.is_empty() && format!(" {keyword} ").contains(&format!(" {phrase} "))
}

fn push_unique(out: &mut Vec<String>, value: String) {
    if value.chars().count() >= 2 && !out.contains(&value) {
        out.push(value);
    }
}

fn is_descriptive_word(word: &str, category: BusinessCategory) -> bool {
    is_descriptor(word)
        || mentions_region(word)
        || category.all_keywords().any(|kw| kw.eq_ignore_ascii_case(word))
}

fn compact(value: &str) -> String {
    value.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// `acme's` and `acme’s` read as `acme`.
fn strip_possessives(keyword: &str) -> String {
    keyword
        .split(' ')
        .map(|word| {
            word.strip_suffix("'s")
                .or_else(|| word.strip_suffix("\u{2019}s"))
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every form of the brand a searcher might type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandVariations {
    /// The whole brand, spaced and compound. Matched anywhere in a keyword.
    pub full: Vec<String>,
    /// Distinctive brand words and the domain label. Matched as whole words.
    pub words: Vec<String>,
}

impl BrandVariations {
    #[must_use]
    pub fn contains(&self, form: &str) -> bool {
        self.iter().any(|v| v == form)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.full.iter().chain(&self.words).map(String::as_str)
    }
}

/// The full brand, its spaced and compound forms, the domain label, and each
/// brand word long enough to be distinctive that does not merely describe the
/// business or name a place.
#[must_use]
pub fn brand_variations(brand: &str, domain: &str, category: BusinessCategory) -> BrandVariations {
    let mut out = BrandVariations::default();
    let brand = normalize_keyword(brand);
    if !brand.is_empty() {
        push_unique(&mut out.full, brand.clone());
        if brand.contains('-') {
            push_unique(&mut out.full, brand.replace('-', " "));
        }
        push_unique(&mut out.full, compact(&brand));
        for word in brand.split([' ', '-']) {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            if word.chars().count() >= MIN_BRAND_WORD_LEN && !is_descriptive_word(word, category) {
                push_unique(&mut out.words, word.to_string());
            }
        }
    }

    let label = domain_label(domain);
    if label.chars().count() >= 3 && !is_descriptive_word(&label, category) {
        if label.contains('-') {
            push_unique(&mut out.words, label.replace('-', " "));
            push_unique(&mut out.words, label.replace('-', ""));
        } else {
            push_unique(&mut out.words, label);
        }
    }
    out
}

/// A keyword is branded when it contains the whole brand in any form, or a
/// distinctive brand word on its own.
#[must_use]
pub fn is_branded(keyword: &str, variations: &BrandVariations) -> bool {
    let keyword = strip_possessives(&normalize_keyword(keyword));
    let compact_keyword = compact(&keyword);
    let whole_brand = variations.full.iter().any(|v| {
        keyword.contains(v.as_str()) || compact_keyword.contains(compact(v).as_str())
    });
    whole_brand
        || variations.words.iter().any(|v| {
            contains_phrase(&keyword, v)
                || (!v.contains(' ') && v.len() >= 6 && compact_keyword.contains(v.as_str()))
        })
}

fn service_phrases(business: &BusinessDetectionResult) -> impl Iterator<Item = &'static str> + '_ {
    std::iter::once(business.primary_type.category_id)
        .chain(business.secondary_types.iter().map(|t| t.category_id))
        .flat_map(|c| c.profile().service_phrases.iter().copied())
}

fn overlaps_service(keyword: &str, business: &BusinessDetectionResult) -> bool {
    service_phrases(business).any(|p| contains_phrase(keyword, p))
}

fn has_modifier(keyword: &str, business: &BusinessDetectionResult) -> bool {
    SPECIFIC_MODIFIERS
        .iter()
        .chain(business.primary_type.category_id.profile().modifiers.iter())
        .any(|m| contains_phrase(keyword, m))
}

/// Broad terms survive only when a brand, a place or a service anchors them.
#[must_use]
pub fn is_too_generic(
    keyword: &str,
    variations: &BrandVariations,
    business: &BusinessDetectionResult,
) -> bool {
    if GENERIC_TERMS.contains(&keyword) {
        return true;
    }
    let has_generic = GENERIC_TERMS.iter().any(|g| contains_phrase(keyword, g));
    has_generic
        && !is_branded(keyword, variations)
        && !mentions_region(keyword)
        && !overlaps_service(keyword, business)
}

/// Brand, place, length, modifier or multi-word service overlap.
#[must_use]
pub fn is_business_specific(
    candidate: &KeywordCandidate,
    variations: &BrandVariations,
    business: &BusinessDetectionResult,
) -> bool {
    let keyword = candidate.keyword.as_str();
    is_branded(keyword, variations)
        || mentions_region(keyword)
        || candidate.word_count() >= 3
        || has_modifier(keyword, business)
        || service_phrases(business)
            .filter(|p| p.contains(' '))
            .any(|p| contains_phrase(keyword, p))
}

fn passes_non_branded(
    candidate: &KeywordCandidate,
    variations: &BrandVariations,
    ctx: &FilterContext<'_>,
) -> bool {
    if candidate.relevance_score < ctx.thresholds.min_relevance {
        return false;
    }
    if ctx.api_available {
        let band = ctx.thresholds.volume_band(ctx.business.company_size);
        match candidate.search_volume {
            Some(volume) if band.contains(volume) => {}
            _ => return false,
        }
    }
    !is_too_generic(&candidate.keyword, variations, ctx.business)
        && is_business_specific(candidate, variations, ctx.business)
}

/// Relevance, then volume, then keyword text.
fn rank_order(a: &KeywordCandidate, b: &KeywordCandidate) -> Ordering {
    b.relevance_score
        .total_cmp(&a.relevance_score)
        .then_with(|| b.search_volume.cmp(&a.search_volume))
        .then_with(|| a.keyword.cmp(&b.keyword))
}

/// Both partitions merged in rank order, capped at `max`.
#[must_use]
pub fn top_combined(
    branded: &[KeywordCandidate],
    non_branded: &[KeywordCandidate],
    max: usize,
) -> Vec<KeywordCandidate> {
    let mut top: Vec<KeywordCandidate> = branded.iter().chain(non_branded).cloned().collect();
    top.sort_by(rank_order);
    top.truncate(max);
    top
}

/// Split, filter, sort and cap the candidate pool.
#[must_use]
pub fn rank_keywords(candidates: &[KeywordCandidate], ctx: &FilterContext<'_>) -> RankedKeywords {
    let variations = brand_variations(ctx.brand, ctx.domain, ctx.business.primary_type.category_id);

    let (mut branded, rest): (Vec<KeywordCandidate>, Vec<KeywordCandidate>) = candidates
        .iter()
        .cloned()
        .partition(|c| is_branded(&c.keyword, &variations));
    let considered = rest.len();
    let mut non_branded: Vec<KeywordCandidate> = rest
        .into_iter()
        .filter(|c| passes_non_branded(c, &variations, ctx))
        .collect();

    branded.sort_by(rank_order);
    branded.truncate(ctx.thresholds.max_branded);
    non_branded.sort_by(rank_order);
    non_branded.truncate(ctx.thresholds.max_non_branded);

    let top_keywords = top_combined(&branded, &non_branded, ctx.thresholds.max_top);

    tracing::debug!(
        variations = ?variations,
        branded = branded.len(),
        non_branded = non_branded.len(),
        rejected = considered - non_branded.len(),
        "keywords ranked"
    );
    RankedKeywords {
        branded,
        non_branded,
        top_keywords,
    }
}

#[must_use]
pub fn intent_distribution<'a>(
    keywords: impl IntoIterator<Item = &'a KeywordCandidate>,
) -> BTreeMap<Intent, usize> {
    let mut histogram = BTreeMap::new();
    for k in keywords {
        *histogram.entry(k.intent).or_insert(0) += 1;
    }
    histogram
}

#[must_use]
pub fn difficulty_distribution<'a>(
    keywords: impl IntoIterator<Item = &'a KeywordCandidate>,
) -> BTreeMap<Difficulty, usize> {
    let mut histogram = BTreeMap::new();
    for difficulty in keywords.into_iter().filter_map(|k| k.difficulty) {
        *histogram.entry(difficulty).or_insert(0) += 1;
    }
    histogram
}

/// Mean relevance, `0.0` for an empty pool.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn business_relevance_score(candidates: &[KeywordCandidate]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    candidates.iter().map(|c| c.relevance_score).sum::<f64>() / candidates.len() as f64
}
