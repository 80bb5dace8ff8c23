//! Weighted-confidence aggregation of extractor evidence.

use siteaudit_core::CompanySize;

use crate::category::BusinessCategory;
use crate::scoring::{CORROBORATION_BONUS, MAX_RELEVANT_KEYWORDS, MAX_SECONDARY_TYPES};
use crate::signals::{self, contains_keyword, markup, matched_keywords, Page};
use crate::types::{
    BusinessDetectionResult, BusinessType, ConfidenceLevel, DetectionMethod, EvidenceCandidate,
};

/// Ordered from the largest tier down; the first tier with a hit wins.
const COMPANY_SIZE_LADDER: &[(CompanySize, &[&str])] = &[
    (
        CompanySize::Enterprise,
        &[
            "fortune 500",
            "ftse 100",
            "multinational",
            "global offices",
            "offices worldwide",
            "enterprise clients",
            "10,000 employees",
        ],
    ),
    (
        CompanySize::Large,
        &[
            "nationwide",
            "offices across",
            "national network",
            "over 500 employees",
            "500+ staff",
            "head office",
        ],
    ),
    (
        CompanySize::Medium,
        &[
            "regional offices",
            "over 50 employees",
            "50+ staff",
            "team of 50",
            "multiple locations",
            "branches",
        ],
    ),
    (
        CompanySize::Small,
        &[
            "family run",
            "family-run",
            "independent",
            "small team",
            "our team",
            "small business",
            "established in",
        ],
    ),
];

const LOCAL_BUSINESS_PHRASES: &[&str] = &[
    "near me",
    "local",
    "serving",
    "based in",
    "visit us",
    "find us",
    "our location",
    "opening hours",
    "opening times",
    "areas we cover",
    "call us today",
    "free quote",
];

const UK_MENTIONS: &[&str] = &[
    "uk",
    "united kingdom",
    "great britain",
    "britain",
    "england",
    "scotland",
    "wales",
    "northern ireland",
];

/// Per-category sum of candidate confidences.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category: BusinessCategory,
    pub score: f64,
    pub methods: Vec<DetectionMethod>,
}

/// Group candidates by category and sum their confidences, highest first.
///
/// A category found by both content scoring and region terms earns
/// [`CORROBORATION_BONUS`] on top of the sum.
#[must_use]
pub fn aggregate(candidates: &[EvidenceCandidate]) -> Vec<CategoryScore> {
    let mut scores: Vec<CategoryScore> = Vec::new();
    for candidate in candidates {
        match scores.iter_mut().find(|s| s.category == candidate.category) {
            Some(entry) => {
                entry.score += candidate.confidence;
                if !entry.methods.contains(&candidate.method) {
                    entry.methods.push(candidate.method);
                }
            }
            None => scores.push(CategoryScore {
                category: candidate.category,
                score: candidate.confidence,
                methods: vec![candidate.method],
            }),
        }
    }
    for entry in &mut scores {
        if entry.methods.contains(&DetectionMethod::Content)
            && entry.methods.contains(&DetectionMethod::Region)
        {
            entry.score += CORROBORATION_BONUS;
        }
    }
    scores.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.category.cmp(&b.category))
    });
    scores
}

/// Combine evidence into a primary classification and up to two runners-up.
///
/// A markup candidate promotes its category to primary regardless of the
/// other sums. With no candidates at all the fixed low-confidence default
/// is returned.
#[must_use]
pub fn combine(candidates: &[EvidenceCandidate], text: &str) -> (BusinessType, Vec<BusinessType>) {
    let mut ranked = aggregate(candidates);
    if ranked.is_empty() {
        return (default_business_type(), Vec::new());
    }

    let markup_category = candidates
        .iter()
        .find(|c| c.method == DetectionMethod::Markup)
        .map(|c| c.category);
    if let Some(category) = markup_category {
        if let Some(pos) = ranked.iter().position(|s| s.category == category) {
            let promoted = ranked.remove(pos);
            ranked.insert(0, promoted);
        }
    }

    let mut types = ranked.iter().map(|s| business_type(s, text));
    let Some(primary) = types.next() else {
        return (default_business_type(), Vec::new());
    };
    let secondary = types.take(MAX_SECONDARY_TYPES).collect();
    (primary, secondary)
}

/// The classification returned when no extractor fired.
#[must_use]
pub fn default_business_type() -> BusinessType {
    let category = BusinessCategory::FALLBACK;
    let profile = category.profile();
    BusinessType {
        category: profile.name.to_string(),
        category_id: category,
        subcategory: profile
            .subcategories
            .first()
            .map_or("General", |s| s.name)
            .to_string(),
        confidence: ConfidenceLevel::Low,
        score: 0.0,
        detection_methods: vec![DetectionMethod::Default],
        relevant_keywords: Vec::new(),
    }
}

fn business_type(score: &CategoryScore, text: &str) -> BusinessType {
    BusinessType {
        category: score.category.name().to_string(),
        category_id: score.category,
        subcategory: resolve_subcategory(score.category, text).to_string(),
        confidence: ConfidenceLevel::from_score(score.score),
        score: score.score,
        detection_methods: score.methods.clone(),
        relevant_keywords: matched_keywords(score.category, text)
            .into_iter()
            .take(MAX_RELEVANT_KEYWORDS)
            .map(|(kw, _)| kw.to_string())
            .collect(),
    }
}

/// First subcategory with a refinement keyword in `text`, else the default.
#[must_use]
pub fn resolve_subcategory(category: BusinessCategory, text: &str) -> &'static str {
    let subcategories = category.profile().subcategories;
    subcategories
        .iter()
        .find(|sub| sub.keywords.iter().any(|kw| contains_keyword(text, kw)))
        .or_else(|| subcategories.first())
        .map_or("General", |sub| sub.name)
}

#[must_use]
pub fn company_size(text: &str) -> CompanySize {
    COMPANY_SIZE_LADDER
        .iter()
        .find(|(_, phrases)| phrases.iter().any(|p| contains_keyword(text, p)))
        .map_or(CompanySize::Micro, |(size, _)| *size)
}

#[must_use]
pub fn is_local_business(html: &str, text: &str) -> bool {
    LOCAL_BUSINESS_PHRASES
        .iter()
        .any(|p| contains_keyword(text, p))
        || markup::declared_types(html)
            .iter()
            .any(|t| t == "LocalBusiness")
}

#[must_use]
pub fn is_uk_specific(domain: &str, text: &str) -> bool {
    domain.ends_with(".uk") || UK_MENTIONS.iter().any(|m| contains_keyword(text, m))
}

/// Classify the business behind `domain` from its raw HTML.
///
/// Total for any input, including empty or malformed HTML.
#[must_use]
pub fn detect_business(domain: &str, html: &str) -> BusinessDetectionResult {
    let page = Page::new(html, domain);
    let candidates = signals::extract_all(&page);
    let (primary_type, secondary_types) = combine(&candidates, &page.text);

    let mut detection_sources: Vec<String> = Vec::new();
    for candidate in &candidates {
        let method = candidate.method.as_str().to_string();
        if !detection_sources.contains(&method) {
            detection_sources.push(method);
        }
    }
    if detection_sources.is_empty() {
        detection_sources.push(DetectionMethod::Default.as_str().to_string());
    }

    let result = BusinessDetectionResult {
        uk_specific: is_uk_specific(&page.domain, &page.text),
        local_business: is_local_business(html, &page.text),
        company_size: company_size(&page.text),
        primary_type,
        secondary_types,
        detection_sources,
    };

    tracing::info!(
        domain = %page.domain,
        category = %result.primary_type.category,
        subcategory = %result.primary_type.subcategory,
        score = result.primary_type.score,
        candidates = candidates.len(),
        "business classified"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(category: BusinessCategory, confidence: f64, method: DetectionMethod) -> EvidenceCandidate {
        EvidenceCandidate { category, confidence, method }
    }

    #[test]
    fn aggregate_sums_confidence_per_category() {
        let ranked = aggregate(&[
            candidate(BusinessCategory::Marketing, 0.6, DetectionMethod::Navigation),
            candidate(BusinessCategory::LegalServices, 0.9, DetectionMethod::Content),
            candidate(BusinessCategory::LegalServices, 0.8, DetectionMethod::Region),
        ]);
        assert_eq!(ranked[0].category, BusinessCategory::LegalServices);
        assert!((ranked[0].score - (1.7 + CORROBORATION_BONUS)).abs() < 1e-9);
        assert_eq!(
            ranked[0].methods,
            vec![DetectionMethod::Content, DetectionMethod::Region]
        );
        assert_eq!(ranked[1].category, BusinessCategory::Marketing);
    }

    #[test]
    fn zero_candidates_yield_low_confidence_default() {
        let (primary, secondary) = combine(&[], "");
        assert_eq!(primary.category, "Business Services");
        assert_eq!(primary.subcategory, "General");
        assert_eq!(primary.confidence, ConfidenceLevel::Low);
        assert!(secondary.is_empty());
    }

    #[test]
    fn markup_category_is_promoted() {
        let (primary, secondary) = combine(
            &[
                candidate(BusinessCategory::Retail, 1.0, DetectionMethod::Content),
                candidate(BusinessCategory::Retail, 0.8, DetectionMethod::Region),
                candidate(BusinessCategory::FoodHospitality, 0.95, DetectionMethod::Markup),
            ],
            "",
        );
        assert_eq!(primary.category_id, BusinessCategory::FoodHospitality);
        assert!((primary.score - 0.95).abs() < 1e-9);
        assert_eq!(secondary[0].category_id, BusinessCategory::Retail);
    }

    #[test]
    fn secondary_types_are_capped_at_two() {
        let (_, secondary) = combine(
            &[
                candidate(BusinessCategory::LegalServices, 0.9, DetectionMethod::Content),
                candidate(BusinessCategory::Marketing, 0.8, DetectionMethod::Region),
                candidate(BusinessCategory::Retail, 0.7, DetectionMethod::Domain),
                candidate(BusinessCategory::Finance, 0.6, DetectionMethod::Navigation),
            ],
            "",
        );
        assert_eq!(secondary.len(), 2);
        assert_eq!(secondary[1].category_id, BusinessCategory::Retail);
    }

    #[test]
    fn subcategory_uses_first_matching_refinement() {
        assert_eq!(
            resolve_subcategory(BusinessCategory::LegalServices, "We handle divorce and probate"),
            "Family Law"
        );
        assert_eq!(
            resolve_subcategory(BusinessCategory::LegalServices, "General legal advice"),
            "General Practice"
        );
    }

    #[test]
    fn company_size_ladder_prefers_larger_tiers() {
        assert_eq!(company_size("A family run firm with offices nationwide"), CompanySize::Large);
        assert_eq!(company_size("Our team is friendly"), CompanySize::Small);
        assert_eq!(company_size("Hello"), CompanySize::Micro);
    }

    #[test]
    fn uk_specific_from_tld_or_mentions() {
        assert!(is_uk_specific("smith.co.uk", ""));
        assert!(is_uk_specific("smith.com", "Serving clients across England"));
        assert!(!is_uk_specific("smith.com", "Serving clients in Ohio"));
    }

    #[test]
    fn legal_content_alone_is_high_confidence() {
        let html = format!("<p>{}</p>", "solicitor conveyancing probate ".repeat(5));
        let result = detect_business("example.com", &html);
        assert_eq!(result.primary_type.category, "Legal Services");
        assert_eq!(result.primary_type.confidence, ConfidenceLevel::High);
        assert_eq!(
            result.primary_type.detection_methods,
            vec![DetectionMethod::Content, DetectionMethod::Region]
        );
        assert!(result
            .primary_type
            .relevant_keywords
            .contains(&"probate".to_string()));
    }

    #[test]
    fn legal_page_with_navigation_reports_every_source() {
        let body = "solicitor conveyancing probate ".repeat(5);
        let html = format!(
            r#"<html><head><title>Harrison &amp; Co</title></head><body>
            <nav><a href="/conveyancing">Conveyancing</a><a href="/probate">Probate</a></nav>
            <p>{body}</p></body></html>"#
        );
        let result = detect_business("harrisonandco.example", &html);
        assert_eq!(result.primary_type.category, "Legal Services");
        assert_eq!(result.primary_type.confidence, ConfidenceLevel::High);
        assert!(result.detection_sources.contains(&"content".to_string()));
        assert!(result.detection_sources.contains(&"url".to_string()));
    }

    #[test]
    fn content_without_region_terms_gets_no_bonus() {
        let ranked = aggregate(&[
            candidate(BusinessCategory::Retail, 0.9, DetectionMethod::Content),
            candidate(BusinessCategory::Retail, 0.7, DetectionMethod::Domain),
        ]);
        assert!((ranked[0].score - 1.6).abs() < 1e-9);
    }

    #[test]
    fn restaurant_markup_beats_keyword_noise() {
        let noise = "software platform cloud saas api integration automation ".repeat(4);
        let html = format!(
            r#"<script type="application/ld+json">{{"@context":"https://schema.org","@type":"Restaurant","name":"Trattoria"}}</script>
            <p>{noise}</p>"#
        );
        let result = detect_business("trattoria.example", &html);
        assert_eq!(result.primary_type.category, "Food & Hospitality");
        assert!(result
            .primary_type
            .detection_methods
            .contains(&DetectionMethod::Markup));
        assert!((result.primary_type.score - 0.95).abs() < 1e-9);
        assert_eq!(result.secondary_types[0].category_id, BusinessCategory::Technology);
    }

    #[test]
    fn empty_input_never_fails() {
        let result = detect_business("", "");
        assert_eq!(result.primary_type.category_id, BusinessCategory::BusinessServices);
        assert_eq!(result.primary_type.confidence, ConfidenceLevel::Low);
        assert_eq!(result.detection_sources, vec!["default".to_string()]);
        assert_eq!(result.company_size, CompanySize::Micro);
    }
}
