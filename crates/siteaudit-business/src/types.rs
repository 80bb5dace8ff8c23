use serde::{Deserialize, Serialize};
use siteaudit_core::CompanySize;

use crate::category::BusinessCategory;
use crate::scoring::{HIGH_CONFIDENCE_SCORE, MEDIUM_CONFIDENCE_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Content,
    Url,
    Markup,
    Domain,
    Region,
    Navigation,
    /// Only used by the zero-evidence fallback.
    Default,
}

impl DetectionMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionMethod::Content => "content",
            DetectionMethod::Url => "url",
            DetectionMethod::Markup => "markup",
            DetectionMethod::Domain => "domain",
            DetectionMethod::Region => "region",
            DetectionMethod::Navigation => "navigation",
            DetectionMethod::Default => "default",
        }
    }
}

impl std::fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extractor's category guess.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceCandidate {
    pub category: BusinessCategory,
    pub confidence: f64,
    pub method: DetectionMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Band an aggregated evidence score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_CONFIDENCE_SCORE {
            ConfidenceLevel::High
        } else if score >= MEDIUM_CONFIDENCE_SCORE {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessType {
    /// Display name, e.g. `Legal Services`.
    pub category: String,
    pub category_id: BusinessCategory,
    pub subcategory: String,
    pub confidence: ConfidenceLevel,
    /// Aggregated evidence score the confidence band was derived from.
    pub score: f64,
    pub detection_methods: Vec<DetectionMethod>,
    pub relevant_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDetectionResult {
    pub primary_type: BusinessType,
    pub secondary_types: Vec<BusinessType>,
    pub uk_specific: bool,
    pub local_business: bool,
    pub company_size: CompanySize,
    pub detection_sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_bands() {
        assert_eq!(ConfidenceLevel::from_score(2.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(1.99), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(1.0), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.95), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.0), ConfidenceLevel::Low);
    }

    #[test]
    fn business_type_serializes_camel_case() {
        let t = BusinessType {
            category: "Legal Services".to_string(),
            category_id: BusinessCategory::LegalServices,
            subcategory: "Conveyancing".to_string(),
            confidence: ConfidenceLevel::High,
            score: 2.4,
            detection_methods: vec![DetectionMethod::Content, DetectionMethod::Url],
            relevant_keywords: vec!["conveyancing".to_string()],
        };
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["categoryId"], "legal_services");
        assert_eq!(json["confidence"], "high");
        assert_eq!(json["detectionMethods"][1], "url");
        assert!(json.get("relevantKeywords").is_some());
    }
}
