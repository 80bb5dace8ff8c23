//! End-to-end keyword analysis and the full site audit.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use chrono::Utc;
use futures::FutureExt;
use serde::Serialize;
use siteaudit_business::html::{normalize_domain, visible_text};
use siteaudit_business::{
    build_location_context, detect_business, identify_brand, BrandIdentification,
    BusinessDetectionResult, LocationContext, RegistryRecord,
};
use siteaudit_core::{AppConfig, KeywordThresholds};
use uuid::Uuid;

use crate::content::extract_phrases;
use crate::discovery::{discover, enrich_positions};
use crate::error::AnalysisError;
use crate::filter::{
    business_relevance_score, difficulty_distribution, intent_distribution, rank_keywords,
    top_combined, FilterContext,
};
use crate::generator::{generate_keywords, GenerationContext};
use crate::providers::{
    ConfiguredProviders, Disabled, RankProvider, RegistryProvider, SuggestionProvider,
    VolumeProvider,
};
use crate::types::{AnalysisMethod, EnhancedKeywordAnalysis, KeywordCandidate};

static DISABLED: Disabled = Disabled;

/// Borrowed handles to every external collaborator.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub volumes: &'a dyn VolumeProvider,
    pub ranks: &'a dyn RankProvider,
    pub suggestions: &'a dyn SuggestionProvider,
    pub registry: &'a dyn RegistryProvider,
}

impl Collaborators<'static> {
    #[must_use]
    pub fn offline() -> Self {
        Self {
            volumes: &DISABLED,
            ranks: &DISABLED,
            suggestions: &DISABLED,
            registry: &DISABLED,
        }
    }
}

impl ConfiguredProviders {
    #[must_use]
    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            volumes: &*self.volumes,
            ranks: &*self.ranks,
            suggestions: &*self.suggestions,
            registry: &*self.registry,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub country: String,
    pub thresholds: KeywordThresholds,
    pub serp_batch_size: usize,
    pub serp_batch_delay_ms: u64,
    pub max_html_bytes: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            country: "GB".to_string(),
            thresholds: KeywordThresholds::default(),
            serp_batch_size: 3,
            serp_batch_delay_ms: 1_000,
            max_html_bytes: 5_000_000,
        }
    }
}

impl AnalysisOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig, thresholds: KeywordThresholds) -> Self {
        Self {
            country: config.default_country.clone(),
            thresholds,
            serp_batch_size: config.serp_batch_size,
            serp_batch_delay_ms: config.serp_batch_delay_ms,
            max_html_bytes: config.max_html_bytes,
        }
    }
}

fn validate_input(domain: &str, html: &str, max_html_bytes: usize) -> Result<String, AnalysisError> {
    let normalized = normalize_domain(domain);
    if normalized.is_empty() || normalized.contains(char::is_whitespace) {
        return Err(AnalysisError::InvalidDomain(domain.to_string()));
    }
    if html.len() > max_html_bytes {
        return Err(AnalysisError::ContentTooLarge {
            len: html.len(),
            max: max_html_bytes,
        });
    }
    Ok(normalized)
}

fn above_fold(keywords: &[KeywordCandidate], max_position: u32) -> Vec<KeywordCandidate> {
    keywords
        .iter()
        .filter(|c| c.serp_position.is_some_and(|p| p <= max_position))
        .cloned()
        .collect()
}

/// Generate, discover, enrich, filter and rank keywords for one page.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidDomain`] for an empty or malformed domain
/// and [`AnalysisError::ContentTooLarge`] when `html` exceeds
/// `options.max_html_bytes`. Collaborator failures are not errors; they
/// degrade the affected fields to `None`.
pub async fn analyze_keywords(
    domain: &str,
    html: &str,
    business: &BusinessDetectionResult,
    brand: &str,
    location: &LocationContext,
    collaborators: Collaborators<'_>,
    options: &AnalysisOptions,
) -> Result<EnhancedKeywordAnalysis, AnalysisError> {
    let domain = validate_input(domain, html, options.max_html_bytes)?;
    let category = business.primary_type.category_id;

    let content_phrases = extract_phrases(&visible_text(html));
    let generated = generate_keywords(&GenerationContext {
        business,
        location,
        brand,
        content_phrases: &content_phrases,
    });

    let outcome = discover(
        &generated,
        &content_phrases,
        category,
        collaborators.suggestions,
        collaborators.volumes,
        &options.country,
    )
    .await;

    let thresholds = &options.thresholds;
    let mut ranked = rank_keywords(
        &outcome.candidates,
        &FilterContext {
            brand,
            domain: &domain,
            business,
            thresholds,
            api_available: outcome.api_available,
        },
    );

    let delay = Duration::from_millis(options.serp_batch_delay_ms);
    enrich_positions(
        collaborators.ranks,
        &mut ranked.branded,
        &domain,
        thresholds.serp_branded_limit,
        options.serp_batch_size,
        delay,
    )
    .await;
    enrich_positions(
        collaborators.ranks,
        &mut ranked.non_branded,
        &domain,
        thresholds.serp_non_branded_limit,
        options.serp_batch_size,
        delay,
    )
    .await;

    let top_keywords = top_combined(&ranked.branded, &ranked.non_branded, thresholds.max_top);
    let mut above = above_fold(&ranked.branded, thresholds.above_fold_max_position);
    above.extend(above_fold(&ranked.non_branded, thresholds.above_fold_max_position));

    let emitted = ranked.branded.iter().chain(ranked.non_branded.iter());
    let analysis = EnhancedKeywordAnalysis {
        brand_name: brand.to_string(),
        intent_distribution: intent_distribution(emitted.clone()),
        difficulty_distribution: difficulty_distribution(emitted),
        business_relevance_score: business_relevance_score(&outcome.candidates),
        total_candidates: outcome.candidates.len(),
        api_available: outcome.api_available,
        method: AnalysisMethod::Full,
        generated_at: Utc::now(),
        branded: ranked.branded,
        non_branded: ranked.non_branded,
        top_keywords,
        above_fold: above,
        domain,
    };

    tracing::info!(
        domain = %analysis.domain,
        branded = analysis.branded.len(),
        non_branded = analysis.non_branded.len(),
        above_fold = analysis.above_fold.len(),
        api_available = analysis.api_available,
        relevance = analysis.business_relevance_score,
        "keyword analysis complete"
    );
    Ok(analysis)
}

/// [`analyze_keywords`], with any error or panic replaced by
/// [`EnhancedKeywordAnalysis::safe_fallback`].
pub async fn run_keyword_analysis(
    domain: &str,
    html: &str,
    business: &BusinessDetectionResult,
    brand: &str,
    location: &LocationContext,
    collaborators: Collaborators<'_>,
    options: &AnalysisOptions,
) -> EnhancedKeywordAnalysis {
    let analysis = AssertUnwindSafe(analyze_keywords(
        domain,
        html,
        business,
        brand,
        location,
        collaborators,
        options,
    ))
    .catch_unwind()
    .await;
    match analysis {
        Ok(Ok(analysis)) => analysis,
        Ok(Err(e)) => {
            tracing::warn!(domain, error = %e, "keyword analysis failed, returning safe fallback");
            EnhancedKeywordAnalysis::safe_fallback(domain)
        }
        Err(_) => {
            tracing::error!(domain, "keyword analysis panicked, returning safe fallback");
            EnhancedKeywordAnalysis::safe_fallback(domain)
        }
    }
}

/// Everything known about one audited site.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAudit {
    pub audit_id: Uuid,
    pub domain: String,
    pub business: BusinessDetectionResult,
    pub brand: BrandIdentification,
    pub location: LocationContext,
    pub keywords: EnhancedKeywordAnalysis,
}

async fn lookup_registry(registry: &dyn RegistryProvider, brand: &str) -> Option<RegistryRecord> {
    if brand.trim().is_empty() {
        return None;
    }
    match registry.lookup_company(brand).await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(brand, error = %e, "registry lookup failed");
            None
        }
    }
}

/// Classify the business, identify the brand, resolve location and run the
/// keyword analysis. Never fails.
pub async fn audit_site(
    domain: &str,
    html: &str,
    collaborators: Collaborators<'_>,
    options: &AnalysisOptions,
) -> SiteAudit {
    let audit_id = Uuid::new_v4();
    let page = if html.len() > options.max_html_bytes {
        tracing::warn!(
            domain,
            len = html.len(),
            max = options.max_html_bytes,
            "page too large, classifying without content"
        );
        ""
    } else {
        html
    };

    let business = detect_business(domain, page);
    let brand = identify_brand(domain, page);

    // Companies House only covers UK companies.
    let registry = if business.uk_specific {
        lookup_registry(collaborators.registry, &brand.brand_name).await
    } else {
        None
    };
    let location = build_location_context(page, business.local_business, registry.as_ref());

    let keywords = run_keyword_analysis(
        domain,
        html,
        &business,
        &brand.brand_name,
        &location,
        collaborators,
        options,
    )
    .await;

    tracing::info!(
        %audit_id,
        domain,
        category = %business.primary_type.category,
        brand = %brand.brand_name,
        "site audit complete"
    );
    SiteAudit {
        audit_id,
        domain: normalize_domain(domain),
        business,
        brand,
        location,
        keywords,
    }
}
