//! Pipeline behaviour against in-memory collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;
use siteaudit_business::{build_location_context, detect_business, BusinessDetectionResult, RegistryRecord};
use siteaudit_keywords::filter::{brand_variations, is_branded};
use siteaudit_keywords::{
    analyze_keywords, audit_site, run_keyword_analysis, AnalysisError, AnalysisMethod,
    AnalysisOptions, Collaborators, Disabled, EnhancedKeywordAnalysis, KeywordVolume,
    ProviderError, RankProvider, RegistryProvider, SuggestionProvider, VolumeProvider,
};

const DOMAIN: &str = "leedsplumbing.co.uk";
const BRAND: &str = "Leeds Plumbing";
const HTML: &str = r#"<html><head><title>Leeds Plumbing | Emergency Plumber Leeds</title>
<meta property="og:site_name" content="Leeds Plumbing"></head><body>
<nav><ul><li><a href="/plumbing">Plumbing</a></li><li><a href="/boiler-repair">Boiler repair</a></li>
<li><a href="/heating">Heating</a></li></ul></nav>
<h1>Emergency plumber in Leeds</h1>
<p>We are a local plumber based in Leeds. Boiler repair, boiler servicing and central heating.
Our gas safe engineers handle boiler repair across Leeds and Bradford. Emergency plumber call outs,
boiler servicing and leak repairs for homes in Leeds.</p>
</body></html>"#;

struct FailingVolumes;

impl VolumeProvider for FailingVolumes {
    fn search_volumes<'a>(
        &'a self,
        _keywords: &'a [String],
        _country: &'a str,
    ) -> BoxFuture<'a, Result<Vec<KeywordVolume>, ProviderError>> {
        Box::pin(async {
            Err(ProviderError::UnexpectedStatus {
                status: 500,
                url: "http://volumes.test".to_string(),
            })
        })
    }
}

struct PanickingVolumes;

impl VolumeProvider for PanickingVolumes {
    fn search_volumes<'a>(
        &'a self,
        _keywords: &'a [String],
        _country: &'a str,
    ) -> BoxFuture<'a, Result<Vec<KeywordVolume>, ProviderError>> {
        panic!("volume backend returned a corrupt frame")
    }
}

struct FixedVolumes(u64);

impl VolumeProvider for FixedVolumes {
    fn search_volumes<'a>(
        &'a self,
        keywords: &'a [String],
        _country: &'a str,
    ) -> BoxFuture<'a, Result<Vec<KeywordVolume>, ProviderError>> {
        Box::pin(async move {
            Ok(keywords
                .iter()
                .map(|k| KeywordVolume {
                    keyword: k.clone(),
                    volume: Some(self.0),
                })
                .collect())
        })
    }
}

/// Ranks plumber keywords first, fails every keyword containing "reviews".
#[derive(Default)]
struct CountingRanks {
    calls: AtomicUsize,
}

impl RankProvider for CountingRanks {
    fn keyword_position<'a>(
        &'a self,
        keyword: &'a str,
        _domain: &'a str,
    ) -> BoxFuture<'a, Result<Option<u32>, ProviderError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if keyword.contains("reviews") {
                return Err(ProviderError::RateLimited {
                    retry_after_secs: None,
                });
            }
            if keyword.contains("plumber") {
                Ok(Some(1))
            } else {
                Ok(Some(14))
            }
        })
    }
}

struct StaticSuggestions(Vec<&'static str>);

impl SuggestionProvider for StaticSuggestions {
    fn suggest<'a>(&'a self, _seed: &'a str) -> BoxFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move { Ok(self.0.iter().map(|s| (*s).to_string()).collect()) })
    }
}

struct FixedRegistry;

impl RegistryProvider for FixedRegistry {
    fn lookup_company<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<RegistryRecord>, ProviderError>> {
        Box::pin(async move {
            Ok(Some(RegistryRecord {
                company_name: name.to_uppercase(),
                locality: Some("Leeds".to_string()),
                postal_code: Some("LS1 4AP".to_string()),
                region: None,
            }))
        })
    }
}

fn options() -> AnalysisOptions {
    AnalysisOptions {
        serp_batch_delay_ms: 0,
        ..AnalysisOptions::default()
    }
}

fn business() -> BusinessDetectionResult {
    detect_business(DOMAIN, HTML)
}

async fn analyze(collaborators: Collaborators<'_>) -> EnhancedKeywordAnalysis {
    let business = business();
    let location = build_location_context(HTML, business.local_business, None);
    analyze_keywords(DOMAIN, HTML, &business, BRAND, &location, collaborators, &options())
        .await
        .expect("analysis should succeed")
}

fn all_emitted(analysis: &EnhancedKeywordAnalysis) -> impl Iterator<Item = &siteaudit_keywords::KeywordCandidate> {
    analysis
        .branded
        .iter()
        .chain(&analysis.non_branded)
        .chain(&analysis.top_keywords)
        .chain(&analysis.above_fold)
}

#[tokio::test]
async fn volume_failure_nulls_every_volume() {
    let analysis = analyze(Collaborators {
        volumes: &FailingVolumes,
        ..Collaborators::offline()
    })
    .await;

    assert!(!analysis.api_available);
    assert_eq!(analysis.method, AnalysisMethod::Full);
    assert!(!analysis.non_branded.is_empty());
    assert!(all_emitted(&analysis).all(|k| k.search_volume.is_none()));
}

#[tokio::test]
async fn volumes_flow_through_when_provider_succeeds() {
    let analysis = analyze(Collaborators {
        volumes: &FixedVolumes(480),
        ..Collaborators::offline()
    })
    .await;

    assert!(analysis.api_available);
    assert!(!analysis.non_branded.is_empty());
    assert!(analysis
        .non_branded
        .iter()
        .all(|k| k.search_volume == Some(480)));
}

#[tokio::test]
async fn out_of_band_volumes_empty_the_non_branded_list() {
    let analysis = analyze(Collaborators {
        volumes: &FixedVolumes(5),
        ..Collaborators::offline()
    })
    .await;

    assert!(analysis.api_available);
    assert!(analysis.non_branded.is_empty());
}

#[tokio::test]
async fn branded_partition_is_strict() {
    let analysis = analyze(Collaborators::offline()).await;
    let variations = brand_variations(BRAND, DOMAIN, business().primary_type.category_id);

    assert!(!analysis.branded.is_empty());
    assert!(analysis
        .branded
        .iter()
        .all(|k| is_branded(&k.keyword, &variations)));
    assert!(analysis
        .non_branded
        .iter()
        .all(|k| !is_branded(&k.keyword, &variations)));
    assert!(!analysis
        .non_branded
        .iter()
        .any(|k| k.keyword.contains("leeds plumbing")));
}

#[tokio::test]
async fn caps_are_respected() {
    let analysis = analyze(Collaborators {
        volumes: &FixedVolumes(300),
        ..Collaborators::offline()
    })
    .await;
    let thresholds = options().thresholds;

    assert!(analysis.branded.len() <= thresholds.max_branded);
    assert!(analysis.non_branded.len() <= thresholds.max_non_branded);
    assert!(analysis.top_keywords.len() <= thresholds.max_top);
    assert!(all_emitted(&analysis).all(|k| (0.0..=1.0).contains(&k.relevance_score)));
}

#[tokio::test]
async fn serp_enrichment_is_capped_and_failures_stay_unranked() {
    let ranks = CountingRanks::default();
    let analysis = analyze(Collaborators {
        ranks: &ranks,
        ..Collaborators::offline()
    })
    .await;
    let thresholds = options().thresholds;

    let calls = ranks.calls.load(Ordering::SeqCst);
    assert!(calls > 0);
    assert!(calls <= thresholds.serp_branded_limit + thresholds.serp_non_branded_limit);

    let checked_branded = analysis.branded.len().min(thresholds.serp_branded_limit);
    assert!(analysis.branded[checked_branded..]
        .iter()
        .all(|k| k.serp_position.is_none()));
    assert!(analysis
        .branded
        .iter()
        .chain(&analysis.non_branded)
        .filter(|k| k.keyword.contains("reviews"))
        .all(|k| k.serp_position.is_none()));

    assert!(!analysis.above_fold.is_empty());
    assert!(analysis
        .above_fold
        .iter()
        .all(|k| k.serp_position.is_some_and(|p| p <= thresholds.above_fold_max_position)));
}

#[tokio::test]
async fn generic_suggestion_is_excluded_from_non_branded() {
    let suggestions = StaticSuggestions(vec!["best digital marketing agency", "boiler repair cost leeds"]);
    let analysis = analyze(Collaborators {
        suggestions: &suggestions,
        ..Collaborators::offline()
    })
    .await;

    assert!(!analysis
        .non_branded
        .iter()
        .any(|k| k.keyword == "best digital marketing agency"));
    assert!(analysis.total_candidates > 0);
}

#[tokio::test]
async fn empty_domain_falls_back_safely() {
    let business = business();
    let location = build_location_context(HTML, business.local_business, None);

    let err = analyze_keywords("", HTML, &business, BRAND, &location, Collaborators::offline(), &options())
        .await
        .expect_err("empty domain should be rejected");
    assert!(matches!(err, AnalysisError::InvalidDomain(_)));

    let fallback =
        run_keyword_analysis("", HTML, &business, BRAND, &location, Collaborators::offline(), &options())
            .await;
    assert_eq!(fallback.method, AnalysisMethod::SafeFallback);
    assert_eq!(fallback.total_candidates, 0);
    assert!(fallback.branded.is_empty());
    assert!(fallback.non_branded.is_empty());
    assert!(fallback.intent_distribution.is_empty());
}

#[tokio::test]
async fn collaborator_panic_falls_back_safely() {
    let business = business();
    let location = build_location_context(HTML, business.local_business, None);
    let collaborators = Collaborators {
        volumes: &PanickingVolumes,
        ..Collaborators::offline()
    };

    let analysis =
        run_keyword_analysis(DOMAIN, HTML, &business, BRAND, &location, collaborators, &options()).await;
    assert_eq!(analysis.method, AnalysisMethod::SafeFallback);
    assert_eq!(analysis.total_candidates, 0);
    assert!(analysis.top_keywords.is_empty());

    let audit = audit_site(DOMAIN, HTML, collaborators, &options()).await;
    assert_eq!(audit.keywords.method, AnalysisMethod::SafeFallback);
    assert_eq!(audit.brand.brand_name, BRAND);
}

#[tokio::test]
async fn oversized_page_yields_safe_fallback_audit() {
    let opts = AnalysisOptions {
        max_html_bytes: 64,
        ..options()
    };
    let audit = audit_site(DOMAIN, HTML, Collaborators::offline(), &opts).await;

    assert_eq!(audit.keywords.method, AnalysisMethod::SafeFallback);
    assert_eq!(audit.domain, DOMAIN);
    assert!(!audit.brand.brand_name.is_empty());
}

#[tokio::test]
async fn full_audit_serializes_with_camel_case_fields() {
    let audit = audit_site(
        DOMAIN,
        HTML,
        Collaborators {
            registry: &FixedRegistry,
            ranks: &Disabled,
            ..Collaborators::offline()
        },
        &options(),
    )
    .await;

    assert_eq!(audit.brand.brand_name, BRAND);
    assert_eq!(audit.keywords.method, AnalysisMethod::Full);
    let json = serde_json::to_value(&audit).expect("audit should serialize");
    assert!(json["auditId"].is_string());
    assert!(json["business"]["primaryType"].is_object());
    assert!(json["keywords"]["nonBranded"].is_array());
    assert_eq!(json["keywords"]["apiAvailable"], false);
}
