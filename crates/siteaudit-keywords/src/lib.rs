//! Keyword intelligence for an audited site: candidate generation, discovery,
//! volume and SERP enrichment, and the branded / non-branded ranking.
//!
//! The entry points are [`audit_site`] for the whole chain and
//! [`run_keyword_analysis`] when business, brand and location are already
//! known. Neither returns an error; see [`analyze_keywords`] for the fallible
//! core.

pub mod content;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod generator;
pub mod intent;
pub mod pipeline;
pub mod providers;
pub mod types;

pub use error::{AnalysisError, ProviderError};
pub use generator::{generate_keywords, GenerationContext};
pub use intent::classify_intent;
pub use pipeline::{
    analyze_keywords, audit_site, run_keyword_analysis, AnalysisOptions, Collaborators, SiteAudit,
};
pub use providers::{
    CompaniesHouseClient, ConfiguredProviders, Disabled, HttpRankClient, HttpSettings,
    HttpVolumeClient, KeywordVolume, RankProvider, RegistryProvider, SuggestClient,
    SuggestionProvider, VolumeProvider,
};
pub use types::{
    AnalysisMethod, Difficulty, EnhancedKeywordAnalysis, GeneratedKeywordSet, Intent,
    KeywordCandidate, KeywordSource,
};
