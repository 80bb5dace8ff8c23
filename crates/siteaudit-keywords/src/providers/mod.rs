//! External collaborators: search volume, SERP position, search suggestions
//! and the company registry.
//!
//! The pipeline only sees the traits. HTTP adapters live in the submodules;
//! [`Disabled`] stands in for any collaborator that is not configured.

mod rank;
mod registry;
pub(crate) mod retry;
mod suggest;
mod volume;

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use siteaudit_business::RegistryRecord;
use siteaudit_core::AppConfig;

use crate::error::ProviderError;

pub use rank::HttpRankClient;
pub use registry::CompaniesHouseClient;
pub use suggest::{parse_suggestions, SuggestClient};
pub use volume::{HttpVolumeClient, VOLUME_CHUNK_SIZE};

/// One keyword's monthly search volume as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordVolume {
    pub keyword: String,
    pub volume: Option<u64>,
}

pub trait VolumeProvider: Send + Sync {
    fn search_volumes<'a>(
        &'a self,
        keywords: &'a [String],
        country: &'a str,
    ) -> BoxFuture<'a, Result<Vec<KeywordVolume>, ProviderError>>;
}

pub trait RankProvider: Send + Sync {
    /// Position of `domain` in the results for `keyword`, `None` if unranked.
    fn keyword_position<'a>(
        &'a self,
        keyword: &'a str,
        domain: &'a str,
    ) -> BoxFuture<'a, Result<Option<u32>, ProviderError>>;
}

pub trait SuggestionProvider: Send + Sync {
    fn suggest<'a>(&'a self, seed: &'a str) -> BoxFuture<'a, Result<Vec<String>, ProviderError>>;
}

pub trait RegistryProvider: Send + Sync {
    fn lookup_company<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<RegistryRecord>, ProviderError>>;
}

/// A collaborator that is switched off.
///
/// Volume lookups fail with [`ProviderError::NotConfigured`] so the analysis
/// reports the API as unavailable; the others return "nothing found".
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

impl VolumeProvider for Disabled {
    fn search_volumes<'a>(
        &'a self,
        _keywords: &'a [String],
        _country: &'a str,
    ) -> BoxFuture<'a, Result<Vec<KeywordVolume>, ProviderError>> {
        Box::pin(async { Err(ProviderError::NotConfigured("search volume")) })
    }
}

impl RankProvider for Disabled {
    fn keyword_position<'a>(
        &'a self,
        _keyword: &'a str,
        _domain: &'a str,
    ) -> BoxFuture<'a, Result<Option<u32>, ProviderError>> {
        Box::pin(async { Ok(None) })
    }
}

impl SuggestionProvider for Disabled {
    fn suggest<'a>(&'a self, _seed: &'a str) -> BoxFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

impl RegistryProvider for Disabled {
    fn lookup_company<'a>(
        &'a self,
        _name: &'a str,
    ) -> BoxFuture<'a, Result<Option<RegistryRecord>, ProviderError>> {
        Box::pin(async { Ok(None) })
    }
}

/// Transport settings shared by every HTTP adapter.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl HttpSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "siteaudit/0.1 (keyword-intelligence)".to_string(),
            max_retries: 3,
            backoff_base_ms: 500,
        }
    }
}

fn build_client(settings: &HttpSettings) -> Result<Client, ProviderError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(settings.user_agent.as_str())
        .build()?)
}

/// Parse a base URL, normalized to end in exactly one slash so that
/// `Url::join` appends to it rather than replacing the last segment.
fn parse_base_url(base_url: &str) -> Result<Url, ProviderError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ProviderError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

fn join_path(base: &Url, path: &str) -> Result<Url, ProviderError> {
    base.join(path).map_err(|e| ProviderError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

/// Map 429 and other non-2xx statuses to typed errors.
fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        return Err(ProviderError::RateLimited { retry_after_secs });
    }
    if !status.is_success() {
        return Err(ProviderError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(response)
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, ProviderError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Collaborators built from configuration; anything unconfigured is [`Disabled`].
pub struct ConfiguredProviders {
    pub volumes: Box<dyn VolumeProvider>,
    pub ranks: Box<dyn RankProvider>,
    pub suggestions: Box<dyn SuggestionProvider>,
    pub registry: Box<dyn RegistryProvider>,
}

impl ConfiguredProviders {
    /// Every collaborator disabled.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            volumes: Box::new(Disabled),
            ranks: Box::new(Disabled),
            suggestions: Box::new(Disabled),
            registry: Box::new(Disabled),
        }
    }

    /// Build HTTP adapters for every endpoint present in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if a configured base URL is invalid or an
    /// HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let settings = HttpSettings::from_config(config);
        let mut providers = Self::offline();

        if let Some(url) = &config.volume_api_url {
            providers.volumes = Box::new(HttpVolumeClient::with_base_url(
                url,
                config.volume_api_key.as_deref(),
                &settings,
            )?);
        }
        if let Some(url) = &config.rank_api_url {
            providers.ranks = Box::new(HttpRankClient::with_base_url(
                url,
                config.rank_api_key.as_deref(),
                &settings,
            )?);
        }
        if let Some(url) = &config.suggest_url {
            providers.suggestions = Box::new(SuggestClient::with_base_url(url, &settings)?);
        }
        if let Some(key) = &config.companies_house_api_key {
            providers.registry = Box::new(CompaniesHouseClient::with_base_url(
                key,
                &config.registry_api_url,
                &settings,
            )?);
        }

        tracing::debug!(
            volume = config.volume_api_url.is_some(),
            rank = config.rank_api_url.is_some(),
            suggest = config.suggest_url.is_some(),
            registry = config.companies_house_api_key.is_some(),
            "collaborators configured"
        );
        Ok(providers)
    }
}
