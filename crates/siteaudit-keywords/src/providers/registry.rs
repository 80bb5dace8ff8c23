//! Company-registry lookups against the Companies House search API.

use futures::future::BoxFuture;
use reqwest::{Client, Url};
use serde::Deserialize;
use siteaudit_business::RegistryRecord;

use super::retry::retry_with_backoff;
use super::{
    build_client, check_status, join_path, parse_base_url, read_json, HttpSettings,
    RegistryProvider,
};
use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://api.company-information.service.gov.uk/";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<CompanyItem>,
}

#[derive(Debug, Deserialize)]
struct CompanyItem {
    title: String,
    #[serde(default, alias = "registered_office_address")]
    address: Option<Address>,
    #[serde(default)]
    address_snippet: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    locality: Option<String>,
    postal_code: Option<String>,
    region: Option<String>,
}

pub struct CompaniesHouseClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl CompaniesHouseClient {
    /// Client for the production registry.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, settings: &HttpSettings) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, settings)
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidBaseUrl`] for a malformed `base_url`, or
    /// [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        settings: &HttpSettings,
    ) -> Result<Self, ProviderError> {
        let base = parse_base_url(base_url)?;
        Ok(Self {
            client: build_client(settings)?,
            api_key: api_key.to_owned(),
            endpoint: join_path(&base, "search/companies")?,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    fn build_url(&self, name: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", name)
            .append_pair("items_per_page", "1");
        url
    }
}

impl RegistryProvider for CompaniesHouseClient {
    fn lookup_company<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<RegistryRecord>, ProviderError>> {
        Box::pin(async move {
            let url = self.build_url(name);
            let body: SearchResponse =
                retry_with_backoff(self.max_retries, self.backoff_base_ms, || async {
                    let response = self
                        .client
                        .get(url.clone())
                        .basic_auth(&self.api_key, Some(""))
                        .send()
                        .await?;
                    read_json(check_status(response)?, "companies-house search").await
                })
                .await?;
            Ok(body.items.into_iter().next().map(into_record))
        })
    }
}

fn into_record(item: CompanyItem) -> RegistryRecord {
    let address = item.address.unwrap_or_default();
    let (snippet_locality, snippet_postcode) = item
        .address_snippet
        .as_deref()
        .map(split_snippet)
        .unwrap_or_default();
    RegistryRecord {
        company_name: item.title,
        locality: non_empty(address.locality).or(snippet_locality),
        postal_code: non_empty(address.postal_code).or(snippet_postcode),
        region: non_empty(address.region),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Locality and postcode from a one-line address such as
/// `"1 Park Row, Leeds, LS1 5HN"`. A last segment containing a digit is
/// taken as the postcode.
fn split_snippet(snippet: &str) -> (Option<String>, Option<String>) {
    let parts: Vec<&str> = snippet
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [] => (None, None),
        [.., locality, last] if last.chars().any(|c| c.is_ascii_digit()) => {
            (Some((*locality).to_string()), Some((*last).to_string()))
        }
        [.., last] => (Some((*last).to_string()), None),
    }
}
