//! SERP-position lookups.

use futures::future::BoxFuture;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::retry::retry_with_backoff;
use super::{
    build_client, check_status, join_path, parse_base_url, read_json, HttpSettings, RankProvider,
};
use crate::error::ProviderError;

#[derive(Debug, Deserialize)]
struct PositionResponse {
    position: Option<u32>,
}

/// Client for `GET {base}/v1/serp-position?keyword=&domain=`.
pub struct HttpRankClient {
    client: Client,
    api_key: Option<String>,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl HttpRankClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidBaseUrl`] for a malformed `base_url`, or
    /// [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        base_url: &str,
        api_key: Option<&str>,
        settings: &HttpSettings,
    ) -> Result<Self, ProviderError> {
        let base = parse_base_url(base_url)?;
        Ok(Self {
            client: build_client(settings)?,
            api_key: api_key.map(str::to_owned),
            endpoint: join_path(&base, "v1/serp-position")?,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    fn build_url(&self, keyword: &str, domain: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("keyword", keyword)
            .append_pair("domain", domain);
        url
    }
}

impl RankProvider for HttpRankClient {
    fn keyword_position<'a>(
        &'a self,
        keyword: &'a str,
        domain: &'a str,
    ) -> BoxFuture<'a, Result<Option<u32>, ProviderError>> {
        Box::pin(async move {
            let url = self.build_url(keyword, domain);
            let body: PositionResponse =
                retry_with_backoff(self.max_retries, self.backoff_base_ms, || async {
                    let mut request = self.client.get(url.clone());
                    if let Some(key) = &self.api_key {
                        request = request.bearer_auth(key);
                    }
                    let response = check_status(request.send().await?)?;
                    read_json(response, "serp-position").await
                })
                .await?;
            // Position 0 is not a ranking.
            Ok(body.position.filter(|p| *p > 0))
        })
    }
}
