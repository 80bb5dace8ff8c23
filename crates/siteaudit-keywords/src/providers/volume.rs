//! Search-volume lookups over a JSON HTTP API.

use futures::future::BoxFuture;
use reqwest::{Client, Url};
use serde::Serialize;

use super::retry::retry_with_backoff;
use super::{
    build_client, check_status, join_path, parse_base_url, read_json, HttpSettings, KeywordVolume,
    VolumeProvider,
};
use crate::error::ProviderError;

/// Keywords sent per request.
pub const VOLUME_CHUNK_SIZE: usize = 100;

#[derive(Serialize)]
struct VolumeRequest<'a> {
    keywords: &'a [String],
    country: &'a str,
}

/// Client for `POST {base}/v1/search-volume`.
pub struct HttpVolumeClient {
    client: Client,
    api_key: Option<String>,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl HttpVolumeClient {
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
            endpoint: join_path(&base, "v1/search-volume")?,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    async fn fetch_chunk(
        &self,
        keywords: &[String],
        country: &str,
    ) -> Result<Vec<KeywordVolume>, ProviderError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async {
            let mut request = self
                .client
                .post(self.endpoint.clone())
                .json(&VolumeRequest { keywords, country });
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }
            let response = check_status(request.send().await?)?;
            read_json(response, "search-volume").await
        })
        .await
    }
}

impl VolumeProvider for HttpVolumeClient {
    fn search_volumes<'a>(
        &'a self,
        keywords: &'a [String],
        country: &'a str,
    ) -> BoxFuture<'a, Result<Vec<KeywordVolume>, ProviderError>> {
        Box::pin(async move {
            let mut volumes = Vec::with_capacity(keywords.len());
            // One failing chunk fails the whole lookup; partial volumes are never returned.
            for chunk in keywords.chunks(VOLUME_CHUNK_SIZE) {
                volumes.extend(self.fetch_chunk(chunk, country).await?);
            }
            tracing::debug!(
                requested = keywords.len(),
                returned = volumes.len(),
                country,
                "search volumes fetched"
            );
            Ok(volumes)
        })
    }
}
