//! Search-suggestion lookups in the toolbar XML format.

use futures::future::BoxFuture;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use reqwest::{Client, Url};

use super::retry::retry_with_backoff;
use super::{build_client, check_status, parse_base_url, HttpSettings, SuggestionProvider};
use crate::error::ProviderError;

/// Client for `GET {base}?output=toolbar&q=<seed>`.
pub struct SuggestClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl SuggestClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidBaseUrl`] for a malformed `base_url`, or
    /// [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str, settings: &HttpSettings) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: parse_base_url(base_url)?,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    fn build_url(&self, seed: &str) -> Url {
        let encoded = utf8_percent_encode(seed, NON_ALPHANUMERIC);
        let mut url = self.base_url.clone();
        url.set_query(Some(&format!("output=toolbar&q={encoded}")));
        url
    }
}

impl SuggestionProvider for SuggestClient {
    fn suggest<'a>(&'a self, seed: &'a str) -> BoxFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move {
            let url = self.build_url(seed);
            let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || async {
                let response = check_status(self.client.get(url.clone()).send().await?)?;
                Ok(response.text().await?)
            })
            .await?;
            let suggestions = parse_suggestions(&body)?;
            tracing::debug!(seed, count = suggestions.len(), "suggestions fetched");
            Ok(suggestions)
        })
    }
}

fn data_attribute(element: &BytesStart<'_>) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"data")
        .map(|attr| match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        })
}

/// Collect the `data` attribute of every `<suggestion>` element.
///
/// Blank and repeated suggestions are dropped; order is preserved.
///
/// # Errors
///
/// Returns [`ProviderError::Xml`] if the document is malformed.
pub fn parse_suggestions(xml: &str) -> Result<Vec<String>, ProviderError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut suggestions: Vec<String> = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(e) | Event::Start(e)) => {
                if e.name().as_ref() != b"suggestion" {
                    continue;
                }
                if let Some(value) = data_attribute(&e) {
                    let value = value.trim().to_string();
                    if !value.is_empty() && !suggestions.contains(&value) {
                        suggestions.push(value);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ProviderError::Xml(e)),
            _ => {}
        }
    }
    Ok(suggestions)
}
