use thiserror::Error;

/// Errors returned by the external collaborator adapters.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// HTTP 429; `retry_after_secs` comes from the `Retry-After` header when present.
    #[error("rate limited by provider (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("{0} provider is not configured")]
    NotConfigured(&'static str),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Input rejected before analysis starts.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid domain: {0:?}")]
    InvalidDomain(String),

    #[error("content is {len} bytes, limit is {max}")]
    ContentTooLarge { len: usize, max: usize },
}
