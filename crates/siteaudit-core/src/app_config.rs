use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub default_country: String,
    pub thresholds_path: Option<PathBuf>,
    pub volume_api_url: Option<String>,
    pub volume_api_key: Option<String>,
    pub rank_api_url: Option<String>,
    pub rank_api_key: Option<String>,
    pub suggest_url: Option<String>,
    pub registry_api_url: String,
    pub companies_house_api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub serp_batch_size: usize,
    pub serp_batch_delay_ms: u64,
    pub max_html_bytes: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("default_country", &self.default_country)
            .field("thresholds_path", &self.thresholds_path)
            .field("volume_api_url", &self.volume_api_url)
            .field(
                "volume_api_key",
                &self.volume_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("rank_api_url", &self.rank_api_url)
            .field(
                "rank_api_key",
                &self.rank_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("suggest_url", &self.suggest_url)
            .field("registry_api_url", &self.registry_api_url)
            .field(
                "companies_house_api_key",
                &self.companies_house_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("serp_batch_size", &self.serp_batch_size)
            .field("serp_batch_delay_ms", &self.serp_batch_delay_ms)
            .field("max_html_bytes", &self.max_html_bytes)
            .finish()
    }
}
