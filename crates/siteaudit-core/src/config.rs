use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_REGISTRY_API_URL: &str = "https://api.company-information.service.gov.uk";
const DEFAULT_USER_AGENT: &str = "siteaudit/0.1 (keyword-intelligence)";

/// SERP lookups are batched; larger batches trip third-party rate limits.
const MAX_SERP_BATCH_SIZE: usize = 5;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SITEAUDIT_ENV", "development"))?;
    let log_level = or_default("SITEAUDIT_LOG_LEVEL", "info");
    let default_country = or_default("SITEAUDIT_COUNTRY", "GB").to_uppercase();
    if default_country.len() != 2 || !default_country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SITEAUDIT_COUNTRY".to_string(),
            reason: format!("expected a two-letter country code, got '{default_country}'"),
        });
    }

    let thresholds_path = optional("SITEAUDIT_THRESHOLDS_PATH").map(PathBuf::from);
    let volume_api_url = optional("SITEAUDIT_VOLUME_API_URL");
    let volume_api_key = optional("SITEAUDIT_VOLUME_API_KEY");
    let rank_api_url = optional("SITEAUDIT_RANK_API_URL");
    let rank_api_key = optional("SITEAUDIT_RANK_API_KEY");
    let suggest_url = optional("SITEAUDIT_SUGGEST_URL");
    let registry_api_url = or_default("SITEAUDIT_REGISTRY_API_URL", DEFAULT_REGISTRY_API_URL);
    let companies_house_api_key = optional("COMPANIES_HOUSE_API_KEY");

    let request_timeout_secs = parse_u64("SITEAUDIT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SITEAUDIT_USER_AGENT", DEFAULT_USER_AGENT);
    let max_retries = parse_u32("SITEAUDIT_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("SITEAUDIT_RETRY_BACKOFF_BASE_MS", "500")?;

    let serp_batch_size = parse_usize("SITEAUDIT_SERP_BATCH_SIZE", "3")?;
    if !(1..=MAX_SERP_BATCH_SIZE).contains(&serp_batch_size) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SITEAUDIT_SERP_BATCH_SIZE".to_string(),
            reason: format!("must be between 1 and {MAX_SERP_BATCH_SIZE}, got {serp_batch_size}"),
        });
    }
    let serp_batch_delay_ms = parse_u64("SITEAUDIT_SERP_BATCH_DELAY_MS", "1000")?;
    let max_html_bytes = parse_usize("SITEAUDIT_MAX_HTML_BYTES", "5000000")?;

    Ok(AppConfig {
        env,
        log_level,
        default_country,
        thresholds_path,
        volume_api_url,
        volume_api_key,
        rank_api_url,
        rank_api_key,
        suggest_url,
        registry_api_url,
        companies_house_api_key,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        serp_batch_size,
        serp_batch_delay_ms,
        max_html_bytes,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SITEAUDIT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
