//! Shared configuration and primitives for the site audit workspace.

pub mod app_config;
pub mod config;
pub mod size;
pub mod thresholds;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use size::CompanySize;
pub use thresholds::{load_thresholds, parse_thresholds, KeywordThresholds, VolumeBand, VolumeBands};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read thresholds file {path}: {source}")]
    ThresholdsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse thresholds file: {0}")]
    ThresholdsFileParse(#[from] serde_yaml::Error),

    #[error("thresholds validation failed: {0}")]
    Validation(String),
}
