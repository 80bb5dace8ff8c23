use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use siteaudit_core::{load_thresholds, AppConfig, KeywordThresholds};
use siteaudit_keywords::{audit_site, AnalysisOptions, ConfiguredProviders};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "siteaudit")]
#[command(about = "Business classification, brand and keyword audit for a web page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify the business behind a page.
    Classify {
        #[arg(long)]
        domain: String,
        /// HTML file to read, or `-` for stdin.
        #[arg(long)]
        html: PathBuf,
    },
    /// Identify the brand name of a page.
    Brand {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        html: PathBuf,
    },
    /// Run the full audit, including keyword analysis.
    Audit {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        html: PathBuf,
        /// Overrides `SITEAUDIT_COUNTRY`.
        #[arg(long)]
        country: Option<String>,
        /// Skip every external collaborator.
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = siteaudit_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Classify { domain, html } => {
            let html = read_html(&html)?;
            print_json(&siteaudit_business::detect_business(&domain, &html))
        }
        Commands::Brand { domain, html } => {
            let html = read_html(&html)?;
            print_json(&siteaudit_business::identify_brand(&domain, &html))
        }
        Commands::Audit {
            domain,
            html,
            country,
            offline,
        } => {
            let html = read_html(&html)?;
            run_audit(&config, &domain, &html, country, offline).await
        }
    }
}

async fn run_audit(
    config: &AppConfig,
    domain: &str,
    html: &str,
    country: Option<String>,
    offline: bool,
) -> anyhow::Result<()> {
    let thresholds = match &config.thresholds_path {
        Some(path) => load_thresholds(path)?,
        None => KeywordThresholds::default(),
    };
    let mut options = AnalysisOptions::from_config(config, thresholds);
    if let Some(country) = country {
        options.country = country;
    }

    let providers = if offline {
        ConfiguredProviders::offline()
    } else {
        ConfiguredProviders::from_config(config)?
    };

    tracing::info!(domain, country = %options.country, offline, "starting audit");
    let audit = audit_site(domain, html, providers.collaborators(), &options).await;
    print_json(&audit)
}

fn read_html(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("failed to read HTML from stdin")?;
        return Ok(html);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests;
