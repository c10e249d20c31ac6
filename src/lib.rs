pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::config::AppConfig;
use crate::core::{Converter, RateCache, RateResolver};
use crate::providers::CurrencyApiProvider;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Query { text: String, raw: bool },
    Interactive,
}

/// Wires the HTTP provider, a fresh rate cache and the configured settings.
pub fn build_converter(config: &AppConfig) -> Result<Converter<CurrencyApiProvider>> {
    let provider = CurrencyApiProvider::new(&config.provider.base_url, config.provider.timeout())
        .context("Failed to create HTTP client")?;
    let cache = Arc::new(RateCache::with_validity(config.cache.validity()));
    debug!(
        "Rate cache validity: {}s, provider: {}",
        cache.validity().as_secs(),
        config.provider.base_url
    );
    let resolver = RateResolver::new(provider, cache);
    Ok(Converter::new(config.quick_conversion.settings(), resolver))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("quickfx starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let converter = build_converter(&config)?;

    match command {
        AppCommand::Query { text, raw } => cli::query::run_query(&converter, &text, raw).await,
        AppCommand::Interactive => cli::query::run_interactive(&converter).await,
    }
}
