use crate::core::currency::{CurrencyPair, RateProvider};
use crate::core::error::LookupError;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Rate provider for the static currency-api layout,
/// `{base_url}/{from}/{to}.json` returning `{"date": "...", "<to>": <rate>}`.
pub struct CurrencyApiProvider {
    base_url: Url,
    client: reqwest::Client,
}

impl CurrencyApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("quickfx/1.0")
            .timeout(timeout)
            .build()?;
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            bail!("Base URL cannot have path segments: {}", base_url);
        }
        Ok(CurrencyApiProvider { base_url, client })
    }

    /// Currency codes are pushed as escaped path segments.
    fn url(&self, pair: &CurrencyPair) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(pair.from())
                .push(&format!("{}.json", pair.to()));
        }
        url
    }
}

fn request_error(pair: &CurrencyPair, source: reqwest::Error) -> LookupError {
    if source.is_timeout() {
        LookupError::Timeout { pair: pair.clone() }
    } else {
        LookupError::Request {
            pair: pair.clone(),
            source,
        }
    }
}

#[async_trait]
impl RateProvider for CurrencyApiProvider {
    #[instrument(name = "CurrencyApiFetch", skip(self), fields(pair = %pair))]
    async fn fetch(&self, pair: &CurrencyPair) -> Result<f64, LookupError> {
        let url = self.url(pair);
        debug!("Requesting currency rate from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(pair, e))?;

        if !response.status().is_success() {
            return Err(LookupError::Status {
                pair: pair.clone(),
                status: response.status(),
            });
        }

        let text = response.text().await.map_err(|e| request_error(pair, e))?;
        let data: Value = serde_json::from_str(&text).map_err(|source| LookupError::Parse {
            pair: pair.clone(),
            source,
        })?;

        let value = data
            .get(pair.to())
            .ok_or_else(|| LookupError::MissingRate { pair: pair.clone() })?;

        match value.as_f64() {
            Some(rate) if rate.is_finite() => Ok(rate),
            _ => Err(LookupError::InvalidRate {
                pair: pair.clone(),
                value: value.to_string(),
            }),
        }
    }
}
