use crate::core::currency::CurrencyPair;
use thiserror::Error;

/// Failure of a remote rate lookup. Never cached.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Request error for currency pair {pair}: {source}")]
    Request {
        pair: CurrencyPair,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request timed out for currency pair: {pair}")]
    Timeout { pair: CurrencyPair },

    #[error("HTTP error: {status} for currency pair: {pair}")]
    Status {
        pair: CurrencyPair,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse JSON response for {pair}: {source}")]
    Parse {
        pair: CurrencyPair,
        #[source]
        source: serde_json::Error,
    },

    #[error("No rate data found for currency pair: {pair}")]
    MissingRate { pair: CurrencyPair },

    #[error("Invalid rate {value} for currency pair: {pair}")]
    InvalidRate { pair: CurrencyPair, value: String },
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Converted amount overflowed: {amount} * {rate}")]
    OutOfRange { amount: f64, rate: f64 },
}
