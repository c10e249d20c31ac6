//! Currency pairs and the remote rate capability

use crate::core::error::LookupError;
use async_trait::async_trait;
use std::fmt;

/// Ordered (source, destination) pair of currency codes, lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    from: String,
    to: String,
}

impl CurrencyPair {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_lowercase(),
            to: to.to_lowercase(),
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Source of current conversion rates, `amount_in_to = amount_in_from * rate`.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch(&self, pair: &CurrencyPair) -> Result<f64, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_case_insensitive() {
        assert_eq!(CurrencyPair::new("USD", "jpy"), CurrencyPair::new("usd", "JPY"));
        assert_eq!(CurrencyPair::new("USD", "JPY").to_string(), "usd-jpy");
    }

    #[test]
    fn test_pair_is_ordered() {
        assert_ne!(CurrencyPair::new("usd", "jpy"), CurrencyPair::new("jpy", "usd"));
    }
}
