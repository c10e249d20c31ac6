//! Core conversion logic: parsing, rate caching and result formatting

pub mod cache;
pub mod config;
pub mod convert;
pub mod converter;
pub mod currency;
pub mod error;
pub mod locale;
pub mod log;
pub mod query;
pub mod resolver;

// Re-export main types for cleaner imports
pub use cache::RateCache;
pub use convert::{ActionSink, ConvertedAmount, ResultAction, ResultItem};
pub use converter::Converter;
pub use currency::{CurrencyPair, RateProvider};
pub use error::{ConvertError, LookupError};
pub use query::{ConversionRequest, parse};
pub use resolver::RateResolver;
