//! Conversion of parsed requests into displayable result items.

use crate::core::currency::RateProvider;
use crate::core::error::ConvertError;
use crate::core::query::ConversionRequest;
use crate::core::resolver::RateResolver;
use anyhow::Result;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use tracing::{debug, warn};

pub const FAILURE_TITLE: &str = "Something went wrong.";
pub const FAILURE_SUBTITLE: &str = "Please try again.";

/// A converted amount rounded to 2 places with midpoints away from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvertedAmount {
    /// Trailing zeros dropped.
    Exact(Decimal),
    /// Beyond `Decimal`'s range.
    Float(f64),
}

impl fmt::Display for ConvertedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertedAmount::Exact(d) => write!(f, "{d}"),
            ConvertedAmount::Float(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub rate: f64,
    /// `amount * rate`, rounded.
    pub converted_amount: ConvertedAmount,
    pub from_currency: String,
    pub to_currency: String,
}

pub async fn convert<P: RateProvider>(
    request: &ConversionRequest,
    resolver: &RateResolver<P>,
) -> Result<Conversion, ConvertError> {
    let rate = resolver
        .get_rate(&request.from_currency, &request.to_currency)
        .await?;

    let converted_amount = round_amount(request.amount * rate).ok_or(ConvertError::OutOfRange {
        amount: request.amount,
        rate,
    })?;
    debug!(
        "Converted {} {} to {} {} at rate {}",
        request.amount, request.from_currency, converted_amount, request.to_currency, rate
    );

    Ok(Conversion {
        amount: request.amount,
        rate,
        converted_amount,
        from_currency: request.from_currency.clone(),
        to_currency: request.to_currency.clone(),
    })
}

/// `None` only when the product overflowed to a non-finite value.
fn round_amount(value: f64) -> Option<ConvertedAmount> {
    if !value.is_finite() {
        return None;
    }
    let amount = match Decimal::from_f64(value) {
        Some(d) => ConvertedAmount::Exact(
            d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                .normalize(),
        ),
        // Past Decimal's range an f64 has no fractional digits left.
        None => ConvertedAmount::Float(value.round()),
    };
    Some(amount)
}

/// What activating a result does. Carried out by an [`ActionSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultAction {
    CopyToClipboard(String),
}

/// Host side effects triggered by result activation.
pub trait ActionSink {
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub title: String,
    pub subtitle: String,
    pub action: Option<ResultAction>,
}

impl ResultItem {
    pub fn failure() -> Self {
        Self {
            title: FAILURE_TITLE.to_string(),
            subtitle: FAILURE_SUBTITLE.to_string(),
            action: None,
        }
    }

    /// Runs the item's action. Returns whether an action was carried out.
    pub fn activate(&self, sink: &dyn ActionSink) -> bool {
        match &self.action {
            Some(ResultAction::CopyToClipboard(text)) => match sink.copy_to_clipboard(text) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Failed to copy result");
                    false
                }
            },
            None => false,
        }
    }
}

impl From<&Conversion> for ResultItem {
    fn from(conversion: &Conversion) -> Self {
        let from = conversion.from_currency.to_uppercase();
        let to = conversion.to_currency.to_uppercase();
        Self {
            title: format!("{} {}", conversion.converted_amount, to),
            subtitle: format!("Currency conversion from {from} to {to}"),
            action: Some(ResultAction::CopyToClipboard(
                conversion.converted_amount.to_string(),
            )),
        }
    }
}
