//! Parsing of free-text conversion queries.

use crate::core::config::QuickConversionSettings;

/// A parsed `"<amount>"` or `"<amount> <from> to <to>"` query. Currency codes
/// are lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from_currency: String,
    pub to_currency: String,
}

/// Parses a raw query. `None` means the text is not a currency conversion and
/// the host should show nothing for it.
pub fn parse(raw_query: &str, settings: &QuickConversionSettings) -> Option<ConversionRequest> {
    let parts: Vec<&str> = raw_query.split_whitespace().collect();
    if parts.len() != 1 && parts.len() != 4 {
        return None;
    }

    let amount = parts[0].parse::<f64>().ok().filter(|a| a.is_finite())?;

    // parts[2] is the connective ("to"), not checked
    let (from, to) = match parts.as_slice() {
        [_, from, _, to] => (*from, *to),
        _ => settings.default_pair(),
    };

    Some(ConversionRequest {
        amount,
        from_currency: from.to_lowercase(),
        to_currency: to.to_lowercase(),
    })
}
