//! Regional currency lookup from the POSIX locale environment.

use std::env;

const FALLBACK_CURRENCY: &str = "USD";

/// Currency of the region named by the first non-empty of `LC_ALL`,
/// `LC_MONETARY` and `LANG`. Falls back to USD.
pub fn regional_currency() -> String {
    ["LC_ALL", "LC_MONETARY", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|locale| currency_for_locale(&locale))
        .unwrap_or(FALLBACK_CURRENCY)
        .to_string()
}

/// Maps a locale such as `de_AT.UTF-8@euro` to its currency code.
pub fn currency_for_locale(locale: &str) -> Option<&'static str> {
    let name = locale.split(['.', '@']).next()?;
    let region = name.split(['_', '-']).nth(1)?;
    currency_for_region(&region.to_uppercase())
}

fn currency_for_region(region: &str) -> Option<&'static str> {
    let code = match region {
        "AT" | "BE" | "CY" | "DE" | "EE" | "ES" | "FI" | "FR" | "GR" | "HR" | "IE" | "IT"
        | "LT" | "LU" | "LV" | "MT" | "NL" | "PT" | "SI" | "SK" => "EUR",
        "US" => "USD",
        "GB" => "GBP",
        "CH" | "LI" => "CHF",
        "JP" => "JPY",
        "CN" => "CNY",
        "IN" => "INR",
        "CA" => "CAD",
        "AU" => "AUD",
        "NZ" => "NZD",
        "BR" => "BRL",
        "MX" => "MXN",
        "AR" => "ARS",
        "CL" => "CLP",
        "CO" => "COP",
        "KR" => "KRW",
        "TW" => "TWD",
        "HK" => "HKD",
        "SG" => "SGD",
        "TH" => "THB",
        "ID" => "IDR",
        "MY" => "MYR",
        "PH" => "PHP",
        "VN" => "VND",
        "RU" => "RUB",
        "UA" => "UAH",
        "PL" => "PLN",
        "CZ" => "CZK",
        "HU" => "HUF",
        "RO" => "RON",
        "BG" => "BGN",
        "SE" => "SEK",
        "NO" => "NOK",
        "DK" => "DKK",
        "IS" => "ISK",
        "TR" => "TRY",
        "IL" => "ILS",
        "SA" => "SAR",
        "AE" => "AED",
        "EG" => "EGP",
        "ZA" => "ZAR",
        "NG" => "NGN",
        "KE" => "KES",
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_for_locale() {
        assert_eq!(currency_for_locale("de_AT.UTF-8@euro"), Some("EUR"));
        assert_eq!(currency_for_locale("en_IN"), Some("INR"));
        assert_eq!(currency_for_locale("ja_JP.eucJP"), Some("JPY"));
        assert_eq!(currency_for_locale("en-gb"), Some("GBP"));
    }

    #[test]
    fn test_currency_for_locale_without_known_region() {
        assert_eq!(currency_for_locale("C"), None);
        assert_eq!(currency_for_locale("POSIX"), None);
        assert_eq!(currency_for_locale("en_ZZ.UTF-8"), None);
        assert_eq!(currency_for_locale(""), None);
    }
}
