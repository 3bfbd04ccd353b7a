//! Currency reference data

use crate::core::rates::RateSnapshot;
use anyhow::{Result, anyhow};
use std::fmt::Display;
use std::str::FromStr;

/// Display names for the currencies we know about. Codes returned by the
/// rate service that are missing here are shown by their code.
const KNOWN_CURRENCIES: &[(&str, &str)] = &[
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("BRL", "Brazilian Real"),
    ("JPY", "Japanese Yen"),
    ("GBP", "British Pound"),
    ("AUD", "Australian Dollar"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CNY", "Chinese Yuan"),
    ("INR", "Indian Rupee"),
    ("MXN", "Mexican Peso"),
    ("BTC", "Bitcoin"),
    ("ETH", "Ethereum"),
    ("ADA", "Cardano"),
    ("DOGE", "Dogecoin"),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency {
    pub code: String,
    pub name: String,
}

impl Currency {
    pub fn from_code(code: &str) -> Self {
        let name = KNOWN_CURRENCIES
            .iter()
            .find(|(known, _)| *known == code)
            .map_or(code, |(_, name)| *name);
        Currency {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        let valid = (3..=4).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic());
        if !valid {
            return Err(anyhow!("Invalid currency code: {}", s));
        }
        Ok(Currency::from_code(&code))
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}

/// A source and target currency selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    pub from: Currency,
    pub to: Currency,
}

impl CurrencyPair {
    pub fn new(from: Currency, to: Currency) -> Self {
        Self { from, to }
    }

    pub fn swapped(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

/// Lists the currencies available in a snapshot, sorted by code.
pub fn currencies_for(snapshot: &RateSnapshot) -> Vec<Currency> {
    let mut currencies: Vec<Currency> = snapshot.codes().map(Currency::from_code).collect();
    currencies.sort_by(|a, b| a.code.cmp(&b.code));
    currencies
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_known_and_unknown_names() {
        assert_eq!(Currency::from_code("BRL").name, "Brazilian Real");
        assert_eq!(Currency::from_code("DOGE").name, "Dogecoin");
        // Unknown codes fall back to the code itself
        assert_eq!(Currency::from_code("XAF").name, "XAF");
    }

    #[test]
    fn test_parse_currency_code() {
        let usd: Currency = " usd ".parse().unwrap();
        assert_eq!(usd.code, "USD");
        assert_eq!(usd.name, "US Dollar");

        assert!("DOGE".parse::<Currency>().is_ok());
        assert!("US".parse::<Currency>().is_err());
        assert!("DOLLAR".parse::<Currency>().is_err());
        assert!("U5D".parse::<Currency>().is_err());
    }

    #[test]
    fn test_swapped_pair() {
        let pair = CurrencyPair::new(Currency::from_code("USD"), Currency::from_code("BRL"));
        let swapped = pair.swapped();
        assert_eq!(swapped.from.code, "BRL");
        assert_eq!(swapped.to.code, "USD");
    }

    #[test]
    fn test_currencies_for_snapshot() {
        let rates = HashMap::from([
            ("USD".to_string(), 1.0),
            ("BRL".to_string(), 5.0),
            ("XAF".to_string(), 600.0),
        ]);
        let snapshot = RateSnapshot::new("USD", rates);
        let currencies = currencies_for(&snapshot);

        let codes: Vec<&str> = currencies.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["BRL", "USD", "XAF"]);
        assert_eq!(currencies[2].name, "XAF");
    }
}
