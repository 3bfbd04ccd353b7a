//! Pure conversion of an entered amount between two rates.
//!
//! Results are rounded to two decimal places using round-half-up (midpoint
//! away from zero) on exact decimal arithmetic, so `1.005` stays `1.005`
//! instead of drifting to `1.00499..` as a binary float would.

use crate::core::rates::RateSnapshot;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;
use std::str::FromStr;

/// Shown for empty, unparseable or non-positive amounts.
pub const ZERO_DISPLAY: &str = "0.00";
/// Shown when a rate is missing for either currency.
pub const ERROR_DISPLAY: &str = "Erro";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Amount was empty, invalid or not positive. Not an error.
    Empty,
    /// A rate was missing, or the amount or result lies outside the
    /// decimal range.
    Unavailable,
    /// Converted amount, already rounded to two decimals.
    Converted(Decimal),
}

impl Conversion {
    /// Whether this result may enter the history: computed and non-zero.
    pub fn is_recordable(&self) -> bool {
        matches!(self, Conversion::Converted(value) if !value.is_zero())
    }
}

impl Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conversion::Empty => write!(f, "{ZERO_DISPLAY}"),
            Conversion::Unavailable => write!(f, "{ERROR_DISPLAY}"),
            Conversion::Converted(value) => {
                let mut value = *value;
                value.rescale(2);
                write!(f, "{value}")
            }
        }
    }
}

/// Parses a user-entered amount. Returns `None` unless it is a finite number
/// greater than zero.
pub fn parse_amount(amount: &str) -> Option<Decimal> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
        .filter(|value| value.is_sign_positive() && !value.is_zero())
}

/// A well-formed positive number too large or too precise for [`Decimal`].
fn exceeds_decimal_range(amount: &str) -> bool {
    let trimmed = amount.trim();
    Decimal::from_str(trimmed).is_err()
        && Decimal::from_scientific(trimmed).is_err()
        && trimmed.parse::<f64>().is_ok_and(|v| v.is_finite() && v > 0.0)
}

fn usable_rate(rate: Option<f64>) -> Option<Decimal> {
    rate.filter(|r| r.is_finite() && *r > 0.0)
        .and_then(Decimal::from_f64)
        .filter(|r| !r.is_zero())
}

/// Converts `amount` expressed against `from_rate` into `to_rate` units.
///
/// A missing rate yields [`Conversion::Unavailable`] whatever the amount is.
pub fn convert(amount: &str, from_rate: Option<f64>, to_rate: Option<f64>) -> Conversion {
    let (Some(from_rate), Some(to_rate)) = (usable_rate(from_rate), usable_rate(to_rate)) else {
        return Conversion::Unavailable;
    };
    let Some(value) = parse_amount(amount) else {
        if exceeds_decimal_range(amount) {
            return Conversion::Unavailable;
        }
        return Conversion::Empty;
    };

    value
        .checked_div(from_rate)
        .and_then(|base_units| base_units.checked_mul(to_rate))
        .map(|value| {
            Conversion::Converted(
                value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            )
        })
        .unwrap_or(Conversion::Unavailable)
}

/// Converts between two currency codes using the rates of `snapshot`.
pub fn convert_with(snapshot: &RateSnapshot, amount: &str, from: &str, to: &str) -> Conversion {
    convert(amount, snapshot.rate(from), snapshot.rate(to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn display(amount: &str, from_rate: Option<f64>, to_rate: Option<f64>) -> String {
        convert(amount, from_rate, to_rate).to_string()
    }

    #[test]
    fn test_basic_conversion() {
        assert_eq!(display("10", Some(1.0), Some(5.0)), "50.00");
        assert_eq!(display("50", Some(5.0), Some(1.0)), "10.00");
        // BRL -> EUR through USD
        assert_eq!(display("100", Some(5.0), Some(0.9)), "18.00");
        assert_eq!(display("1", Some(1.0), Some(150.123)), "150.12");
    }

    #[test]
    fn test_matches_rounded_formula() {
        let cases = [
            ("2.5", 1.0, 3.2),
            ("1234.56", 0.92, 1.0),
            ("7", 3.0, 1.0),
            ("0.33", 1.0, 0.5),
            ("99999", 5.37, 0.0021),
        ];
        for (amount, from, to) in cases {
            let expected = Decimal::from_str(amount).unwrap() / Decimal::from_f64(from).unwrap()
                * Decimal::from_f64(to).unwrap();
            let expected = expected.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            assert_eq!(
                convert(amount, Some(from), Some(to)),
                Conversion::Converted(expected),
                "amount {amount} from {from} to {to}"
            );
        }
    }

    #[test]
    fn test_rounds_half_up_at_boundaries() {
        assert_eq!(display("1.005", Some(1.0), Some(1.0)), "1.01");
        assert_eq!(display("0.125", Some(1.0), Some(1.0)), "0.13");
        assert_eq!(display("0.135", Some(1.0), Some(1.0)), "0.14");
        assert_eq!(display("2.675", Some(1.0), Some(1.0)), "2.68");
        assert_eq!(display("0.124", Some(1.0), Some(1.0)), "0.12");
        // 10 / 3 * 3 does not lose a cent
        assert_eq!(display("10", Some(3.0), Some(3.0)), "10.00");
    }

    #[test]
    fn test_invalid_amounts_are_zero_display() {
        for amount in ["", "   ", "0", "0.00", "-5", "abc", "NaN", "inf", "10,5"] {
            let result = convert(amount, Some(1.0), Some(5.0));
            assert_eq!(result, Conversion::Empty, "amount {amount:?}");
            assert_eq!(result.to_string(), ZERO_DISPLAY);
            assert!(!result.is_recordable());
        }
    }

    #[test]
    fn test_accepts_padded_and_scientific_amounts() {
        assert_eq!(display(" 10 ", Some(1.0), Some(5.0)), "50.00");
        assert_eq!(display("1e2", Some(1.0), Some(5.0)), "500.00");
    }

    #[test]
    fn test_missing_rate_is_error_display() {
        for amount in ["10", "", "0", "abc"] {
            for (from, to) in [(None, Some(5.0)), (Some(1.0), None), (None, None)] {
                let result = convert(amount, from, to);
                assert_eq!(result, Conversion::Unavailable);
                assert_eq!(result.to_string(), ERROR_DISPLAY);
                assert!(!result.is_recordable());
            }
        }
        // Zero or negative rates count as missing
        assert_eq!(convert("10", Some(0.0), Some(5.0)), Conversion::Unavailable);
        assert_eq!(convert("10", Some(1.0), Some(-5.0)), Conversion::Unavailable);
    }

    #[test]
    fn test_overflow_is_unavailable() {
        let result = convert("79228162514264337593543950335", Some(0.0001), Some(1.0));
        assert_eq!(result, Conversion::Unavailable);
    }

    #[test]
    fn test_out_of_range_amounts_are_unavailable() {
        // Valid amounts, but beyond what a decimal can hold
        let result = convert("100000000000000000000000000000", Some(1.0), Some(5.0));
        assert_eq!(result, Conversion::Unavailable);
        assert!(!result.is_recordable());
        assert_eq!(convert("1e28", Some(1.0), Some(150.0)), Conversion::Unavailable);

        // Still the empty state for garbage
        assert_eq!(convert("1e", Some(1.0), Some(5.0)), Conversion::Empty);
    }

    #[test]
    fn test_computed_zero_is_not_recordable() {
        let result = convert("0.001", Some(1.0), Some(1.0));
        assert_eq!(result.to_string(), "0.00");
        assert!(matches!(result, Conversion::Converted(_)));
        assert!(!result.is_recordable());
    }

    #[test]
    fn test_uniform_two_decimals_for_every_code() {
        let rates = HashMap::from([("JPY".to_string(), 150.0)]);
        let snapshot = RateSnapshot::new("USD", rates);
        assert_eq!(convert_with(&snapshot, "1", "USD", "JPY").to_string(), "150.00");
    }

    #[test]
    fn test_convert_with_snapshot() {
        let rates = HashMap::from([("BRL".to_string(), 5.0)]);
        let snapshot = RateSnapshot::new("USD", rates);

        let result = convert_with(&snapshot, "10", "USD", "BRL");
        assert_eq!(result.to_string(), "50.00");
        assert!(result.is_recordable());

        assert_eq!(
            convert_with(&snapshot, "10", "USD", "EUR"),
            Conversion::Unavailable
        );
    }
}
