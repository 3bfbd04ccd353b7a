use super::ui;
use crate::core::config::AppConfig;
use crate::core::conversion::Conversion;
use crate::core::currency::{Currency, CurrencyPair};
use crate::core::history::ConversionRecord;
use crate::core::session::Session;
use anyhow::{Context, Result};
use tracing::debug;

/// Resolves the currency pair from the command line, falling back to the
/// configured defaults.
pub fn resolve_pair(
    from: Option<&str>,
    to: Option<&str>,
    swap: bool,
    config: &AppConfig,
) -> Result<CurrencyPair> {
    let from: Currency = from
        .unwrap_or(config.default_from.as_str())
        .parse()
        .context("Invalid source currency")?;
    let to: Currency = to
        .unwrap_or(config.default_to.as_str())
        .parse()
        .context("Invalid target currency")?;

    let pair = CurrencyPair::new(from, to);
    Ok(if swap { pair.swapped() } else { pair })
}

/// Formats a conversion the way it is shown to the user.
pub fn format_conversion(amount: &str, pair: &CurrencyPair, conversion: &Conversion) -> String {
    let amount = if amount.trim().is_empty() { "0" } else { amount.trim() };
    let result = conversion.to_string();
    let styled_result = match conversion {
        Conversion::Unavailable => ui::style_text(&result, ui::StyleType::Error),
        _ => ui::style_text(&result, ui::StyleType::Result),
    };

    let mut output = format!(
        "{} {} = {} {}",
        amount, pair.from.code, styled_result, pair.to.code
    );
    output.push_str(&ui::style_text(
        &format!("\n{} → {}", pair.from.name, pair.to.name),
        ui::StyleType::Subtle,
    ));

    if matches!(conversion, Conversion::Unavailable) {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!(
                    "No rate available for {} or {}",
                    pair.from.code, pair.to.code
                ),
                ui::StyleType::Error
            )
        ));
    }
    output
}

/// Converts `amount`, prints it, and records it when the result is a
/// computed non-zero value.
pub async fn run(
    session: &mut Session,
    amount: &str,
    pair: &CurrencyPair,
    date_format: &str,
) -> Result<Conversion> {
    let conversion = session.convert(amount, &pair.from.code, &pair.to.code);
    debug!(%conversion, "Converted {} {} to {}", amount, pair.from.code, pair.to.code);

    println!("{}", format_conversion(amount, pair, &conversion));
    if let Some(snapshot) = session.rates() {
        println!(
            "{}",
            ui::style_text(
                &format!("Rates updated at: {}", snapshot.fetched_at_display()),
                ui::StyleType::Subtle
            )
        );
    }

    if let Some(record) = ConversionRecord::new(amount, pair, &conversion, date_format) {
        session.record_conversion(record).await;
    }
    Ok(conversion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversion::convert;

    #[test]
    fn test_resolve_pair_defaults_and_overrides() {
        let config = AppConfig::default();

        let pair = resolve_pair(None, None, false, &config).unwrap();
        assert_eq!(pair.from.code, "USD");
        assert_eq!(pair.to.code, "BRL");

        let pair = resolve_pair(Some("eur"), Some("jpy"), false, &config).unwrap();
        assert_eq!(pair.from.code, "EUR");
        assert_eq!(pair.to.code, "JPY");

        let pair = resolve_pair(None, None, true, &config).unwrap();
        assert_eq!(pair.from.code, "BRL");
        assert_eq!(pair.to.code, "USD");
    }

    #[test]
    fn test_resolve_pair_rejects_bad_codes() {
        let config = AppConfig::default();
        let err = resolve_pair(Some("dollars"), None, false, &config).unwrap_err();
        assert!(err.to_string().contains("Invalid source currency"));

        let err = resolve_pair(None, Some("1"), false, &config).unwrap_err();
        assert!(err.to_string().contains("Invalid target currency"));
    }

    #[test]
    fn test_format_conversion() {
        let pair = resolve_pair(None, None, false, &AppConfig::default()).unwrap();

        let output = format_conversion("10", &pair, &convert("10", Some(1.0), Some(5.0)));
        assert!(output.contains("10 USD = "));
        assert!(output.contains("50.00"));
        assert!(output.contains("US Dollar → Brazilian Real"));

        let output = format_conversion("", &pair, &convert("", Some(1.0), Some(5.0)));
        assert!(output.contains("0 USD = "));
        assert!(output.contains("0.00"));

        let output = format_conversion("10", &pair, &convert("10", Some(1.0), None));
        assert!(output.contains("Erro"));
        assert!(output.contains("No rate available for USD or BRL"));
    }
}
