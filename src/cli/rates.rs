use super::ui;
use crate::core::currency::currencies_for;
use crate::core::rates::RateSnapshot;
use crate::core::session::Session;
use anyhow::{Result, anyhow};
use comfy_table::Cell;

impl RateSnapshot {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Code"),
            ui::header_cell("Currency"),
            ui::header_cell(&format!("Rate (1 {})", self.base())),
        ]);

        for currency in currencies_for(self) {
            let rate = self
                .rate(&currency.code)
                .map_or("N/A".to_string(), |r| format!("{r:.4}"));
            table.add_row(vec![
                Cell::new(&currency.code),
                Cell::new(&currency.name),
                ui::number_cell(&rate),
            ]);
        }

        format!(
            "{}\n{}\n\n{}",
            ui::style_text("Exchange Rates", ui::StyleType::Title),
            ui::style_text(
                &format!("Rates updated at: {}", self.fetched_at_display()),
                ui::StyleType::Subtle
            ),
            table
        )
    }
}

pub fn run(session: &Session) -> Result<()> {
    let snapshot = session
        .rates()
        .ok_or_else(|| anyhow!("No exchange rates loaded"))?;
    println!("{}", snapshot.display_as_table());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_rates_table() {
        let rates = HashMap::from([("BRL".to_string(), 5.4213), ("XAF".to_string(), 600.0)]);
        let snapshot = RateSnapshot::new("USD", rates);
        let output = snapshot.display_as_table();

        assert!(output.contains("Exchange Rates"));
        assert!(output.contains("Rate (1 USD)"));
        assert!(output.contains("Brazilian Real"));
        assert!(output.contains("5.4213"));
        assert!(output.contains("600.0000"));
        assert!(output.contains("1.0000"));
        assert!(output.contains(&snapshot.fetched_at_display()));
    }
}
