use super::ui;
use crate::core::history::History;
use crate::core::session::Session;
use anyhow::Result;
use comfy_table::Cell;

impl History {
    pub fn display_as_table(&self) -> String {
        let title = ui::style_text("Conversion History", ui::StyleType::Title);
        if self.is_empty() {
            return format!(
                "{}\n\n{}",
                title,
                ui::style_text("No conversions yet", ui::StyleType::Subtle)
            );
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Amount"),
            ui::header_cell("From"),
            ui::header_cell("Result"),
            ui::header_cell("To"),
            ui::header_cell("Date"),
        ]);
        for record in self.iter() {
            table.add_row(vec![
                ui::number_cell(&record.amount),
                Cell::new(&record.from),
                ui::number_cell(&record.result),
                Cell::new(&record.to),
                Cell::new(&record.date),
            ]);
        }

        format!("{title}\n\n{table}")
    }
}

pub fn run(session: &Session) -> Result<()> {
    println!("{}", session.history().display_as_table());
    Ok(())
}

pub async fn clear(session: &mut Session) -> Result<()> {
    let removed = session.history().len();
    session.clear_history().await;
    println!(
        "{}",
        ui::style_text(
            &format!("Cleared {removed} conversion(s) from history"),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}
