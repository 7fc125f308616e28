use crate::core::{ConversionForm, ConversionResult, UiStatus};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const TITLE: &str = "evgen4web Currency Convertor";
pub const SUBTITLE: &str = "Check live foreign currency exchange rates";
pub const MID_MARKET_NOTE: &str = "ⓘ We use the mid-market rate for our Converter. This is for informational purposes only. You won't receive this rate when sending money";
pub const PROMO_NOTE: &str = "Unlock a promotional rate on your first 3 transfers";

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Result,
    Error,
    Subtle,
    Highlight,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Result => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
        StyleType::Highlight => style(text).cyan().bold(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// `100 USD = 92.3457 EUR`
pub fn result_line(result: &ConversionResult) -> String {
    format!(
        "{} {} = {} {}",
        result.amount, result.from, result.converted, result.to
    )
}

/// Renders a result as a single-row table for one-shot output.
pub fn result_table(result: &ConversionResult) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Amount"),
        header_cell("From"),
        header_cell("Converted"),
        header_cell("To"),
        header_cell("Rate date"),
    ]);
    table.add_row(vec![
        Cell::new(result.amount).set_alignment(CellAlignment::Right),
        Cell::new(&result.from),
        Cell::new(result.converted)
            .add_attribute(Attribute::Bold)
            .fg(Color::Green)
            .set_alignment(CellAlignment::Right),
        Cell::new(&result.to),
        result
            .rate_date
            .as_deref()
            .map_or(Cell::new("N/A").fg(Color::DarkGrey), Cell::new),
    ]);
    table
}

/// Renders the form fields, blanks shown as placeholders.
pub fn render_form(form: &ConversionForm) -> String {
    let or_placeholder = |value: &str, placeholder: &str| {
        if value.is_empty() {
            style_text(placeholder, StyleType::Subtle)
        } else {
            value.to_string()
        }
    };
    format!(
        "Amount: {}   From: {} ⇄ To: {}",
        or_placeholder(&form.amount, "100"),
        or_placeholder(&form.from, "USD"),
        or_placeholder(&form.to, "EUR"),
    )
}

/// Renders the result area for the current status. Idle renders nothing.
pub fn render_status(status: &UiStatus) -> Option<String> {
    match status {
        UiStatus::Idle => None,
        UiStatus::Loading => Some("Loading…".to_string()),
        UiStatus::Success(result) => {
            let mut out = style_text(&result_line(result), StyleType::Result);
            if let Some(date) = &result.rate_date {
                out.push_str(&format!(
                    "\n{}",
                    style_text(&format!("Rate date: {date}"), StyleType::Subtle)
                ));
            }
            Some(out)
        }
        UiStatus::Error(message) => Some(style_text(message, StyleType::Error)),
    }
}

/// Creates a spinner shown while a conversion is in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConversionResult {
        ConversionResult {
            amount: 100.0,
            from: "USD".to_string(),
            to: "EUR".to_string(),
            converted: 92.3457,
            rate_date: Some("2024-01-01".to_string()),
        }
    }

    #[test]
    fn test_result_line_drops_trailing_zeroes() {
        assert_eq!(result_line(&sample()), "100 USD = 92.3457 EUR");
    }

    #[test]
    fn test_render_status() {
        assert!(render_status(&UiStatus::Idle).is_none());
        assert_eq!(
            render_status(&UiStatus::Loading).as_deref(),
            Some("Loading…")
        );

        let success = render_status(&UiStatus::Success(sample())).unwrap();
        assert!(success.contains("100 USD = 92.3457 EUR"));
        assert!(success.contains("Rate date: 2024-01-01"));

        let error = render_status(&UiStatus::Error("boom".to_string())).unwrap();
        assert!(error.contains("boom"));
    }

    #[test]
    fn test_result_table_contains_fields() {
        let rendered = result_table(&sample()).to_string();
        assert!(rendered.contains("92.3457"));
        assert!(rendered.contains("2024-01-01"));
        assert!(rendered.contains("USD"));
    }
}
