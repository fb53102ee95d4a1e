//! Terminal output for the admin commands: styled messages and listing tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Shown in the price column for variations without a resolvable price.
pub const NO_PRICE: &str = "no price";

pub enum Tone {
    /// Listing titles.
    Heading,
    /// "Saved the ..." confirmations.
    Saved,
    /// Rejected form fields.
    Problem,
    /// Notices and empty listings.
    Hint,
}

pub fn styled(text: &str, tone: Tone) -> String {
    let styled = match tone {
        Tone::Heading => style(text).bold().underlined(),
        Tone::Saved => style(text).green().bold(),
        Tone::Problem => style(text).red(),
        Tone::Hint => style(text).dim(),
    };
    styled.to_string()
}

/// Table for a currency, variation or match listing with the given column headers.
pub fn listing_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|header| {
            Cell::new(header)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        }));
    table
}

pub fn numeric_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

/// Formatted price, or a dimmed [`NO_PRICE`] marker.
pub fn price_cell(formatted: Option<String>) -> Cell {
    match formatted {
        Some(price) => numeric_cell(price),
        None => numeric_cell(NO_PRICE).fg(Color::DarkGrey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_table_headers() {
        let mut table = listing_table(&["Code", "Name"]);
        table.add_row(vec![Cell::new("EUR"), Cell::new("Euro")]);
        let rendered = table.to_string();
        assert!(rendered.contains("Code"));
        assert!(rendered.contains("Euro"));
    }

    #[test]
    fn test_price_cell() {
        assert_eq!(price_cell(Some("$1.00".to_string())).content(), "$1.00");
        assert_eq!(price_cell(None).content(), NO_PRICE);
    }
}
