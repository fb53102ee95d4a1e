use crate::autocomplete::AutocompleteMatcher;
use crate::cli::ui;
use crate::core::selection::SelectionSettings;
use anyhow::Result;
use comfy_table::Cell;

pub async fn show_matches(
    matcher: &dyn AutocompleteMatcher,
    target_type: &str,
    settings: &SelectionSettings,
    query: &str,
) -> Result<String> {
    let matches = matcher.get_matches(target_type, settings, query).await?;
    if matches.is_empty() {
        return Ok(ui::styled("No matches.", ui::Tone::Hint));
    }

    let mut table = ui::listing_table(&["ID", "Value"]);
    for m in &matches {
        table.add_row(vec![Cell::new(&m.target_id), Cell::new(&m.value)]);
    }

    Ok(format!(
        "{} {}\n\n{table}",
        ui::styled("Matches for", ui::Tone::Heading),
        ui::styled(&format!("\"{query}\""), ui::Tone::Heading)
    ))
}
