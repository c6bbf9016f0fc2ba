use super::views::TableRowView;
use crate::matching::{MatchResult, MatchType};

pub const TABLE_HEADER: &str = "Match Type    Part Name   Part ID   Quantity";
pub const TABLE_SEPARATOR: &str = "----------------------------------------------------------";

const MISSING: &str = "-";

pub(crate) fn table_rows(results: &[MatchResult]) -> Vec<TableRowView> {
    results
        .iter()
        .flat_map(|result| {
            let quantity = or_missing(&result.mention().quantity);
            let match_type = result.match_type();

            if result.matches().is_empty() {
                let mention = result.mention();
                return vec![row(match_type, &mention.name, &mention.identifier, quantity)];
            }

            result
                .matches()
                .iter()
                .map(|entry| row(match_type, entry.name(), entry.identifier(), quantity))
                .collect()
        })
        .collect()
}

pub(crate) fn render_rows(rows: &[TableRowView]) -> String {
    let body = rows
        .iter()
        .map(format_row)
        .collect::<Vec<_>>()
        .join("\n");
    format!("{TABLE_HEADER}\n{TABLE_SEPARATOR}\n{body}")
}

fn row(match_type: MatchType, name: &str, identifier: &str, quantity: &str) -> TableRowView {
    TableRowView {
        match_type,
        match_label: match_type.label(),
        part_name: or_missing(name).to_string(),
        part_id: or_missing(identifier).to_string(),
        quantity: quantity.to_string(),
    }
}

fn format_row(row: &TableRowView) -> String {
    format!(
        "{:<12} {:<14} {:<12} {}",
        row.match_label, row.part_name, row.part_id, row.quantity
    )
}

fn or_missing(value: &str) -> &str {
    if value.is_empty() {
        MISSING
    } else {
        value
    }
}
