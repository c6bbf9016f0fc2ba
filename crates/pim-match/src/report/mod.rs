mod ledger;
mod table;
pub mod views;

use crate::matching::{MatchResult, MatchTally};
use serde::Serialize;

pub use table::{TABLE_HEADER, TABLE_SEPARATOR};
pub use views::{ExactMatchRecord, LedgerQuantity, TableRowView};

/// Both artifacts of one analysis plus the structured data they were rendered from.
///
/// `table` is for people; `ledger` is the `"<part id> <quantity>"` list of
/// exact matches meant for downstream automation.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub table: String,
    pub ledger: String,
    pub tally: MatchTally,
    pub rows: Vec<TableRowView>,
    pub exact_matches: Vec<ExactMatchRecord>,
}

impl MatchReport {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let rows = table::table_rows(results);
        let exact_matches = ledger::exact_match_records(results);

        Self {
            table: table::render_rows(&rows),
            ledger: ledger::render_records(&exact_matches),
            tally: MatchTally::from_results(results),
            rows,
            exact_matches,
        }
    }
}

pub fn render_table(results: &[MatchResult]) -> String {
    table::render_rows(&table::table_rows(results))
}

pub fn render_ledger(results: &[MatchResult]) -> String {
    ledger::render_records(&ledger::exact_match_records(results))
}

pub fn exact_match_records(results: &[MatchResult]) -> Vec<ExactMatchRecord> {
    ledger::exact_match_records(results)
}
