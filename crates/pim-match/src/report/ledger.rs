use super::views::{ExactMatchRecord, LedgerQuantity};
use crate::matching::MatchResult;

pub(crate) fn exact_match_records(results: &[MatchResult]) -> Vec<ExactMatchRecord> {
    results
        .iter()
        .filter_map(|result| {
            result.exact_entry().map(|entry| ExactMatchRecord {
                identifier: entry.identifier().to_string(),
                quantity: LedgerQuantity::parse(&result.mention().quantity),
            })
        })
        .collect()
}

pub(crate) fn render_records(records: &[ExactMatchRecord]) -> String {
    records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
