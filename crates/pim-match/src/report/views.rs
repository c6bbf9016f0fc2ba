use crate::matching::MatchType;
use serde::Serialize;
use std::fmt;

/// One rendered table line in structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRowView {
    pub match_type: MatchType,
    pub match_label: &'static str,
    pub part_name: String,
    pub part_id: String,
    pub quantity: String,
}

/// Quantity as it appears in the ledger: a whole count when the text is purely numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LedgerQuantity {
    Count(i64),
    Text(String),
}

impl LedgerQuantity {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(count) => Self::Count(count),
            Err(_) => Self::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for LedgerQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Confirmed match handed to downstream automation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExactMatchRecord {
    pub identifier: String,
    pub quantity: LedgerQuantity,
}

impl fmt::Display for ExactMatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.identifier, self.quantity)
    }
}
