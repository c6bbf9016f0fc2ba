use super::normalizer::clean_identifier;
use std::io::Read;

/// One catalog row after field splitting, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub name: String,
    pub identifier: String,
}

impl CatalogRecord {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ParsedCatalog {
    pub(crate) records: Vec<CatalogRecord>,
    pub(crate) missing_identifier: usize,
}

/// Splits every line on its commas. Quotes are ordinary characters, so a stray `"`
/// only affects the row it appears in.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<ParsedCatalog, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);
    let mut parsed = ParsedCatalog::default();

    for record in csv_reader.records() {
        let row = record?;
        let name = row.get(0).unwrap_or_default().trim().to_string();
        let identifier = match row.get(1) {
            Some(raw) => clean_identifier(raw),
            None => {
                parsed.missing_identifier += 1;
                String::new()
            }
        };

        parsed.records.push(CatalogRecord { name, identifier });
    }

    Ok(parsed)
}
