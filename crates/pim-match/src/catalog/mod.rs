mod normalizer;
mod parser;
pub mod store;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

pub use normalizer::normalize_name;
pub use parser::CatalogRecord;
pub use store::CatalogStore;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Canonical part record. The normalized name is derived once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    name: String,
    identifier: String,
    #[serde(skip)]
    normalized_name: String,
}

impl CatalogEntry {
    pub fn new(name: &str, identifier: &str) -> Self {
        let name = name.trim().to_string();
        let normalized_name = normalize_name(&name);
        Self {
            name,
            identifier: normalizer::clean_identifier(identifier),
            normalized_name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

impl From<CatalogRecord> for CatalogEntry {
    fn from(record: CatalogRecord) -> Self {
        Self::new(&record.name, &record.identifier)
    }
}

/// Ordered, read-only reference catalog. Entry order breaks ties during matching.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CatalogRecord>,
    {
        Self {
            entries: records.into_iter().map(CatalogEntry::from).collect(),
            loaded_at: Utc::now(),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            entries: self.entries.len(),
            entries_without_identifier: self
                .entries
                .iter()
                .filter(|entry| entry.identifier.is_empty())
                .count(),
            loaded_at: self.loaded_at,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub entries: usize,
    pub entries_without_identifier: usize,
    pub loaded_at: DateTime<Utc>,
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Catalog, CatalogImportError> {
        let parsed = parser::parse_records(reader)?;
        if parsed.missing_identifier > 0 {
            warn!(
                rows = parsed.missing_identifier,
                "catalog rows without an identifier column kept with empty identifiers"
            );
        }

        let catalog = Catalog::from_records(parsed.records);
        info!(entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}
