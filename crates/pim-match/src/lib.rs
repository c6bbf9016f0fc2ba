//! Matches product mentions extracted from free text against a PIM catalog.
//!
//! The pipeline is catalog normalization ([`catalog`]), tiered matching
//! ([`matching`]), and report rendering ([`report`]). [`analysis`] ties them to the
//! JSON produced by the extraction collaborator described in [`mentions`].

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matching;
pub mod mentions;
pub mod report;
pub mod telemetry;

pub use analysis::{analyze_extraction, analyze_payload, Analysis, AnalysisError, AnalysisSession};
pub use catalog::{Catalog, CatalogEntry, CatalogImporter, CatalogRecord, CatalogStore};
pub use matching::{match_batch, match_mention, MatchResult, MatchType, TieredMatcher};
pub use mentions::{ExtractionPayload, MalformedInputError, ProductMention};
pub use report::{render_ledger, render_table, MatchReport};
