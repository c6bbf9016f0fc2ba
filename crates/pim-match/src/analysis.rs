//! One analysis request end to end: extraction output in, table and ledger out.

use crate::catalog::Catalog;
use crate::config::ExtractionConfig;
use crate::matching::standard_matcher;
use crate::mentions::{
    ExtractionError, ExtractionPayload, ExtractionRequest, MalformedInputError, MentionExtractor,
};
use crate::report::MatchReport;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub extraction: ExtractionPayload,
    pub report: MatchReport,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("please enter text to analyze")]
    EmptyInput,
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    MalformedInput(#[from] MalformedInputError),
}

/// Parses raw extraction output and matches its products. Nothing is matched when
/// the output is structurally invalid.
pub fn analyze_extraction(raw: &str, catalog: &Catalog) -> Result<Analysis, AnalysisError> {
    let payload = ExtractionPayload::parse(raw)?;
    Ok(analyze_payload(payload, catalog))
}

pub fn analyze_payload(payload: ExtractionPayload, catalog: &Catalog) -> Analysis {
    let results = standard_matcher().match_batch(&payload.products, catalog);
    Analysis {
        report: MatchReport::from_results(&results),
        extraction: payload,
    }
}

/// Keeps the most recent successful analysis. A rejected request leaves it untouched.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    last: Option<Analysis>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Analysis> {
        self.last.as_ref()
    }

    pub fn apply_extraction(
        &mut self,
        raw: &str,
        catalog: &Catalog,
    ) -> Result<&Analysis, AnalysisError> {
        let payload = ExtractionPayload::parse(raw).map_err(|err| {
            warn!(error = %err, "extraction output rejected");
            err
        })?;
        let analysis = analyze_payload(payload, catalog);
        Ok(&*self.last.insert(analysis))
    }

    /// Runs the extraction collaborator over `text`, then matches what it returned.
    pub fn analyze_text<E>(
        &mut self,
        text: &str,
        extractor: &E,
        config: &ExtractionConfig,
        catalog: &Catalog,
    ) -> Result<&Analysis, AnalysisError>
    where
        E: MentionExtractor + ?Sized,
    {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let request = ExtractionRequest::new(text, config);
        let raw = extractor.extract(&request)?;
        self.apply_extraction(&raw, catalog)
    }
}
