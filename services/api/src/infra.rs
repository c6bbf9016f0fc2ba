use metrics_exporter_prometheus::PrometheusHandle;
use pim_match::catalog::{CatalogImporter, CatalogStore};
use pim_match::error::AppError;
use pim_match::mentions::{ExtractionError, ExtractionRequest, MentionExtractor};
use pim_match::Catalog;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Extractor that answers every request with a prepared model response.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedExtractor {
    response: String,
}

impl ScriptedExtractor {
    pub(crate) fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl MentionExtractor for ScriptedExtractor {
    fn extract(&self, request: &ExtractionRequest) -> Result<String, ExtractionError> {
        if request.user_text().trim().is_empty() {
            return Err(ExtractionError::EmptyResponse);
        }
        Ok(self.response.clone())
    }
}

pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Catalog, AppError> {
    match path {
        Some(path) => CatalogImporter::from_path(path).map_err(AppError::from),
        None => {
            warn!("no catalog configured; every mention will resolve to No Match until one is uploaded");
            Ok(Catalog::empty())
        }
    }
}

pub(crate) fn catalog_store(path: Option<&Path>) -> Result<Arc<CatalogStore>, AppError> {
    load_catalog(path).map(|catalog| Arc::new(CatalogStore::new(catalog)))
}
