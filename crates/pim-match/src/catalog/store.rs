use super::Catalog;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Shares the active catalog as immutable snapshots.
///
/// A match pass clones the current `Arc` once and works against it until the
/// batch is done. Reloads swap the whole snapshot, so a pass never observes a
/// half-replaced catalog.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs `catalog` as the active snapshot and returns the one it replaced.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        info!(
            previous_entries = previous.len(),
            entries = guard.len(),
            "catalog snapshot replaced"
        );
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRecord;

    fn catalog_of(rows: &[(&str, &str)]) -> Catalog {
        Catalog::from_records(
            rows.iter()
                .map(|(name, id)| CatalogRecord::new(*name, *id)),
        )
    }

    #[test]
    fn default_store_is_empty() {
        let store = CatalogStore::default();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn held_snapshot_survives_replacement() {
        let store = CatalogStore::new(catalog_of(&[("Widget A", "100")]));
        let held = store.snapshot();

        let previous = store.replace(catalog_of(&[("Widget B", "200"), ("Widget C", "300")]));

        assert_eq!(held.len(), 1);
        assert_eq!(held.entries()[0].identifier(), "100");
        assert!(Arc::ptr_eq(&held, &previous));
        assert_eq!(store.snapshot().len(), 2);
    }
}
