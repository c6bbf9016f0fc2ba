use super::MatchType;
use crate::catalog::{normalize_name, Catalog, CatalogEntry};
use crate::mentions::ProductMention;

/// Mention fields prepared once and shared by every tier.
#[derive(Debug, Clone)]
pub struct MentionKey<'m> {
    raw_identifier: &'m str,
    trimmed_identifier: &'m str,
    normalized_name: String,
}

impl<'m> MentionKey<'m> {
    pub fn new(mention: &'m ProductMention) -> Self {
        Self {
            raw_identifier: &mention.identifier,
            trimmed_identifier: mention.identifier.trim(),
            normalized_name: normalize_name(&mention.name),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.raw_identifier.is_empty() && self.normalized_name.is_empty()
    }
}

/// One tier of the matcher. An empty result hands the mention to the next tier.
pub trait MatchStrategy: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Confidence assigned when this tier produces candidates.
    fn match_type(&self) -> MatchType;

    fn candidates<'c>(&self, key: &MentionKey<'_>, catalog: &'c Catalog) -> Vec<&'c CatalogEntry>;
}

/// Trimmed identifier equality; first catalog entry wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactIdentifier;

impl MatchStrategy for ExactIdentifier {
    fn name(&self) -> &'static str {
        "exact_identifier"
    }

    fn match_type(&self) -> MatchType {
        MatchType::Exact
    }

    fn candidates<'c>(&self, key: &MentionKey<'_>, catalog: &'c Catalog) -> Vec<&'c CatalogEntry> {
        if key.trimmed_identifier.is_empty() {
            return Vec::new();
        }

        catalog
            .entries()
            .iter()
            .find(|entry| entry.identifier() == key.trimmed_identifier)
            .into_iter()
            .collect()
    }
}

/// Normalized name equality; first catalog entry wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactName;

impl MatchStrategy for ExactName {
    fn name(&self) -> &'static str {
        "exact_name"
    }

    fn match_type(&self) -> MatchType {
        MatchType::Exact
    }

    fn candidates<'c>(&self, key: &MentionKey<'_>, catalog: &'c Catalog) -> Vec<&'c CatalogEntry> {
        if key.normalized_name.is_empty() {
            return Vec::new();
        }

        catalog
            .entries()
            .iter()
            .find(|entry| entry.normalized_name() == key.normalized_name)
            .into_iter()
            .collect()
    }
}

/// Substring containment in either direction on normalized names, or the entry
/// identifier containing the raw mention identifier. Collects every hit.
///
/// Identifiers are compared without trimming or case folding while names are
/// normalized. That asymmetry is long-standing behavior and is kept as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialContainment;

impl MatchStrategy for PartialContainment {
    fn name(&self) -> &'static str {
        "partial_containment"
    }

    fn match_type(&self) -> MatchType {
        MatchType::Possible
    }

    fn candidates<'c>(&self, key: &MentionKey<'_>, catalog: &'c Catalog) -> Vec<&'c CatalogEntry> {
        let name = key.normalized_name.as_str();
        let identifier = key.raw_identifier;

        catalog
            .entries()
            .iter()
            .filter(|entry| {
                let entry_name = entry.normalized_name();
                let by_name = !name.is_empty()
                    && !entry_name.is_empty()
                    && (entry_name.contains(name) || name.contains(entry_name));
                let by_identifier = !identifier.is_empty()
                    && !entry.identifier().is_empty()
                    && entry.identifier().contains(identifier);
                by_name || by_identifier
            })
            .collect()
    }
}
