mod strategy;

use crate::catalog::{Catalog, CatalogEntry};
use crate::mentions::ProductMention;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::{debug, info};

pub use strategy::{ExactIdentifier, ExactName, MatchStrategy, MentionKey, PartialContainment};

static STANDARD_MATCHER: OnceLock<TieredMatcher> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Possible,
    NoMatch,
}

impl MatchType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exact => "Exact",
            Self::Possible => "Possible",
            Self::NoMatch => "No Match",
        }
    }
}

/// Outcome for one mention.
///
/// Only the matcher builds these, so `NoMatch` always carries an empty list,
/// `Exact` exactly one entry, and `Possible` at least one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    mention: ProductMention,
    match_type: MatchType,
    matches: Vec<CatalogEntry>,
}

impl MatchResult {
    fn no_match(mention: ProductMention) -> Self {
        Self {
            mention,
            match_type: MatchType::NoMatch,
            matches: Vec::new(),
        }
    }

    pub fn mention(&self) -> &ProductMention {
        &self.mention
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn matches(&self) -> &[CatalogEntry] {
        &self.matches
    }

    /// The confirmed catalog entry, present only for exact matches.
    pub fn exact_entry(&self) -> Option<&CatalogEntry> {
        match self.match_type {
            MatchType::Exact => self.matches.first(),
            MatchType::Possible | MatchType::NoMatch => None,
        }
    }
}

/// Ordered list of tiers; the first tier that yields candidates decides the result.
#[derive(Debug)]
pub struct TieredMatcher {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl TieredMatcher {
    pub fn standard() -> Self {
        Self {
            strategies: vec![
                Box::new(ExactIdentifier),
                Box::new(ExactName),
                Box::new(PartialContainment),
            ],
        }
    }

    pub fn tiers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.strategies.iter().map(|strategy| strategy.name())
    }

    pub fn match_mention(&self, mention: &ProductMention, catalog: &Catalog) -> MatchResult {
        let key = MentionKey::new(mention);
        if key.is_blank() {
            return MatchResult::no_match(mention.clone());
        }

        for strategy in &self.strategies {
            let mut candidates = strategy.candidates(&key, catalog);
            if candidates.is_empty() {
                continue;
            }

            let match_type = strategy.match_type();
            if match_type == MatchType::Exact {
                candidates.truncate(1);
            }
            debug!(
                tier = strategy.name(),
                matches = candidates.len(),
                part_name = %mention.name,
                part_id = %mention.identifier,
                "mention resolved"
            );

            return MatchResult {
                mention: mention.clone(),
                match_type,
                matches: candidates.into_iter().cloned().collect(),
            };
        }

        debug!(part_name = %mention.name, part_id = %mention.identifier, "mention unmatched");
        MatchResult::no_match(mention.clone())
    }

    /// Matches each mention independently; output order follows input order.
    pub fn match_batch(&self, mentions: &[ProductMention], catalog: &Catalog) -> Vec<MatchResult> {
        let results: Vec<MatchResult> = mentions
            .iter()
            .map(|mention| self.match_mention(mention, catalog))
            .collect();

        let tally = MatchTally::from_results(&results);
        info!(
            mentions = results.len(),
            catalog_entries = catalog.len(),
            exact = tally.exact,
            possible = tally.possible,
            no_match = tally.no_match,
            "mention batch matched"
        );

        results
    }
}

impl Default for TieredMatcher {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn match_mention(mention: &ProductMention, catalog: &Catalog) -> MatchResult {
    standard_matcher().match_mention(mention, catalog)
}

pub fn match_batch(mentions: &[ProductMention], catalog: &Catalog) -> Vec<MatchResult> {
    standard_matcher().match_batch(mentions, catalog)
}

/// Shared instance of [`TieredMatcher::standard`].
pub(crate) fn standard_matcher() -> &'static TieredMatcher {
    STANDARD_MATCHER.get_or_init(TieredMatcher::standard)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchTally {
    pub exact: usize,
    pub possible: usize,
    pub no_match: usize,
}

impl MatchTally {
    pub fn from_results(results: &[MatchResult]) -> Self {
        results
            .iter()
            .fold(Self::default(), |mut tally, result| {
                match result.match_type {
                    MatchType::Exact => tally.exact += 1,
                    MatchType::Possible => tally.possible += 1,
                    MatchType::NoMatch => tally.no_match += 1,
                }
                tally
            })
    }
}
