//! Fact engine: the query-facing facade over an immutable registry.

use super::facts::{self, FactSheet};
use super::intent::{candidate_tokens, Intents};
use super::registry::Registry;
use super::resolver::resolve_entities;
use super::settings::EngineSettings;
use super::vocabulary::known_entities;
use crate::ports::dataset_port::DatasetPort;
use std::collections::BTreeSet;

/// Computes grounded facts for free-text questions.
///
/// Built once; every query method takes `&self`, so one engine can serve
/// concurrent callers without locking.
#[derive(Debug, Clone)]
pub struct FactEngine {
    registry: Registry,
    known: BTreeSet<String>,
    settings: EngineSettings,
}

impl FactEngine {
    pub fn new(registry: Registry, settings: EngineSettings) -> Self {
        let known = known_entities(&registry);
        tracing::debug!(entities = known.len(), "built entity vocabulary");
        FactEngine {
            registry,
            known,
            settings,
        }
    }

    /// Load every dataset from `port`. A source listing failure leaves the
    /// engine with an empty registry; check [`FactEngine::is_valid`].
    pub fn from_port(port: &dyn DatasetPort, settings: EngineSettings) -> Self {
        let registry = Registry::load(port).unwrap_or_else(|e| {
            tracing::error!(error = %e, "no datasets loaded");
            Registry::default()
        });
        if !registry.is_valid() {
            tracing::warn!("datasets are missing, invalid or empty");
        }
        Self::new(registry, settings)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn known_entities(&self) -> &BTreeSet<String> {
        &self.known
    }

    pub fn is_valid(&self) -> bool {
        self.registry.is_valid()
    }

    /// Entities mentioned in `query`, resolved against the known vocabulary.
    pub fn resolve(&self, query: &str) -> BTreeSet<String> {
        resolve_entities(&candidate_tokens(query), &self.known)
    }

    /// Ordered, deduplicated facts for `query`.
    pub fn facts_for(&self, query: &str) -> FactSheet {
        let intents = Intents::detect(query);
        let entities = self.resolve(query);
        tracing::debug!(?intents, entities = ?entities, "computing facts");

        let mut sheet = FactSheet::new();
        if intents.performance {
            facts::performance_facts(&self.registry, &mut sheet);
        }
        if intents.record_count {
            facts::record_count_facts(&self.registry, &mut sheet);
        }
        facts::entity_facts(
            &self.registry,
            &entities,
            &self.settings.always_report,
            &mut sheet,
        );
        sheet
    }

    /// Schema sample with the configured number of rows per table.
    pub fn schema_sample(&self) -> String {
        self.registry.schema_sample(self.settings.schema_rows)
    }
}
