use async_trait::async_trait;
use dashmap::DashMap;
use hfid_core::{Generator, GeneratorStore, Result};
use std::collections::HashSet;
use tracing::trace;

/// In-memory implementation of [`GeneratorStore`] using DashMap.
///
/// Issued numbers are kept in an exact set, so the reported count is exact and
/// [`add`](GeneratorStore::add) never reports a new number as seen. Each
/// operation holds the shard lock of its key, which makes create-or-fetch and
/// test-and-set atomic per generator name.
#[derive(Debug, Default)]
pub struct InMemoryGeneratorStore {
    generators: DashMap<String, Generator>,
    issued: DashMap<String, HashSet<i64>>,
}

impl InMemoryGeneratorStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` generators.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generators: DashMap::with_capacity(capacity),
            issued: DashMap::with_capacity(capacity),
        }
    }
}

#[async_trait]
impl GeneratorStore for InMemoryGeneratorStore {
    async fn insert_or_get(&self, generator: &Generator) -> Result<(Generator, u64)> {
        let stored = self
            .generators
            .entry(generator.name().to_string())
            .or_insert_with(|| generator.clone())
            .value()
            .clone();

        let issued = self
            .issued
            .get(generator.name())
            .map_or(0, |numbers| numbers.len() as u64);

        trace!(generator = stored.name(), issued, "fetched generator from memory");
        Ok((stored, issued))
    }

    async fn upsert(&self, generator: &Generator) -> Result<()> {
        self.generators
            .insert(generator.name().to_string(), generator.clone());
        Ok(())
    }

    async fn add(&self, number: i64, name: &str) -> Result<bool> {
        Ok(self
            .issued
            .entry(name.to_string())
            .or_default()
            .insert(number))
    }
}
