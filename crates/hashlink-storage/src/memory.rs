use async_trait::async_trait;
use dashmap::DashMap;
use hashlink_core::error::Result;
use hashlink_core::repository::{ReadRepository, Repository, StoredMapping, UrlMapping};
use hashlink_core::Identifier;
use jiff::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory implementation of the repository contract using DashMap.
///
/// Records are grouped per identifier in insertion order. Inserting the same
/// identifier twice keeps both records, mirroring a table with a plain index
/// on the hash column; lookups return the earliest one.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: DashMap<String, Vec<StoredMapping>>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of records stored under `identifier`.
    pub fn count(&self, identifier: &Identifier) -> usize {
        self.storage
            .get(identifier.as_str())
            .map_or(0, |records| records.len())
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_first(&self, identifier: &Identifier) -> Result<Option<StoredMapping>> {
        Ok(self
            .storage
            .get(identifier.as_str())
            .and_then(|records| records.first().cloned()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, mapping: UrlMapping) -> Result<StoredMapping> {
        let mut records = self
            .storage
            .entry(mapping.identifier.as_str().to_owned())
            .or_default();

        // Ids are taken under the entry guard so per-identifier order matches id order.
        let record = StoredMapping {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            identifier: mapping.identifier,
            url: mapping.url,
            created_at: Timestamp::now(),
        };
        records.push(record.clone());

        Ok(record)
    }
}
