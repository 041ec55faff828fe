use crate::error::Result;
use crate::identifier::Identifier;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A mapping to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    pub identifier: Identifier,
    /// The submitted URL, byte for byte.
    pub url: String,
}

impl UrlMapping {
    /// Builds the mapping for `url`, deriving its identifier.
    pub fn for_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            identifier: Identifier::digest(&url),
            url,
        }
    }
}

/// A mapping as held by the store, including the fields the store generates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMapping {
    /// Store-assigned row id. Lower ids were inserted earlier.
    pub id: u64,
    pub identifier: Identifier,
    pub url: String,
    pub created_at: Timestamp,
}

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Returns the earliest record stored under `identifier`, if any.
    ///
    /// Stores may hold more than one record per identifier; only the first
    /// one is ever returned.
    async fn find_first(&self, identifier: &Identifier) -> Result<Option<StoredMapping>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new record and returns it as stored.
    async fn insert(&self, mapping: UrlMapping) -> Result<StoredMapping>;
}
