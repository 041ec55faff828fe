use async_trait::async_trait;
use hashlink_core::{Identifier, Mapper, MapperError, Repository, UrlMapping};
use std::sync::Arc;
use tracing::{debug, trace};

/// A concrete implementation of the `Mapper` trait.
///
/// The service owns a handle to the repository it was constructed with and
/// performs exactly one repository call per operation. Storage errors are
/// passed through as [`MapperError::Storage`] without retry.
#[derive(Debug)]
pub struct MappingService<R> {
    repository: Arc<R>,
}

impl<R> Clone for MappingService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: Repository> MappingService<R> {
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }

    /// Creates a service over a repository that is also used elsewhere.
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }
}

#[async_trait]
impl<R: Repository> Mapper for MappingService<R> {
    async fn create(&self, url: String) -> Result<Identifier, MapperError> {
        let mapping = UrlMapping::for_url(url);
        let stored = self.repository.insert(mapping).await?;

        debug!(identifier = %stored.identifier, id = stored.id, "stored url mapping");
        Ok(stored.identifier)
    }

    async fn resolve(&self, identifier: &Identifier) -> Result<Option<String>, MapperError> {
        trace!(
            identifier = %identifier,
            digest_shaped = identifier.is_digest_shaped(),
            "resolving identifier"
        );

        match self.repository.find_first(identifier).await? {
            Some(record) => {
                debug!(identifier = %identifier, url = %record.url, "resolved identifier");
                Ok(Some(record.url))
            }
            None => {
                trace!(identifier = %identifier, "identifier not found");
                Ok(None)
            }
        }
    }
}
