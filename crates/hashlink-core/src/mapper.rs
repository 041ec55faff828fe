use crate::error::MapperError;
use crate::identifier::Identifier;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, MapperError>;

#[async_trait]
pub trait Mapper: Send + Sync + 'static {
    /// Stores `url` under its digest identifier and returns that identifier.
    async fn create(&self, url: String) -> Result<Identifier>;

    /// Returns the URL stored under `identifier`, or `None` if nothing was
    /// ever stored there.
    async fn resolve(&self, identifier: &Identifier) -> Result<Option<String>>;
}
