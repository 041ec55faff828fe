//! Persistence collaborators for the mapping service.

pub mod memory;
pub mod mysql;

pub use hashlink_core::error::{Result, StorageError};
pub use hashlink_core::repository::{ReadRepository, Repository, StoredMapping, UrlMapping};
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
