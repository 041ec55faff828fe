//! Core types and traits for the hashlink URL mapping service.
//!
//! This crate provides the identifier type, the stored record shapes and the
//! traits shared by the storage backends, the mapping service and the HTTP
//! gateway.

pub mod error;
pub mod identifier;
pub mod mapper;
pub mod repository;

pub use error::{MapperError, StorageError};
pub use identifier::Identifier;
pub use mapper::Mapper;
pub use repository::{ReadRepository, Repository, StoredMapping, UrlMapping};
