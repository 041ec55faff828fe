//! The mapping service.
//!
//! This crate provides [`MappingService`], the [`Mapper`] implementation
//! that derives identifiers and talks to a repository. Core types are
//! re-exported from `hashlink_core`.

pub mod service;

pub use hashlink_core::{Identifier, Mapper, MapperError};
pub use service::MappingService;
