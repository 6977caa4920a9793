//! Storage Layer
//!
//! This module holds the persistence abstraction for ProviderDesk:
//!
//! - [`ProviderStore`] - async trait every backend implements
//! - [`MemoryStore`] - embedded in-process backend (tests, demos)
//! - [`DatabaseError`] - storage error taxonomy
//!
//! The trait surface is equality-filter + ordered listing + fetch-by-id; the
//! query engine builds everything richer on top of it in memory.

mod error;
mod memory_store;
mod provider_store;

pub use error::DatabaseError;
pub use memory_store::MemoryStore;
pub use provider_store::{PageWindow, ProviderFilter, ProviderStore};
