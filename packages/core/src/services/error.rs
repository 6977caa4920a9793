//! Service Layer Error Types
//!
//! This module defines error types for service-layer operations. Storage
//! failures are wrapped (never swallowed) so callers can distinguish "zero
//! results" from "the store was unreachable".

use thiserror::Error;

/// Service operation errors
#[derive(Error, Debug)]
pub enum ProviderServiceError {
    /// Provider not found by id
    #[error("Provider not found: {id}")]
    ProviderNotFound { id: String },

    /// Provider type not found by id
    #[error("Provider type not found: {id}")]
    ProviderTypeNotFound { id: String },

    /// Provider type slug already taken
    #[error("Provider type name already exists: {name}")]
    DuplicateTypeName { name: String },

    /// Provider type slugs are immutable after creation
    #[error("Provider type name is immutable: {id}")]
    TypeNameImmutable { id: String },

    /// Provider type still referenced by providers
    #[error("Cannot delete provider type {id}: {count} associated providers")]
    TypeInUse { id: String, count: u64 },

    /// Upstream store failure, propagated unchanged
    #[error("Storage operation failed: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ProviderServiceError {
    /// Create a provider not-found error
    pub fn provider_not_found(id: impl Into<String>) -> Self {
        Self::ProviderNotFound { id: id.into() }
    }

    /// Create a provider type not-found error
    pub fn provider_type_not_found(id: impl Into<String>) -> Self {
        Self::ProviderTypeNotFound { id: id.into() }
    }

    /// Create a duplicate slug error
    pub fn duplicate_type_name(name: impl Into<String>) -> Self {
        Self::DuplicateTypeName { name: name.into() }
    }

    /// Create a type-in-use error
    pub fn type_in_use(id: impl Into<String>, count: u64) -> Self {
        Self::TypeInUse {
            id: id.into(),
            count,
        }
    }
}
