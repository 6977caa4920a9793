//! Database Error Types
//!
//! This module defines error types for storage operations. More specific
//! business failures (referential guards, immutability rules) are handled by
//! service-layer error types.

use thiserror::Error;

/// Storage operation errors
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Entity not found by id
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Insert collided with an existing id
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: String },

    /// Backend-specific failure with context
    #[error("Storage operation failed: {context}")]
    OperationFailed { context: String },
}

impl DatabaseError {
    /// Create a not-found error
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a duplicate-id error
    pub fn duplicate_id(entity: &'static str, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            entity,
            id: id.into(),
        }
    }

    /// Create an operation-failed error with context
    pub fn operation_failed(context: impl Into<String>) -> Self {
        Self::OperationFailed {
            context: context.into(),
        }
    }
}
