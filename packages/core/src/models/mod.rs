//! Data Models
//!
//! This module contains the core data structures used throughout ProviderDesk:
//!
//! - `Provider` - Supplier record with fixed fields and a dynamic attribute bag
//! - `ProviderType` - Named category carrying the attribute schema
//! - `AttributeValue` - Tagged value type for attribute bags
//!
//! All models serialize with camelCase field names for the HTTP layer.

mod provider;
mod provider_type;
mod value;

pub use provider::{CreateProvider, Provider, ProviderStatus, UpdateProvider};
pub use provider_type::{
    AttributeSchema, CreateProviderType, FieldKind, FieldSpec, ProviderType, UpdateProviderType,
};
pub use value::{AttributeValue, Attributes};
