//! ProviderDesk Core Business Logic Layer
//!
//! This crate provides the data model, storage abstraction, and query engine
//! for the ProviderDesk supplier administration system.
//!
//! # Architecture
//!
//! - **Schema-Driven Attributes**: Every provider carries a dynamic attribute
//!   bag whose expected shape is described by its provider type's schema
//! - **Opaque Store**: Persistence is reached through the [`db::ProviderStore`]
//!   trait; backends only need equality filtering and fetch-by-id
//! - **Hybrid Pagination**: Listing pushes offset/limit to the store unless an
//!   in-memory filter (free-text search, attribute predicates) is active, in
//!   which case the full candidate set is scanned before slicing
//!
//! # Modules
//!
//! - [`models`] - Data structures (Provider, ProviderType, AttributeValue)
//! - [`services`] - Business services (QueryEngine, ProviderService, ProviderTypeService)
//! - [`db`] - Storage abstraction and the embedded in-memory backend

pub mod models;
pub mod services;
pub mod db;

// Re-export commonly used types
pub use models::*;
pub use services::*;
pub use db::*;
