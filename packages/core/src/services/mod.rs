//! Business Services
//!
//! This module contains the core business logic services:
//!
//! - `QueryEngine` - schema-driven filtering, search, and pagination
//! - `ProviderService` - provider CRUD and listing
//! - `ProviderTypeService` - provider type CRUD with referential guards
//!
//! Services coordinate between the storage layer and application logic,
//! implementing business rules and orchestrating the query pipeline.

pub mod error;
pub mod provider_service;
pub mod provider_type_service;
pub mod query_engine;

pub use error::ProviderServiceError;
pub use provider_service::ProviderService;
pub use provider_type_service::ProviderTypeService;
pub use query_engine::{
    AttributeFilter, ProviderPage, ProviderQuery, QueryEngine, RangeFilter,
};
