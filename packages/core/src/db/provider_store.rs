//! ProviderStore Trait - Storage Abstraction Layer
//!
//! This module defines the `ProviderStore` trait that abstracts persistence
//! for providers and provider types. The trait is deliberately narrow: the
//! query engine only needs equality filtering, a stable ordering contract,
//! an optional offset/limit window, and fetch-by-id. Everything richer
//! (attribute predicates, free-text search) happens in memory above it.
//!
//! # Ordering Contract
//!
//! `list_providers` and `list_provider_types` return rows ordered by
//! `created_at` descending with ascending `id` as the tie-break. Every
//! backend must honor this so that pagination windows are deterministic.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: All methods are async so embedded and network
//!    backends share one trait
//! 2. **Ownership Semantics**: Mutating methods take ownership of values;
//!    callers clone if they need to retain the original
//! 3. **Error Handling**: `anyhow::Result` for flexible error context;
//!    getters return `Ok(None)` for missing rows rather than an error
//!
//! # Examples
//!
//! ```rust,no_run
//! use providerdesk_core::db::{MemoryStore, ProviderFilter, ProviderStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store: Arc<dyn ProviderStore> = Arc::new(MemoryStore::new());
//!     let all = store.list_providers(&ProviderFilter::default(), None).await?;
//!     assert!(all.is_empty());
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{Provider, ProviderStatus, ProviderType};

/// Equality filter answerable by any backend.
///
/// Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFilter {
    /// Filter by provider type id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_type_id: Option<String>,

    /// Filter by status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProviderStatus>,
}

impl ProviderFilter {
    /// True when `provider` satisfies every present equality filter.
    pub fn matches(&self, provider: &Provider) -> bool {
        if let Some(type_id) = &self.provider_type_id {
            if provider.provider_type_id != *type_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if provider.status != status {
                return false;
            }
        }
        true
    }
}

/// Offset/limit window pushed down to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
}

/// Abstraction layer for provider persistence.
///
/// Implementations must be `Send + Sync` so services can share them behind
/// `Arc<dyn ProviderStore>` across async tasks.
#[async_trait]
pub trait ProviderStore: Send + Sync {
    //
    // PROVIDERS
    //

    /// Insert a new provider.
    ///
    /// Returns the stored row with its embedded provider type populated.
    ///
    /// # Errors
    ///
    /// Returns an error if the id already exists.
    async fn insert_provider(&self, provider: Provider) -> Result<Provider>;

    /// Get a provider by id, embedded type populated.
    ///
    /// Returns `Ok(None)` when the row does not exist.
    async fn get_provider(&self, id: &str) -> Result<Option<Provider>>;

    /// Replace an existing provider row.
    ///
    /// # Errors
    ///
    /// Returns an error if no row with the provider's id exists.
    async fn update_provider(&self, provider: Provider) -> Result<Provider>;

    /// Delete a provider. Returns `false` when no row existed.
    async fn delete_provider(&self, id: &str) -> Result<bool>;

    /// List providers matching the equality filter.
    ///
    /// Rows are ordered `created_at` DESC, `id` ASC tie-break, with the
    /// optional window applied after ordering. Embedded provider types are
    /// populated.
    async fn list_providers(
        &self,
        filter: &ProviderFilter,
        window: Option<PageWindow>,
    ) -> Result<Vec<Provider>>;

    /// Exact count of providers matching the equality filter.
    async fn count_providers(&self, filter: &ProviderFilter) -> Result<u64>;

    //
    // PROVIDER TYPES
    //

    /// Insert a new provider type.
    ///
    /// # Errors
    ///
    /// Returns an error if the id already exists.
    async fn insert_provider_type(&self, provider_type: ProviderType) -> Result<ProviderType>;

    /// Get a provider type by id. Returns `Ok(None)` when missing.
    async fn get_provider_type(&self, id: &str) -> Result<Option<ProviderType>>;

    /// Get a provider type by its unique slug. Returns `Ok(None)` when missing.
    async fn get_provider_type_by_name(&self, name: &str) -> Result<Option<ProviderType>>;

    /// Replace an existing provider type row.
    ///
    /// # Errors
    ///
    /// Returns an error if no row with the type's id exists.
    async fn update_provider_type(&self, provider_type: ProviderType) -> Result<ProviderType>;

    /// Delete a provider type. Returns `false` when no row existed.
    ///
    /// Referential protection (no delete while providers reference the type)
    /// is enforced by the service layer via [`Self::count_providers_of_type`].
    async fn delete_provider_type(&self, id: &str) -> Result<bool>;

    /// List all provider types, `created_at` DESC, `id` ASC tie-break.
    async fn list_provider_types(&self) -> Result<Vec<ProviderType>>;

    /// Count providers referencing the given type.
    async fn count_providers_of_type(&self, type_id: &str) -> Result<u64>;
}
