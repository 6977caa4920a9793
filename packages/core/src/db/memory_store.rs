//! In-Memory Store - Embedded Reference Backend
//!
//! `MemoryStore` implements [`ProviderStore`] over two `HashMap`s behind a
//! `tokio::sync::RwLock`. It is the backend used by the test suite and by
//! embedded deployments that do not need durability; a SQL backend would
//! plug into the same trait.
//!
//! Rows are stored without their embedded provider type; the join happens on
//! every read so embeds always reflect the current type row.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::db::error::DatabaseError;
use crate::db::provider_store::{PageWindow, ProviderFilter, ProviderStore};
use crate::models::{Provider, ProviderType};

#[derive(Default)]
struct MemoryState {
    providers: HashMap<String, Provider>,
    provider_types: HashMap<String, ProviderType>,
}

/// In-memory [`ProviderStore`] implementation.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Attach the embedded provider type to a row leaving the store.
fn embed_type(mut provider: Provider, types: &HashMap<String, ProviderType>) -> Provider {
    provider.provider_type = types.get(&provider.provider_type_id).cloned();
    provider
}

/// Ordering contract: `created_at` DESC, ascending `id` tie-break.
fn sort_providers(providers: &mut [Provider]) {
    providers.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[async_trait]
impl ProviderStore for MemoryStore {
    async fn insert_provider(&self, mut provider: Provider) -> Result<Provider> {
        let mut state = self.state.write().await;
        if state.providers.contains_key(&provider.id) {
            return Err(DatabaseError::duplicate_id("provider", &provider.id).into());
        }
        // Canonical rows never carry the embed; it is joined on read
        provider.provider_type = None;
        state.providers.insert(provider.id.clone(), provider.clone());
        Ok(embed_type(provider, &state.provider_types))
    }

    async fn get_provider(&self, id: &str) -> Result<Option<Provider>> {
        let state = self.state.read().await;
        Ok(state
            .providers
            .get(id)
            .cloned()
            .map(|p| embed_type(p, &state.provider_types)))
    }

    async fn update_provider(&self, mut provider: Provider) -> Result<Provider> {
        let mut state = self.state.write().await;
        if !state.providers.contains_key(&provider.id) {
            return Err(DatabaseError::not_found("provider", &provider.id).into());
        }
        provider.provider_type = None;
        state.providers.insert(provider.id.clone(), provider.clone());
        Ok(embed_type(provider, &state.provider_types))
    }

    async fn delete_provider(&self, id: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.providers.remove(id).is_some())
    }

    async fn list_providers(
        &self,
        filter: &ProviderFilter,
        window: Option<PageWindow>,
    ) -> Result<Vec<Provider>> {
        let state = self.state.read().await;
        let mut rows: Vec<Provider> = state
            .providers
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        sort_providers(&mut rows);

        let rows: Vec<Provider> = match window {
            Some(w) => rows.into_iter().skip(w.offset).take(w.limit).collect(),
            None => rows,
        };

        Ok(rows
            .into_iter()
            .map(|p| embed_type(p, &state.provider_types))
            .collect())
    }

    async fn count_providers(&self, filter: &ProviderFilter) -> Result<u64> {
        let state = self.state.read().await;
        Ok(state.providers.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn insert_provider_type(&self, provider_type: ProviderType) -> Result<ProviderType> {
        let mut state = self.state.write().await;
        if state.provider_types.contains_key(&provider_type.id) {
            return Err(DatabaseError::duplicate_id("provider type", &provider_type.id).into());
        }
        state
            .provider_types
            .insert(provider_type.id.clone(), provider_type.clone());
        Ok(provider_type)
    }

    async fn get_provider_type(&self, id: &str) -> Result<Option<ProviderType>> {
        let state = self.state.read().await;
        Ok(state.provider_types.get(id).cloned())
    }

    async fn get_provider_type_by_name(&self, name: &str) -> Result<Option<ProviderType>> {
        let state = self.state.read().await;
        Ok(state
            .provider_types
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn update_provider_type(&self, provider_type: ProviderType) -> Result<ProviderType> {
        let mut state = self.state.write().await;
        if !state.provider_types.contains_key(&provider_type.id) {
            return Err(DatabaseError::not_found("provider type", &provider_type.id).into());
        }
        state
            .provider_types
            .insert(provider_type.id.clone(), provider_type.clone());
        Ok(provider_type)
    }

    async fn delete_provider_type(&self, id: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.provider_types.remove(id).is_some())
    }

    async fn list_provider_types(&self) -> Result<Vec<ProviderType>> {
        let state = self.state.read().await;
        let mut rows: Vec<ProviderType> = state.provider_types.values().cloned().collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    async fn count_providers_of_type(&self, type_id: &str) -> Result<u64> {
        let state = self.state.read().await;
        Ok(state
            .providers
            .values()
            .filter(|p| p.provider_type_id == type_id)
            .count() as u64)
    }
}
