//! Provider Service - CRUD Operations
//!
//! Business layer for provider records: create, read, update, delete, plus
//! listing via the query engine. The service validates type references and
//! owns the partial-update merge; shape validation of attribute bags happens
//! upstream and is deliberately absent here.

use std::sync::Arc;

use crate::db::ProviderStore;
use crate::models::{CreateProvider, Provider, UpdateProvider};
use crate::services::error::ProviderServiceError;
use crate::services::query_engine::{ProviderPage, ProviderQuery, QueryEngine};

/// Service for managing providers.
pub struct ProviderService {
    store: Arc<dyn ProviderStore>,
    engine: QueryEngine,
}

impl ProviderService {
    /// Create a new ProviderService over the given store.
    pub fn new(store: Arc<dyn ProviderStore>) -> Self {
        let engine = QueryEngine::new(store.clone());
        Self { store, engine }
    }

    /// List providers matching a query, one page at a time.
    pub async fn list(&self, query: &ProviderQuery) -> Result<ProviderPage, ProviderServiceError> {
        self.engine.execute(query).await
    }

    /// Get a provider by id, embedded type populated.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderServiceError::ProviderNotFound`] when no such row
    /// exists.
    pub async fn get(&self, id: &str) -> Result<Provider, ProviderServiceError> {
        self.store
            .get_provider(id)
            .await?
            .ok_or_else(|| ProviderServiceError::provider_not_found(id))
    }

    /// Create a provider.
    ///
    /// The referenced provider type must exist; status defaults to active
    /// when unset.
    pub async fn create(&self, input: CreateProvider) -> Result<Provider, ProviderServiceError> {
        self.ensure_type_exists(&input.provider_type_id).await?;

        let provider = self.store.insert_provider(Provider::new(input)).await?;
        tracing::debug!(id = %provider.id, "created provider");
        Ok(provider)
    }

    /// Partially update a provider.
    ///
    /// Present fields overwrite, absent fields are kept; the nullable
    /// `phone` and `address` fields can be cleared with an explicit null.
    /// A changed `provider_type_id` is validated against the store; the
    /// attribute bag is replaced wholesale when supplied, matching the
    /// admin form's submit-the-whole-bag behavior.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateProvider,
    ) -> Result<Provider, ProviderServiceError> {
        let mut provider = self.get(id).await?;

        if let Some(type_id) = input.provider_type_id {
            if type_id != provider.provider_type_id {
                self.ensure_type_exists(&type_id).await?;
                provider.provider_type_id = type_id;
            }
        }
        if let Some(name) = input.name {
            provider.name = name;
        }
        if let Some(email) = input.email {
            provider.email = email;
        }
        // Nullable fields: an explicit null clears, an absent field keeps
        if let Some(phone) = input.phone {
            provider.phone = phone;
        }
        if let Some(address) = input.address {
            provider.address = address;
        }
        if let Some(attributes) = input.attributes {
            provider.attributes = attributes;
        }
        if let Some(status) = input.status {
            provider.status = status;
        }
        provider.touch();

        let updated = self.store.update_provider(provider).await?;
        tracing::debug!(id = %updated.id, "updated provider");
        Ok(updated)
    }

    /// Delete a provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderServiceError::ProviderNotFound`] when no such row
    /// exists.
    pub async fn delete(&self, id: &str) -> Result<(), ProviderServiceError> {
        if !self.store.delete_provider(id).await? {
            return Err(ProviderServiceError::provider_not_found(id));
        }
        tracing::info!(id, "deleted provider");
        Ok(())
    }

    async fn ensure_type_exists(&self, type_id: &str) -> Result<(), ProviderServiceError> {
        self.store
            .get_provider_type(type_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ProviderServiceError::provider_type_not_found(type_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{AttributeSchema, CreateProviderType, ProviderStatus, ProviderType};
    use serde_json::json;

    async fn service_with_type() -> (ProviderService, ProviderType) {
        let store = Arc::new(MemoryStore::new());
        let hotel = store
            .insert_provider_type(ProviderType::new(CreateProviderType {
                name: "hotel".to_string(),
                label: "Hôtel".to_string(),
                attribute_schema: AttributeSchema::new(),
            }))
            .await
            .unwrap();
        (ProviderService::new(store), hotel)
    }

    fn create_input(type_id: &str) -> CreateProvider {
        CreateProvider {
            name: "Grand Hotel".to_string(),
            email: "contact@grandhotel.example".to_string(),
            phone: None,
            address: None,
            provider_type_id: type_id.to_string(),
            attributes: serde_json::from_value(json!({"stars": 4.0})).unwrap(),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_and_embeds_type() {
        let (service, hotel) = service_with_type().await;

        let created = service.create(create_input(&hotel.id)).await.unwrap();
        assert_eq!(created.status, ProviderStatus::Active);
        assert_eq!(created.provider_type.as_ref().unwrap().name, "hotel");

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_type() {
        let (service, _hotel) = service_with_type().await;

        let err = service.create(create_input("missing-type")).await;
        assert!(matches!(
            err,
            Err(ProviderServiceError::ProviderTypeNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_merges_partially() {
        let (service, hotel) = service_with_type().await;
        let created = service.create(create_input(&hotel.id)).await.unwrap();

        let updated = service
            .update(
                &created.id,
                UpdateProvider {
                    phone: Some(Some("+33 1 00 00 00 00".to_string())),
                    status: Some(ProviderStatus::Inactive),
                    ..UpdateProvider::default()
                },
            )
            .await
            .unwrap();

        // Untouched fields survive
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.attributes, created.attributes);
        // Touched fields change
        assert_eq!(updated.phone.as_deref(), Some("+33 1 00 00 00 00"));
        assert_eq!(updated.status, ProviderStatus::Inactive);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_clears_nullable_fields_on_explicit_null() {
        let (service, hotel) = service_with_type().await;
        let mut input = create_input(&hotel.id);
        input.phone = Some("+33 1 23 45 67 89".to_string());
        input.address = Some("12 Rue de Rivoli, Paris".to_string());
        let created = service.create(input).await.unwrap();
        assert!(created.phone.is_some());
        assert!(created.address.is_some());

        // Explicit null clears the phone; the absent address survives
        let cleared = service
            .update(
                &created.id,
                UpdateProvider {
                    phone: Some(None),
                    ..UpdateProvider::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.phone, None);
        assert_eq!(cleared.address, created.address);
    }

    #[tokio::test]
    async fn test_update_validates_changed_type() {
        let (service, hotel) = service_with_type().await;
        let created = service.create(create_input(&hotel.id)).await.unwrap();

        let err = service
            .update(
                &created.id,
                UpdateProvider {
                    provider_type_id: Some("missing-type".to_string()),
                    ..UpdateProvider::default()
                },
            )
            .await;
        assert!(matches!(
            err,
            Err(ProviderServiceError::ProviderTypeNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_attribute_bag_wholesale() {
        let (service, hotel) = service_with_type().await;
        let created = service.create(create_input(&hotel.id)).await.unwrap();

        let updated = service
            .update(
                &created.id,
                UpdateProvider {
                    attributes: Some(serde_json::from_value(json!({"wifi": true})).unwrap()),
                    ..UpdateProvider::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.attributes.contains_key("wifi"));
        assert!(!updated.attributes.contains_key("stars"));
    }

    #[tokio::test]
    async fn test_get_and_delete_missing_provider() {
        let (service, _hotel) = service_with_type().await;

        assert!(matches!(
            service.get("ghost").await,
            Err(ProviderServiceError::ProviderNotFound { .. })
        ));
        assert!(matches!(
            service.delete("ghost").await,
            Err(ProviderServiceError::ProviderNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (service, hotel) = service_with_type().await;
        let created = service.create(create_input(&hotel.id)).await.unwrap();

        service.delete(&created.id).await.unwrap();
        assert!(service.get(&created.id).await.is_err());
    }
}
