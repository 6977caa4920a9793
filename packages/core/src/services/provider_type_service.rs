//! Provider Type Service - CRUD Operations
//!
//! Business layer for provider types. Enforces the two invariants the data
//! model cannot: slugs are unique and immutable, and a type cannot be
//! deleted while providers still reference it.

use std::sync::Arc;

use crate::db::ProviderStore;
use crate::models::{CreateProviderType, ProviderType, UpdateProviderType};
use crate::services::error::ProviderServiceError;

/// Service for managing provider types.
pub struct ProviderTypeService {
    store: Arc<dyn ProviderStore>,
}

impl ProviderTypeService {
    /// Create a new ProviderTypeService over the given store.
    pub fn new(store: Arc<dyn ProviderStore>) -> Self {
        Self { store }
    }

    /// List all provider types, newest first.
    pub async fn list(&self) -> Result<Vec<ProviderType>, ProviderServiceError> {
        Ok(self.store.list_provider_types().await?)
    }

    /// Get a provider type by id.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderServiceError::ProviderTypeNotFound`] when no such
    /// row exists.
    pub async fn get(&self, id: &str) -> Result<ProviderType, ProviderServiceError> {
        self.store
            .get_provider_type(id)
            .await?
            .ok_or_else(|| ProviderServiceError::provider_type_not_found(id))
    }

    /// Create a provider type.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderServiceError::DuplicateTypeName`] when the slug is
    /// already taken.
    pub async fn create(
        &self,
        input: CreateProviderType,
    ) -> Result<ProviderType, ProviderServiceError> {
        if self
            .store
            .get_provider_type_by_name(&input.name)
            .await?
            .is_some()
        {
            return Err(ProviderServiceError::duplicate_type_name(&input.name));
        }

        let provider_type = self
            .store
            .insert_provider_type(ProviderType::new(input))
            .await?;
        tracing::debug!(id = %provider_type.id, name = %provider_type.name, "created provider type");
        Ok(provider_type)
    }

    /// Partially update a provider type's label or schema.
    ///
    /// The slug is immutable: supplying `name` with a different value is
    /// rejected, supplying the current value is a no-op.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateProviderType,
    ) -> Result<ProviderType, ProviderServiceError> {
        let mut provider_type = self.get(id).await?;

        if let Some(name) = input.name {
            if name != provider_type.name {
                return Err(ProviderServiceError::TypeNameImmutable { id: id.to_string() });
            }
        }
        if let Some(label) = input.label {
            provider_type.label = label;
        }
        if let Some(schema) = input.attribute_schema {
            provider_type.attribute_schema = schema;
        }
        provider_type.touch();

        let updated = self.store.update_provider_type(provider_type).await?;
        tracing::debug!(id = %updated.id, "updated provider type");
        Ok(updated)
    }

    /// Delete a provider type.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderServiceError::TypeInUse`] while any provider still
    /// references the type, [`ProviderServiceError::ProviderTypeNotFound`]
    /// when no such row exists.
    pub async fn delete(&self, id: &str) -> Result<(), ProviderServiceError> {
        let count = self.store.count_providers_of_type(id).await?;
        if count > 0 {
            return Err(ProviderServiceError::type_in_use(id, count));
        }
        if !self.store.delete_provider_type(id).await? {
            return Err(ProviderServiceError::provider_type_not_found(id));
        }
        tracing::info!(id, "deleted provider type");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{AttributeSchema, CreateProvider, FieldKind, FieldSpec, Provider};

    fn service() -> (ProviderTypeService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ProviderTypeService::new(store.clone()), store)
    }

    fn create_input(name: &str) -> CreateProviderType {
        let mut schema = AttributeSchema::new();
        schema.insert("stars".to_string(), FieldSpec::new(FieldKind::Number));
        CreateProviderType {
            name: name.to_string(),
            label: name.to_string(),
            attribute_schema: schema,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (service, _store) = service();
        let created = service.create(create_input("hotel")).await.unwrap();
        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.attribute_schema.contains_key("stars"));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_slug() {
        let (service, _store) = service();
        service.create(create_input("hotel")).await.unwrap();

        let err = service.create(create_input("hotel")).await;
        assert!(matches!(
            err,
            Err(ProviderServiceError::DuplicateTypeName { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_label_and_schema() {
        let (service, _store) = service();
        let created = service.create(create_input("venue")).await.unwrap();

        let mut new_schema = AttributeSchema::new();
        new_schema.insert("capacity".to_string(), FieldSpec::new(FieldKind::Number));
        let updated = service
            .update(
                &created.id,
                UpdateProviderType {
                    label: Some("Lieu de réception".to_string()),
                    attribute_schema: Some(new_schema),
                    ..UpdateProviderType::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.label, "Lieu de réception");
        assert!(updated.attribute_schema.contains_key("capacity"));
        assert_eq!(updated.name, "venue");
    }

    #[tokio::test]
    async fn test_slug_is_immutable() {
        let (service, _store) = service();
        let created = service.create(create_input("caterer")).await.unwrap();

        // Same slug passes through as a no-op
        service
            .update(
                &created.id,
                UpdateProviderType {
                    name: Some("caterer".to_string()),
                    ..UpdateProviderType::default()
                },
            )
            .await
            .unwrap();

        let err = service
            .update(
                &created.id,
                UpdateProviderType {
                    name: Some("renamed".to_string()),
                    ..UpdateProviderType::default()
                },
            )
            .await;
        assert!(matches!(
            err,
            Err(ProviderServiceError::TypeNameImmutable { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_guarded_by_references() {
        let (service, store) = service();
        let created = service.create(create_input("hotel")).await.unwrap();

        store
            .insert_provider(Provider::new(CreateProvider {
                name: "Grand Hotel".to_string(),
                email: "contact@grandhotel.example".to_string(),
                phone: None,
                address: None,
                provider_type_id: created.id.clone(),
                attributes: Default::default(),
                status: None,
            }))
            .await
            .unwrap();

        let err = service.delete(&created.id).await;
        assert!(matches!(
            err,
            Err(ProviderServiceError::TypeInUse { count: 1, .. })
        ));
        // Still fetchable after the refused delete
        assert!(service.get(&created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_when_unreferenced() {
        let (service, _store) = service();
        let created = service.create(create_input("florist")).await.unwrap();

        service.delete(&created.id).await.unwrap();
        assert!(matches!(
            service.get(&created.id).await,
            Err(ProviderServiceError::ProviderTypeNotFound { .. })
        ));
        assert!(service.delete(&created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let (service, _store) = service();
        let first = service.create(create_input("a")).await.unwrap();
        let second = service.create(create_input("b")).await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        // Same-instant ties fall back to ascending id
        if first.created_at == second.created_at {
            let mut ids = vec![first.id.clone(), second.id.clone()];
            ids.sort();
            assert_eq!(listed[0].id, ids[0]);
        } else {
            assert_eq!(listed[0].id, second.id);
        }
    }
}
