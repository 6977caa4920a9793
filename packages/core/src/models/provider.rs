//! Provider Model
//!
//! A provider is a supplier record combining fixed contact fields with a
//! dynamic, schema-described attribute bag (see [`crate::models::AttributeValue`]).
//! The bag's shape is owned by the provider's type; this struct stores it
//! verbatim and tolerates bags that drift from the schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::provider_type::ProviderType;
use crate::models::value::Attributes;

/// Provider lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderStatus::Active => write!(f, "active"),
            ProviderStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for ProviderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "active" => Ok(ProviderStatus::Active),
            "inactive" => Ok(ProviderStatus::Inactive),
            _ => Err(anyhow::anyhow!("Invalid provider status: {}", s)),
        }
    }
}

/// A supplier record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    /// Unique identifier (UUID)
    pub id: String,

    // Contact fields
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Owning provider type
    pub provider_type_id: String,

    /// Embedded provider type, populated by the store on fetch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<ProviderType>,

    /// Dynamic attribute bag ("specificities")
    #[serde(default)]
    pub attributes: Attributes,

    /// Lifecycle status
    pub status: ProviderStatus,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Provider {
    /// Create a new provider with a generated UUID and fresh timestamps.
    ///
    /// Status defaults to `Active` when the input leaves it unset.
    pub fn new(input: CreateProvider) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            provider_type_id: input.provider_type_id,
            provider_type: None,
            attributes: input.attributes,
            status: input.status.unwrap_or(ProviderStatus::Active),
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Input for creating a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProvider {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub provider_type_id: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProviderStatus>,
}

/// Input for updating a provider (all fields optional, partial merge).
///
/// `phone` and `address` are nullable: an explicit `null` clears the stored
/// value, while an absent field keeps it. The double `Option` keeps the two
/// distinguishable after deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// `Some(None)` clears the stored phone
    #[serde(
        default,
        deserialize_with = "nullable_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<Option<String>>,
    /// `Some(None)` clears the stored address
    #[serde(
        default,
        deserialize_with = "nullable_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProviderStatus>,
}

/// Deserialize a field so that a present `null` becomes `Some(None)` while
/// an absent field falls back to the `None` default.
fn nullable_field<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
