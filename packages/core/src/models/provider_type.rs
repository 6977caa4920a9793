//! Provider Type Model
//!
//! A provider type names a category of supplier ("hotel", "caterer",
//! "audiovisual") and carries the attribute schema describing the dynamic
//! fields providers of that type are expected to fill in.
//!
//! The schema is descriptive data for form rendering and admin tooling; the
//! query engine reads attribute bags without ever validating them against it.
//!
//! ## Example Schema
//!
//! ```json
//! {
//!   "stars": { "type": "number", "required": true, "min": 1, "max": 5 },
//!   "amenities": { "type": "array", "items": "string" },
//!   "restaurant": { "type": "boolean" }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Ordered mapping from attribute name to its field descriptor.
pub type AttributeSchema = BTreeMap<String, FieldSpec>;

/// Primitive kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

/// Descriptor for a single dynamic attribute.
///
/// Mirrors what the admin UI edits: a kind plus optional constraints. Object
/// fields nest recursively through `properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Field kind
    #[serde(rename = "type")]
    pub kind: FieldKind,

    /// Whether the field is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Lower bound for numeric fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Upper bound for numeric fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Element kind for array fields
    #[serde(rename = "items", skip_serializing_if = "Option::is_none")]
    pub item_kind: Option<FieldKind>,

    /// Nested field descriptors for object fields (recursive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, FieldSpec>>,
}

impl FieldSpec {
    /// Create a descriptor of the given kind with no constraints.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: None,
            min: None,
            max: None,
            item_kind: None,
            properties: None,
        }
    }
}

/// A named provider category with its attribute schema.
///
/// `name` is a unique slug and immutable after creation; renames are rejected
/// by `ProviderTypeService`, not by this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderType {
    /// Unique identifier (UUID)
    pub id: String,

    /// Unique slug (e.g., "hotel", "caterer")
    pub name: String,

    /// Human-readable label (e.g., "Hôtel")
    pub label: String,

    /// Schema for the dynamic attribute bag
    pub attribute_schema: AttributeSchema,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl ProviderType {
    /// Create a new provider type with a generated UUID and fresh timestamps.
    pub fn new(input: CreateProviderType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            label: input.label,
            attribute_schema: input.attribute_schema,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Input for creating a provider type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProviderType {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub attribute_schema: AttributeSchema,
}

/// Input for updating a provider type (all fields optional).
///
/// Supplying `name` with a different slug is rejected by the service layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProviderType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_schema: Option<AttributeSchema>,
}
