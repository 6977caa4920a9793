//! Dynamic Attribute Values
//!
//! This module defines the tagged value type stored in a provider's attribute
//! bag. Attribute bags are semi-structured: their shape *should* follow the
//! provider type's schema, but nothing in this crate enforces that. Matching
//! and search logic therefore dispatches on the tag and treats anything
//! unexpected as a non-match rather than an error.
//!
//! # Examples
//!
//! ```rust
//! use providerdesk_core::models::AttributeValue;
//!
//! let rooms: AttributeValue = serde_json::from_str("120").unwrap();
//! assert_eq!(rooms.as_number(), Some(120.0));
//!
//! let amenities: AttributeValue = serde_json::from_str(r#"["wifi","parking"]"#).unwrap();
//! assert!(amenities.contains_term("wifi"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered attribute bag keyed by attribute name.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A dynamically-typed attribute value.
///
/// Covers the JSON shapes the admin UI can produce: scalars and arrays of
/// primitives. `Null` is kept as an explicit tag so that a stored `null`
/// survives round-trips instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Explicit null (never matches any predicate or search term)
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (JSON number model, f64)
    Number(f64),
    /// String value
    String(String),
    /// Array of primitive values
    Array(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Return the numeric value, if this value is a number.
    ///
    /// Range predicates only apply to numeric values; everything else
    /// resolves to `None` and therefore to a non-match.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Case-insensitive substring test against the value's textual form.
    ///
    /// `term` must already be lowercased by the caller (it is lowercased once
    /// per query, not once per candidate). Conversion rules:
    ///
    /// - strings are compared case-folded
    /// - numbers use their decimal form (`120` → "120", `4.5` → "4.5")
    /// - booleans use their literal form ("true" / "false")
    /// - arrays match if any element matches
    /// - null never matches
    pub fn contains_term(&self, term: &str) -> bool {
        match self {
            AttributeValue::Null => false,
            AttributeValue::Bool(b) => {
                let text = if *b { "true" } else { "false" };
                text.contains(term)
            }
            AttributeValue::Number(n) => n.to_string().contains(term),
            AttributeValue::String(s) => s.to_lowercase().contains(term),
            AttributeValue::Array(items) => items.iter().any(|item| item.contains_term(term)),
        }
    }

    /// Strict scalar equality with array-membership fallback.
    ///
    /// A scalar predicate matches when the candidate value equals `expected`
    /// (same tag, same value), or when the candidate is an array containing
    /// an element equal to `expected`.
    pub fn matches_scalar(&self, expected: &AttributeValue) -> bool {
        match self {
            AttributeValue::Array(items) => items.iter().any(|item| item == expected),
            other => other == expected,
        }
    }
}
