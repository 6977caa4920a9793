//! Provider Query Engine
//!
//! This module implements the listing pipeline for providers: a relational
//! prefilter answered by the store, an in-memory attribute matcher, an
//! in-memory free-text scanner, and a paginator. Each stage is a pure,
//! order-preserving filter; only the prefilter touches the store.
//!
//! # Hybrid Pagination
//!
//! Offset/limit can be pushed to the store only when no in-memory stage can
//! narrow the candidate set, i.e. when the query has neither a search term
//! nor attribute predicates. Otherwise the engine fetches the full
//! prefiltered set, filters it, and slices afterwards. In both modes `total`
//! is the exact post-filter count, never an estimate.
//!
//! # Tolerance
//!
//! Attribute bags are semi-structured: missing keys, extra keys, and
//! type-mismatched values are expected. The matcher and scanner resolve all
//! of them to a non-match; no stage ever fails on malformed dynamic data.
//!
//! # Examples
//!
//! ```rust,no_run
//! use providerdesk_core::db::MemoryStore;
//! use providerdesk_core::services::{ProviderQuery, QueryEngine};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), providerdesk_core::ProviderServiceError> {
//! let engine = QueryEngine::new(Arc::new(MemoryStore::new()));
//!
//! let query = ProviderQuery {
//!     search: Some("hotel".to_string()),
//!     ..ProviderQuery::default()
//! };
//! let page = engine.execute(&query).await?;
//! println!("{} of {} providers", page.items.len(), page.total);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::{PageWindow, ProviderFilter, ProviderStore};
use crate::models::{AttributeValue, Provider, ProviderStatus};
use crate::services::error::ProviderServiceError;

/// Default page number (1-based).
fn default_page() -> i64 {
    1
}

/// Default page size, matching the admin UI's list view.
fn default_limit() -> i64 {
    10
}

/// Numeric range predicate over an attribute value.
///
/// Bounds are inclusive; an absent bound is unconstrained. A missing or
/// non-numeric candidate value never satisfies a range, even an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl RangeFilter {
    /// True when `value` is numeric and inside the bounds.
    pub fn matches(&self, value: Option<&AttributeValue>) -> bool {
        let Some(number) = value.and_then(AttributeValue::as_number) else {
            return false;
        };
        if let Some(min) = self.min {
            if number < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if number > max {
                return false;
            }
        }
        true
    }
}

/// Predicate applied to one attribute key.
///
/// Deserialization follows the wire convention: a JSON object is a range,
/// anything else is a scalar to match exactly (or by array membership).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeFilter {
    /// `{ "min": 3, "max": 5 }`-style numeric range
    Range(RangeFilter),
    /// Scalar equality / array membership
    Value(AttributeValue),
}

impl AttributeFilter {
    /// Evaluate the predicate against a candidate's attribute value.
    ///
    /// `value` is `None` when the candidate is missing the key, which is
    /// always a non-match.
    pub fn matches(&self, value: Option<&AttributeValue>) -> bool {
        match self {
            AttributeFilter::Range(range) => range.matches(value),
            AttributeFilter::Value(expected) => match value {
                Some(candidate) => candidate.matches_scalar(expected),
                None => false,
            },
        }
    }
}

/// A provider listing request, pre-validated by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderQuery {
    /// Equality filter on the provider type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_type_id: Option<String>,

    /// Equality filter on status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProviderStatus>,

    /// Case-insensitive substring search across fixed fields and all
    /// attribute values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Per-attribute predicates, combined with logical AND
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attribute_filters: BTreeMap<String, AttributeFilter>,

    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: i64,

    /// Page size (1..=100 after upstream validation)
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for ProviderQuery {
    fn default() -> Self {
        Self {
            provider_type_id: None,
            status: None,
            search: None,
            attribute_filters: BTreeMap::new(),
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl ProviderQuery {
    /// The non-empty search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// True when an in-memory stage can narrow the candidate set, which
    /// forbids pushing pagination down to the store.
    pub fn requires_full_scan(&self) -> bool {
        self.search_term().is_some() || !self.attribute_filters.is_empty()
    }

    /// The equality filter answerable by the store.
    pub fn store_filter(&self) -> ProviderFilter {
        ProviderFilter {
            provider_type_id: self.provider_type_id.clone(),
            status: self.status,
        }
    }
}

/// One page of query results.
///
/// `total` counts everything matching the filters, independent of the slice
/// returned in `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPage {
    pub items: Vec<Provider>,
    pub total: u64,
    pub page: i64,
    pub limit: i64,
}

/// True when the candidate passes every attribute predicate.
///
/// An empty filter set passes everything. A candidate missing a filtered
/// key fails that key; malformed values resolve to non-match.
pub fn matches_attribute_filters(
    provider: &Provider,
    filters: &BTreeMap<String, AttributeFilter>,
) -> bool {
    filters
        .iter()
        .all(|(key, filter)| filter.matches(provider.attributes.get(key)))
}

/// True when the candidate matches the search term.
///
/// `term` must already be lowercased. Fixed fields (name, email, address,
/// phone) are case-folded and tested first; the attribute bag is scanned
/// value by value afterwards.
pub fn matches_search(provider: &Provider, term: &str) -> bool {
    let fixed_fields = [
        Some(provider.name.as_str()),
        Some(provider.email.as_str()),
        provider.address.as_deref(),
        provider.phone.as_deref(),
    ];
    if fixed_fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(term))
    {
        return true;
    }

    provider
        .attributes
        .values()
        .any(|value| value.contains_term(term))
}

/// Translate page/limit into a store window.
///
/// Returns `None` when `limit` is non-positive (zero items, never an
/// error); `page` below 1 degenerates to the first window instead of a
/// negative offset. Arithmetic saturates so extreme pages resolve to an
/// empty slice rather than an overflow panic.
fn page_window(page: i64, limit: i64) -> Option<PageWindow> {
    if limit <= 0 {
        return None;
    }
    let page_index = page.saturating_sub(1).max(0) as usize;
    Some(PageWindow {
        offset: page_index.saturating_mul(limit as usize),
        limit: limit as usize,
    })
}

/// Slice one page from an already-filtered sequence.
fn slice_page(items: Vec<Provider>, page: i64, limit: i64) -> Vec<Provider> {
    match page_window(page, limit) {
        Some(window) => items
            .into_iter()
            .skip(window.offset)
            .take(window.limit)
            .collect(),
        None => Vec::new(),
    }
}

/// Executes provider listing queries against a store.
pub struct QueryEngine {
    store: Arc<dyn ProviderStore>,
}

impl QueryEngine {
    /// Create a new QueryEngine over the given store.
    pub fn new(store: Arc<dyn ProviderStore>) -> Self {
        Self { store }
    }

    /// Execute a query and return one materialized page.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderServiceError::Storage`] when the store fetch fails;
    /// the failure is propagated unchanged, with no retry and no partial
    /// results.
    pub async fn execute(
        &self,
        query: &ProviderQuery,
    ) -> Result<ProviderPage, ProviderServiceError> {
        let filter = query.store_filter();

        if query.requires_full_scan() {
            self.execute_full_scan(query, &filter).await
        } else {
            self.execute_windowed(query, &filter).await
        }
    }

    /// Full-scan mode: fetch the whole prefiltered set, filter in memory,
    /// slice last.
    async fn execute_full_scan(
        &self,
        query: &ProviderQuery,
        filter: &ProviderFilter,
    ) -> Result<ProviderPage, ProviderServiceError> {
        let candidates = self.store.list_providers(filter, None).await?;
        let fetched = candidates.len();

        let term = query.search_term().map(|s| s.to_lowercase());
        let filtered: Vec<Provider> = candidates
            .into_iter()
            .filter(|p| matches_attribute_filters(p, &query.attribute_filters))
            .filter(|p| match &term {
                Some(term) => matches_search(p, term),
                None => true,
            })
            .collect();

        let total = filtered.len() as u64;
        tracing::debug!(
            fetched,
            total,
            page = query.page,
            "query executed in full-scan mode"
        );

        Ok(ProviderPage {
            items: slice_page(filtered, query.page, query.limit),
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    /// Offset-limit mode: no in-memory stage narrows the set, so the window
    /// goes to the store and the exact total comes from a count.
    async fn execute_windowed(
        &self,
        query: &ProviderQuery,
        filter: &ProviderFilter,
    ) -> Result<ProviderPage, ProviderServiceError> {
        let total = self.store.count_providers(filter).await?;
        let items = match page_window(query.page, query.limit) {
            Some(window) => self.store.list_providers(filter, Some(window)).await?,
            None => Vec::new(),
        };

        tracing::debug!(
            total,
            returned = items.len(),
            page = query.page,
            "query executed in offset-limit mode"
        );

        Ok(ProviderPage {
            items,
            total,
            page: query.page,
            limit: query.limit,
        })
    }
}
