use serde::{Deserialize, Serialize};

use crate::listing::filter::{self, FilterSpec, ServiceFilter};
use crate::listing::paginate::parse_page_input;
use crate::models::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// A single listed service provider, as stored in the fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRecord {
    /// Placeholder rows in the fixture carry a null id.
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub service: String,
    /// Base price before tax.
    #[serde(default)]
    pub price_per_day: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl WorkerRecord {
    /// Tax-inclusive price shown to users and compared by price filters.
    pub fn display_price(&self) -> u64 {
        filter::display_price(self.price_per_day)
    }

    /// Records with a missing id or a non-positive price never appear in a listing.
    pub fn is_listable(&self) -> bool {
        self.id.is_some() && self.price_per_day > 0.0
    }
}

/// Query string accepted by `GET /api/workers`.
///
/// Numbers arrive as raw strings so that non-numeric or out-of-range input
/// can be coerced instead of rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub service: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub q: Option<String>,
}

impl WorkerListQuery {
    /// Whether the caller asked for a server-side filtered page rather than
    /// the raw fixture.
    pub fn has_listing_params(&self) -> bool {
        self.page.is_some()
            || self.page_size.is_some()
            || self.service.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.q.is_some()
    }

    pub fn filter_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec {
            service: self
                .service
                .as_deref()
                .map(ServiceFilter::from)
                .unwrap_or_default(),
            search_query: self.q.clone().unwrap_or_default(),
            ..FilterSpec::default()
        };
        if let Some(max) = self.max_price.as_deref() {
            spec.set_max_price(filter::parse_price_input(max));
        }
        if let Some(min) = self.min_price.as_deref() {
            spec.set_min_price(filter::parse_price_input(min));
        }
        spec
    }

    pub fn to_worker_query(&self) -> WorkerQuery {
        WorkerQuery {
            page: self
                .page
                .as_deref()
                .map_or(1, |raw| parse_page_input(raw, 1)),
            page_size: self
                .page_size
                .as_deref()
                .map_or(DEFAULT_PAGE_SIZE, |raw| parse_page_input(raw, DEFAULT_PAGE_SIZE))
                .min(MAX_PAGE_SIZE),
            filters: Some(self.filter_spec()),
        }
    }
}

/// A listing request as seen by the fetch/cache layer. Requests with the same
/// query string share a cache key (see [`crate::cache::keys::worker_list`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerQuery {
    pub page: u64,
    pub page_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterSpec>,
}

impl WorkerQuery {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page,
            page_size,
            filters: None,
        }
    }

    pub fn with_filters(mut self, filters: FilterSpec) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Query-string pairs for `GET /api/workers`. Unset or unbounded filter
    /// fields are left out.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];

        if let Some(filters) = &self.filters {
            if let ServiceFilter::Only(service) = &filters.service {
                pairs.push(("service", service.clone()));
            }
            if filters.min_price > 0 {
                pairs.push(("minPrice", filters.min_price.to_string()));
            }
            if filters.max_price != u64::MAX {
                pairs.push(("maxPrice", filters.max_price.to_string()));
            }
            let search = filters.search_query.trim();
            if !search.is_empty() {
                pairs.push(("q", search.to_string()));
            }
        }

        pairs
    }
}

/// One page of workers plus the size of the full filtered result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerPage {
    pub records: Vec<WorkerRecord>,
    pub total_count: u64,
}
