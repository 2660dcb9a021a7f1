use serde::{Deserialize, Serialize};

use crate::models::workers::WorkerRecord;

/// Multiplier applied to every stored price (18% tax).
pub const TAX_MULTIPLIER: f64 = 1.18;

/// Sentinel selecting every service category.
pub const ALL_SERVICES: &str = "all";

/// Tax-inclusive price, rounded to the nearest whole unit.
pub fn display_price(price_per_day: f64) -> u64 {
    if !price_per_day.is_finite() || price_per_day <= 0.0 {
        return 0;
    }
    (price_per_day * TAX_MULTIPLIER).round() as u64
}

/// Coerce raw price input from a form field or query string. Anything that is
/// not a finite, non-negative number becomes 0.
pub fn parse_price_input(raw: &str) -> u64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.round() as u64,
        _ => 0,
    }
}

/// Service category selection: every category, or exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceFilter {
    #[default]
    All,
    Only(String),
}

impl ServiceFilter {
    pub fn matches(&self, service: &str) -> bool {
        match self {
            ServiceFilter::All => true,
            ServiceFilter::Only(selected) => selected == service,
        }
    }
}

impl From<&str> for ServiceFilter {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SERVICES) {
            ServiceFilter::All
        } else {
            ServiceFilter::Only(trimmed.to_string())
        }
    }
}

impl From<String> for ServiceFilter {
    fn from(value: String) -> Self {
        ServiceFilter::from(value.as_str())
    }
}

impl From<ServiceFilter> for String {
    fn from(value: ServiceFilter) -> Self {
        match value {
            ServiceFilter::All => ALL_SERVICES.to_string(),
            ServiceFilter::Only(service) => service,
        }
    }
}

/// Active filter criteria. Price bounds apply to the displayed price and
/// always satisfy `min_price <= max_price` when changed through the setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub service: ServiceFilter,
    pub min_price: u64,
    pub max_price: u64,
    pub search_query: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            service: ServiceFilter::All,
            min_price: 0,
            max_price: u64::MAX,
            search_query: String::new(),
        }
    }
}

impl FilterSpec {
    pub fn for_service(service: impl Into<ServiceFilter>) -> Self {
        Self {
            service: service.into(),
            ..Self::default()
        }
    }

    /// Set the lower bound, raising the upper bound if it would fall below.
    pub fn set_min_price(&mut self, min_price: u64) {
        self.min_price = min_price;
        if self.max_price < min_price {
            self.max_price = min_price;
        }
    }

    /// Set the upper bound, lowering the lower bound if it would exceed it.
    pub fn set_max_price(&mut self, max_price: u64) {
        self.max_price = max_price;
        if self.min_price > max_price {
            self.min_price = max_price;
        }
    }

    pub fn with_price_range(mut self, min_price: u64, max_price: u64) -> Self {
        self.set_max_price(max_price);
        self.set_min_price(min_price);
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// Full predicate, including the exclusion of placeholder records.
    pub fn matches(&self, record: &WorkerRecord) -> bool {
        if !record.is_listable() {
            return false;
        }
        if !self.service.matches(&record.service) {
            return false;
        }

        let price = record.display_price();
        if price < self.min_price || price > self.max_price {
            return false;
        }

        let query = self.search_query.trim();
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        record.name.to_lowercase().contains(&query) || record.service.to_lowercase().contains(&query)
    }
}

/// Keep the records matching `spec`, preserving their input order.
pub fn apply_filters(records: &[WorkerRecord], spec: &FilterSpec) -> Vec<WorkerRecord> {
    records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}
