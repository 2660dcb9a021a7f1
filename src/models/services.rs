use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Aggregate figures for one service category, returned by
/// `GET /api/services?stats=true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStats {
    pub name: String,
    pub count: u64,
    pub average_price: f64,
    pub price_range: PriceRange,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicesQuery {
    pub stats: Option<String>,
}

impl ServicesQuery {
    /// Only the literal `stats=true` switches to statistics; anything else
    /// gets the plain name list.
    pub fn wants_stats(&self) -> bool {
        self.stats.as_deref() == Some("true")
    }
}
