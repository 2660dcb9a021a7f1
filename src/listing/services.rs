use std::collections::BTreeMap;

use crate::listing::paginate::compare_names;
use crate::models::services::{PriceRange, ServiceStats};
use crate::models::workers::WorkerRecord;

/// Every distinct service name in `records`, sorted. Current filters play no
/// part, so the service dropdown always offers every category.
pub fn list_services(records: &[WorkerRecord]) -> Vec<String> {
    let mut services: Vec<String> = records
        .iter()
        .map(|record| record.service.trim())
        .filter(|service| !service.is_empty())
        .map(str::to_string)
        .collect();
    services.sort_by(|a, b| compare_names(a, b));
    services.dedup();
    services
}

/// Per-service count and stored-price figures over listable records.
pub fn service_stats(records: &[WorkerRecord]) -> Vec<ServiceStats> {
    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records.iter().filter(|record| record.is_listable()) {
        grouped
            .entry(record.service.trim())
            .or_default()
            .push(record.price_per_day);
    }

    let mut stats: Vec<ServiceStats> = grouped
        .into_iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, prices)| {
            let count = prices.len() as u64;
            let sum: f64 = prices.iter().sum();
            let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
            let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            ServiceStats {
                name: name.to_string(),
                count,
                average_price: round_cents(sum / count as f64),
                price_range: PriceRange { min, max },
            }
        })
        .collect();

    stats.sort_by(|a, b| compare_names(&a.name, &b.name));
    stats
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(id: Option<i64>, service: &str, price: f64) -> WorkerRecord {
        WorkerRecord {
            id,
            name: format!("Worker {service}"),
            service: service.to_string(),
            price_per_day: price,
            image: String::new(),
            rating: None,
            available: None,
        }
    }

    #[test]
    fn services_are_sorted_and_unique() {
        let records = vec![
            worker(Some(1), "Welder", 100.0),
            worker(Some(2), "carpenter", 100.0),
            worker(Some(3), "Welder", 200.0),
            worker(Some(4), "Electrician", 0.0),
        ];
        assert_eq!(
            list_services(&records),
            vec!["carpenter", "Electrician", "Welder"]
        );
    }

    #[test]
    fn stats_skip_placeholder_records() {
        let records = vec![
            worker(Some(1), "Welder", 100.0),
            worker(Some(2), "Welder", 250.0),
            worker(None, "Welder", 900.0),
            worker(Some(4), "Painter", 0.0),
            worker(Some(5), "Painter", 333.0),
        ];
        let stats = service_stats(&records);
        assert_eq!(stats.len(), 2);

        assert_eq!(stats[0].name, "Painter");
        assert_eq!(stats[0].count, 1);

        assert_eq!(stats[1].name, "Welder");
        assert_eq!(stats[1].count, 2);
        assert_eq!(stats[1].average_price, 175.0);
        assert_eq!(stats[1].price_range, PriceRange { min: 100.0, max: 250.0 });
    }
}
