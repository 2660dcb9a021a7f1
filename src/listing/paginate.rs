use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::listing::filter::{FilterSpec, apply_filters};
use crate::models::workers::WorkerRecord;

/// A slice of a sorted result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The page actually served, after clamping.
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_count: u64,
}

/// Name ordering used by every listing, close to a browser's default
/// `localeCompare`: base letters first (accents and case ignored), then
/// unaccented before accented, then lowercase before uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Lowercased, with diacritics stripped: "Émile" becomes "emile".
fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Stable sort by name; equal names keep their insertion order.
pub fn sort_by_name(records: &mut [WorkerRecord]) {
    records.sort_by(|a, b| compare_names(&a.name, &b.name));
}

/// `max(1, ceil(count / page_size))`.
pub fn total_pages(count: u64, page_size: u64) -> u64 {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(page: u64, total_pages: u64) -> u64 {
    page.clamp(1, total_pages.max(1))
}

/// Coerce a raw page or page-size value. Non-numeric input yields
/// `fallback`; numbers below 1 become 1.
pub fn parse_page_input(raw: &str, fallback: u64) -> u64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => (value.round().max(1.0)) as u64,
        _ => fallback,
    }
}

/// Sort `records` by name and cut out the requested page. Out-of-range pages
/// are clamped rather than rejected.
pub fn sort_and_page(mut records: Vec<WorkerRecord>, page: u64, page_size: u64) -> Page<WorkerRecord> {
    let page_size = page_size.max(1);
    sort_by_name(&mut records);

    let total_count = records.len() as u64;
    let total_pages = total_pages(total_count, page_size);
    let page = clamp_page(page, total_pages);

    let start = ((page - 1) * page_size).min(total_count) as usize;
    let end = (page * page_size).min(total_count) as usize;

    Page {
        items: records.drain(start..end).collect(),
        page,
        page_size,
        total_pages,
        total_count,
    }
}

/// Filter, sort and paginate in one step.
pub fn derive_page(
    records: &[WorkerRecord],
    spec: &FilterSpec,
    page: u64,
    page_size: u64,
) -> Page<WorkerRecord> {
    sort_and_page(apply_filters(records, spec), page, page_size)
}

/// Page numbers for a pagination control: at most `width` consecutive pages,
/// centred on `current` and shifted to stay inside `[1, total]`.
pub fn page_window(current: u64, total: u64, width: u64) -> Vec<u64> {
    let total = total.max(1);
    let width = width.clamp(1, total);
    let current = clamp_page(current, total);

    let mut start = current.saturating_sub(width / 2).max(1);
    if start + width - 1 > total {
        start = total - width + 1;
    }
    (start..start + width).collect()
}
