use tracing::debug;

use crate::client::WorkersResult;
use crate::listing::filter::{FilterSpec, ServiceFilter, parse_price_input};
use crate::listing::paginate::{clamp_page, total_pages};
use crate::models::workers::{WorkerPage, WorkerQuery, WorkerRecord};

/// Shown instead of the grid when a fetch succeeds with nothing to list.
pub const NO_WORKERS_MESSAGE: &str = "No workers found";

/// Handed out by [`ListingState::begin_fetch`]; a result is only committed if
/// its ticket still describes the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    query: WorkerQuery,
}

impl FetchTicket {
    pub fn query(&self) -> &WorkerQuery {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the presentation layer should render.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingView {
    /// Nothing requested yet.
    Idle,
    Loading,
    Failed { message: String },
    Empty { message: &'static str },
    Ready {
        items: Vec<WorkerRecord>,
        page: u64,
        total_pages: u64,
        total_count: u64,
    },
}

#[derive(Debug, Clone)]
enum FetchStatus {
    Idle,
    Loading,
    Failed(String),
    /// `filters` is the spec the page was fetched for.
    Loaded { page: WorkerPage, filters: FilterSpec },
}

/// Filter and page state for one listing view.
///
/// Every mutation bumps a generation counter, so a fetch that resolves after
/// the user has moved on is dropped instead of overwriting newer state.
#[derive(Debug, Clone)]
pub struct ListingState {
    filters: FilterSpec,
    page: u64,
    page_size: u64,
    generation: u64,
    status: FetchStatus,
}

impl ListingState {
    pub fn new(page_size: u64) -> Self {
        Self {
            filters: FilterSpec::default(),
            page: 1,
            page_size: page_size.max(1),
            generation: 0,
            status: FetchStatus::Idle,
        }
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Page count of the last successful fetch, 1 before any data arrives.
    pub fn total_pages(&self) -> u64 {
        match &self.status {
            FetchStatus::Loaded { page, .. } => total_pages(page.total_count, self.page_size),
            _ => 1,
        }
    }

    pub fn current_query(&self) -> WorkerQuery {
        WorkerQuery::new(self.page, self.page_size).with_filters(self.filters.clone())
    }

    pub fn set_service(&mut self, service: impl Into<ServiceFilter>) {
        let service = service.into();
        if self.filters.service != service {
            self.filters.service = service;
            self.filters_changed();
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.filters.search_query != query {
            self.filters.search_query = query;
            self.filters_changed();
        }
    }

    pub fn set_min_price(&mut self, min_price: u64) {
        let before = self.filters.clone();
        self.filters.set_min_price(min_price);
        if self.filters != before {
            self.filters_changed();
        }
    }

    pub fn set_max_price(&mut self, max_price: u64) {
        let before = self.filters.clone();
        self.filters.set_max_price(max_price);
        if self.filters != before {
            self.filters_changed();
        }
    }

    /// Raw text from the minimum price field; non-numeric input counts as 0.
    pub fn set_min_price_input(&mut self, raw: &str) {
        self.set_min_price(parse_price_input(raw));
    }

    /// Raw text from the maximum price field; non-numeric input counts as 0.
    pub fn set_max_price_input(&mut self, raw: &str) {
        self.set_max_price(parse_price_input(raw));
    }

    pub fn clear_filters(&mut self) {
        if self.filters != FilterSpec::default() {
            self.filters = FilterSpec::default();
            self.filters_changed();
        }
    }

    /// Move to `page`, clamped against the last known page count. Once the
    /// filters have moved on from the loaded data that count is meaningless,
    /// so only the lower bound applies until the next fetch lands.
    pub fn set_page(&mut self, page: u64) {
        let page = match &self.status {
            FetchStatus::Loaded { filters, .. } if *filters == self.filters => {
                clamp_page(page, self.total_pages())
            }
            _ => page.max(1),
        };
        if self.page != page {
            self.page = page;
            self.generation += 1;
        }
    }

    /// Mark the view as loading and describe the request to issue.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.status = FetchStatus::Loading;
        FetchTicket {
            generation: self.generation,
            query: self.current_query(),
        }
    }

    /// Commit a fetch result. Returns `false` when the ticket is stale and
    /// the result was discarded.
    pub fn complete(&mut self, ticket: &FetchTicket, result: WorkersResult) -> bool {
        if ticket.generation != self.generation || ticket.query != self.current_query() {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale listing result"
            );
            return false;
        }

        self.status = match result.error {
            Some(message) => FetchStatus::Failed(message),
            None => FetchStatus::Loaded {
                page: WorkerPage {
                    records: result.records,
                    total_count: result.total_count,
                },
                filters: self.filters.clone(),
            },
        };
        true
    }

    pub fn view(&self) -> ListingView {
        match &self.status {
            FetchStatus::Idle => ListingView::Idle,
            FetchStatus::Loading => ListingView::Loading,
            FetchStatus::Failed(message) => ListingView::Failed {
                message: message.clone(),
            },
            FetchStatus::Loaded { page, .. } if page.records.is_empty() => ListingView::Empty {
                message: NO_WORKERS_MESSAGE,
            },
            FetchStatus::Loaded { page: loaded, .. } => {
                let total_pages = self.total_pages();
                ListingView::Ready {
                    items: loaded.records.clone(),
                    page: clamp_page(self.page, total_pages),
                    total_pages,
                    total_count: loaded.total_count,
                }
            }
        }
    }

    fn filters_changed(&mut self) {
        self.page = 1;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(count: u64) -> WorkersResult {
        WorkersResult {
            records: vec![WorkerRecord {
                id: Some(1),
                name: "Amy".to_string(),
                service: "Mason".to_string(),
                price_per_day: 200.0,
                image: String::new(),
                rating: None,
                available: None,
            }],
            total_count: count,
            error: None,
        }
    }

    #[test]
    fn filter_change_resets_page() {
        let mut state = ListingState::new(12);
        state.set_service("Plumber");
        state.set_page(3);
        assert_eq!(state.page(), 3);

        state.set_service("Electrician");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn unchanged_filter_keeps_page() {
        let mut state = ListingState::new(12);
        state.set_service("Plumber");
        state.set_page(2);
        state.set_service("Plumber");
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut state = ListingState::new(12);
        let first = state.begin_fetch();

        state.set_search_query("ravi");
        let second = state.begin_fetch();

        assert!(!state.complete(&first, loaded(30)));
        assert_eq!(state.view(), ListingView::Loading);

        assert!(state.complete(&second, loaded(30)));
        assert!(matches!(state.view(), ListingView::Ready { total_pages: 3, .. }));
    }

    #[test]
    fn page_clamps_once_loaded() {
        let mut state = ListingState::new(12);
        let ticket = state.begin_fetch();
        state.complete(&ticket, loaded(25));

        state.set_page(9);
        assert_eq!(state.page(), 3);
        state.set_page(0);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn page_is_not_clamped_against_previous_filters() {
        let mut state = ListingState::new(12);
        let ticket = state.begin_fetch();
        state.complete(&ticket, loaded(25));

        // Three pages for the old filters; the new ones have not been fetched.
        state.set_service("Plumber");
        state.set_page(5);
        assert_eq!(state.page(), 5);

        let ticket = state.begin_fetch();
        state.complete(&ticket, loaded(25));
        state.set_page(5);
        assert_eq!(state.page(), 3);
    }

    #[test]
    fn non_numeric_price_input_becomes_zero() {
        let mut state = ListingState::new(9);
        state.set_min_price(200);
        state.set_min_price_input("cheap");
        assert_eq!(state.filters().min_price, 0);
    }
}
