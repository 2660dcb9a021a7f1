//! The listing core: filter, sort, paginate and the view-state controller
//! the presentation layer drives.

pub mod filter;
pub mod paginate;
pub mod services;
pub mod state;

pub use filter::{FilterSpec, ServiceFilter, apply_filters, display_price};
pub use paginate::{Page, derive_page, page_window, sort_and_page, total_pages};
pub use services::{list_services, service_stats};
pub use state::{FetchTicket, ListingState, ListingView};
