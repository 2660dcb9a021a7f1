pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod store;

pub use store::load_store;
