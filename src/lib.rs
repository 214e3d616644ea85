pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod normalization;
pub mod orchestrator;
pub mod tracing;

pub mod util {
    pub mod env;
}

pub use catalog::{list_cities, product_ids_for_city, product_info, City};
pub use client::DealsClient;
pub use config::DealsConfig;
pub use error::{DealsError, Result};
pub use normalization::deal::DealRecord;
pub use orchestrator::{deals, ScrapeOptions};
