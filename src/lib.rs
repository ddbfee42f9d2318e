//! Scraping engine for monitoring Avito classified-ad search results.
//!
//! Given a (search phrase, region) pair the engine fetches the search page
//! with browser-like headers and extracts the total-match count and the top-N
//! listings. It never persists anything and never raises out of its facade
//! operations: failures collapse into zero/empty defaults, with the cause
//! recorded on the returned [`ScrapeOutcome`].

mod config;
mod error;
mod headers;
mod http_client;
mod models;
mod scraper_trait;
mod scrapers;

pub use config::ScraperConfig;
pub use error::{ScrapeError, ScrapeOutcome};
pub use headers::UserAgentPool;
pub use models::{Listing, SearchCriteria, SearchSnapshot, DEFAULT_PRICE, DEFAULT_TITLE};
pub use scraper_trait::AdsScraper;
pub use scrapers::AvitoScraper;
