use crate::error::ScrapeOutcome;
use crate::models::{Listing, SearchCriteria, SearchSnapshot};
use async_trait::async_trait;

/// The seam the API layer consumes. Implementations never return errors:
/// every operation resolves to a [`ScrapeOutcome`] whose value is the
/// soft-fail default when scraping went wrong.
#[async_trait]
pub trait AdsScraper: Send + Sync {
    /// Returns the name of the scraper/target site
    fn name(&self) -> &str;

    /// Total number of ads matching the criteria; 0 on any failure
    async fn total_ads_count(&self, criteria: &SearchCriteria) -> ScrapeOutcome<u64>;

    /// First `limit` ads in document order; empty on any failure
    async fn top_listings(
        &self,
        criteria: &SearchCriteria,
        limit: usize,
    ) -> ScrapeOutcome<Vec<Listing>>;

    /// Count and top listings from a single fetch of the search page,
    /// halving outbound traffic when the caller wants both
    async fn search_snapshot(
        &self,
        criteria: &SearchCriteria,
        limit: usize,
    ) -> ScrapeOutcome<SearchSnapshot>;
}
