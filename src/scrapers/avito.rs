use crate::config::ScraperConfig;
use crate::error::{ScrapeError, ScrapeOutcome};
use crate::headers::UserAgentPool;
use crate::http_client;
use crate::models::{Listing, SearchCriteria, SearchSnapshot, DEFAULT_PRICE, DEFAULT_TITLE};
use crate::scraper_trait::AdsScraper;
use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use reqwest::{header, StatusCode};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::time::Duration;

const COUNT_MARKER: &str = r#"[data-marker="page-title/count"]"#;
const ITEM_MARKER: &str = r#"[data-marker="item"]"#;
const TITLE_MARKER: &str = r#"[itemprop="name"]"#;
const PRICE_MARKER: &str = r#"[itemprop="price"]"#;
const URL_MARKER: &str = r#"a[itemprop="url"]"#;

pub struct AvitoScraper {
    client: reqwest::Client,
    config: ScraperConfig,
    user_agents: UserAgentPool,
}

impl AvitoScraper {
    pub fn new() -> Result<Self> {
        Self::with_config(ScraperConfig::default())
    }

    pub fn with_config(config: ScraperConfig) -> Result<Self> {
        let user_agents = UserAgentPool::new(config.user_agents.clone())?;
        let client = http_client::create_http_client(Duration::from_secs(config.timeout_secs))?;

        Ok(Self {
            client,
            config,
            user_agents,
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Top listings with the configured default limit
    pub async fn top_listings_default(
        &self,
        criteria: &SearchCriteria,
    ) -> ScrapeOutcome<Vec<Listing>> {
        self.top_listings(criteria, self.config.top_limit).await
    }

    /// Search snapshot with the configured default limit
    pub async fn search_snapshot_default(
        &self,
        criteria: &SearchCriteria,
    ) -> ScrapeOutcome<SearchSnapshot> {
        self.search_snapshot(criteria, self.config.top_limit).await
    }

    /// Builds `{base}/{encoded_region}?q={encoded_phrase}`. Phrase and region
    /// are encoded independently so spaces, slashes and Cyrillic never leak
    /// into path or query structure.
    fn build_search_url(&self, criteria: &SearchCriteria) -> String {
        format!(
            "{}/{}?q={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(criteria.region()),
            urlencoding::encode(criteria.phrase())
        )
    }

    /// Convert a relative ad URL to an absolute one
    fn build_full_url(&self, relative_url: &str) -> String {
        if relative_url.starts_with("http") {
            relative_url.to_string()
        } else if !relative_url.is_empty() {
            format!(
                "{}{}",
                self.config.base_url.trim_end_matches('/'),
                relative_url
            )
        } else {
            String::new()
        }
    }

    /// Fetches one search page. Strictly status 200 counts as success; any
    /// other status or transport error becomes a `ScrapeError` for the
    /// facade to fold into its default.
    async fn fetch_search_page(&self, url: &str) -> Result<String, ScrapeError> {
        // Randomized pacing so bursts of operations don't hammer the site
        if self.config.request_jitter_ms > 0 {
            let delay = rand::thread_rng().gen_range(0..=self.config.request_jitter_ms);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, self.user_agents.pick())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Search page request returned status {}", status);
            return Err(ScrapeError::HttpStatus { status });
        }

        let body = response.text().await?;
        tracing::debug!("Fetched search page: {} bytes", body.len());
        Ok(body)
    }

    /// Extracts the total-match count from the page title marker. A missing
    /// marker means no results, not a failure; a marker with unparsable text
    /// is reported so the caller can tell "zero ads" from "count unknown".
    fn extract_count(document: &Html) -> Result<u64, ScrapeError> {
        let Ok(selector) = Selector::parse(COUNT_MARKER) else {
            return Ok(0);
        };

        let Some(element) = document.select(&selector).next() else {
            tracing::debug!("No count marker found on search page");
            return Ok(0);
        };

        let raw: String = element.text().collect();
        // Thousands are separated by regular or non-breaking spaces
        let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

        digits.parse::<u64>().map_err(|_| {
            tracing::warn!("Failed to parse ads count from marker text '{}'", raw.trim());
            ScrapeError::Parse(format!("count marker text '{}' is not a number", raw.trim()))
        })
    }

    /// Extracts the first `limit` ad blocks in document order. Document
    /// order is the site's relevance order, so no re-sorting happens here.
    fn extract_listings(&self, document: &Html, limit: usize) -> Vec<Listing> {
        let Ok(item_selector) = Selector::parse(ITEM_MARKER) else {
            return Vec::new();
        };

        document
            .select(&item_selector)
            .take(limit)
            .map(|element| self.extract_listing(&element))
            .collect()
    }

    /// Builds one Listing from an ad block. Missing fragments get sentinel
    /// values; a block never aborts extraction of its siblings.
    fn extract_listing(&self, element: &ElementRef) -> Listing {
        let title = Self::select_text(element, TITLE_MARKER)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let price = Self::select_text(element, PRICE_MARKER)
            .unwrap_or_else(|| DEFAULT_PRICE.to_string());
        let url = Self::select_href(element, URL_MARKER)
            .map(|href| self.build_full_url(&href))
            .unwrap_or_default();

        Listing {
            title,
            price,
            url,
            additional_info: BTreeMap::new(),
        }
    }

    /// Trimmed text of the first sub-element matching the selector
    fn select_text(element: &ElementRef, selector_str: &str) -> Option<String> {
        Selector::parse(selector_str)
            .ok()
            .and_then(|selector| element.select(&selector).next())
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    /// `href` attribute of the first sub-element matching the selector
    fn select_href(element: &ElementRef, selector_str: &str) -> Option<String> {
        Selector::parse(selector_str)
            .ok()
            .and_then(|selector| element.select(&selector).next())
            .and_then(|el| el.value().attr("href"))
            .map(|href| href.to_string())
    }
}

#[async_trait]
impl AdsScraper for AvitoScraper {
    fn name(&self) -> &str {
        "Avito"
    }

    async fn total_ads_count(&self, criteria: &SearchCriteria) -> ScrapeOutcome<u64> {
        let url = self.build_search_url(criteria);
        tracing::debug!("Fetching ads count from {}", url);

        match self.fetch_search_page(&url).await {
            Ok(html) => {
                let document = Html::parse_document(&html);
                match Self::extract_count(&document) {
                    Ok(count) => ScrapeOutcome::success(count),
                    Err(e) => ScrapeOutcome::failed(0, e),
                }
            }
            Err(e) => {
                tracing::warn!("Failed to fetch ads count for '{}': {}", criteria.phrase(), e);
                ScrapeOutcome::failed(0, e)
            }
        }
    }

    async fn top_listings(
        &self,
        criteria: &SearchCriteria,
        limit: usize,
    ) -> ScrapeOutcome<Vec<Listing>> {
        let url = self.build_search_url(criteria);
        tracing::debug!("Fetching top {} listings from {}", limit, url);

        match self.fetch_search_page(&url).await {
            Ok(html) => {
                let document = Html::parse_document(&html);
                let listings = self.extract_listings(&document, limit);
                tracing::debug!(
                    "Extracted {} listings for '{}'",
                    listings.len(),
                    criteria.phrase()
                );
                ScrapeOutcome::success(listings)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch top listings for '{}': {}",
                    criteria.phrase(),
                    e
                );
                ScrapeOutcome::failed(Vec::new(), e)
            }
        }
    }

    async fn search_snapshot(
        &self,
        criteria: &SearchCriteria,
        limit: usize,
    ) -> ScrapeOutcome<SearchSnapshot> {
        let url = self.build_search_url(criteria);
        tracing::debug!("Fetching search snapshot from {}", url);

        match self.fetch_search_page(&url).await {
            Ok(html) => {
                let document = Html::parse_document(&html);
                let listings = self.extract_listings(&document, limit);
                match Self::extract_count(&document) {
                    Ok(total_count) => ScrapeOutcome::success(SearchSnapshot {
                        total_count,
                        listings,
                    }),
                    // Listings survive a broken count marker; only the
                    // count degrades to its default
                    Err(e) => ScrapeOutcome::failed(
                        SearchSnapshot {
                            total_count: 0,
                            listings,
                        },
                        e,
                    ),
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch search snapshot for '{}': {}",
                    criteria.phrase(),
                    e
                );
                ScrapeOutcome::failed(
                    SearchSnapshot {
                        total_count: 0,
                        listings: Vec::new(),
                    },
                    e,
                )
            }
        }
    }
}
