use crate::error::ScrapeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel used when an ad block has no title element
pub const DEFAULT_TITLE: &str = "Без названия";
/// Sentinel used when an ad block has no price element
pub const DEFAULT_PRICE: &str = "Цена не указана";

/// A validated (search phrase, region) pair. Construction is the only place
/// criteria are checked, so everything downstream can assume both parts are
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    phrase: String,
    region: String,
}

impl SearchCriteria {
    pub fn new(phrase: &str, region: &str) -> Result<Self, ScrapeError> {
        let phrase = phrase.trim();
        let region = region.trim();

        if phrase.is_empty() {
            return Err(ScrapeError::InvalidCriteria(
                "search phrase must not be empty".to_string(),
            ));
        }

        if region.is_empty() {
            return Err(ScrapeError::InvalidCriteria(
                "region must not be empty".to_string(),
            ));
        }

        Ok(Self {
            phrase: phrase.to_string(),
            region: region.to_string(),
        })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    pub title: String,
    pub price: String,
    pub url: String,
    /// Extension point for extra extracted fields; currently always empty
    pub additional_info: BTreeMap<String, String>,
}

impl Listing {
    /// A listing without an absolute URL cannot be opened by anyone
    /// downstream; callers should treat it as unusable rather than an error.
    pub fn has_usable_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Count and top listings extracted from a single fetch of the search page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchSnapshot {
    pub total_count: u64,
    pub listings: Vec<Listing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_accepts_normal_input() {
        let criteria = SearchCriteria::new("умные часы", "Москва").unwrap();
        assert_eq!(criteria.phrase(), "умные часы");
        assert_eq!(criteria.region(), "Москва");
    }

    #[test]
    fn test_criteria_trims_whitespace() {
        let criteria = SearchCriteria::new("  iphone 15  ", " sankt-peterburg ").unwrap();
        assert_eq!(criteria.phrase(), "iphone 15");
        assert_eq!(criteria.region(), "sankt-peterburg");
    }

    #[test]
    fn test_criteria_rejects_empty_phrase() {
        let err = SearchCriteria::new("", "Москва").unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidCriteria(_)));
    }

    #[test]
    fn test_criteria_rejects_blank_region() {
        let err = SearchCriteria::new("велосипед", "   ").unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidCriteria(_)));
    }

    #[test]
    fn test_listing_usable_url() {
        let listing = Listing {
            title: "Гараж".to_string(),
            price: "500 000 ₽".to_string(),
            url: String::new(),
            additional_info: BTreeMap::new(),
        };
        assert!(!listing.has_usable_url());
    }
}
