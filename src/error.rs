use reqwest::StatusCode;
use thiserror::Error;

/// Failure kinds the engine can run into while scraping a search page.
///
/// None of these ever propagate out of the facade operations: every failure
/// collapses into the soft-fail default and is recorded on the
/// [`ScrapeOutcome`] so callers can still tell "no results" from "failed".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScrapeError {
    /// Search criteria rejected before any network call
    #[error("invalid search criteria: {0}")]
    InvalidCriteria(String),

    /// Connection failure, DNS failure or timeout
    #[error("network error while fetching search page: {0}")]
    Network(String),

    /// The search page answered with something other than 200
    #[error("search page request returned status {status}")]
    HttpStatus { status: StatusCode },

    /// Expected marker present but unparsable
    #[error("failed to parse search page: {0}")]
    Parse(String),
}

impl ScrapeError {
    /// Whether a retry with the same criteria could plausibly succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, ScrapeError::Network(_) | ScrapeError::HttpStatus { .. })
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(error: reqwest::Error) -> Self {
        ScrapeError::Network(error.to_string())
    }
}

/// Result of one facade operation: the value is always usable (the soft-fail
/// default when `error` is set), so callers that only want the classic
/// "zero/empty on failure" behavior can read `value` and ignore the rest.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome<T> {
    pub value: T,
    pub error: Option<ScrapeError>,
}

impl<T> ScrapeOutcome<T> {
    pub fn success(value: T) -> Self {
        Self { value, error: None }
    }

    pub fn failed(default: T, error: ScrapeError) -> Self {
        Self {
            value: default,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ScrapeError::Network("connection refused".to_string()).is_transient());
        assert!(ScrapeError::HttpStatus {
            status: StatusCode::SERVICE_UNAVAILABLE
        }
        .is_transient());
        assert!(!ScrapeError::InvalidCriteria("empty phrase".to_string()).is_transient());
        assert!(!ScrapeError::Parse("bad count".to_string()).is_transient());
    }

    #[test]
    fn test_outcome_success() {
        let outcome = ScrapeOutcome::success(42u64);
        assert!(outcome.is_success());
        assert_eq!(outcome.into_value(), 42);
    }

    #[test]
    fn test_outcome_failed_keeps_default() {
        let outcome = ScrapeOutcome::failed(
            0u64,
            ScrapeError::HttpStatus {
                status: StatusCode::FORBIDDEN,
            },
        );
        assert!(!outcome.is_success());
        assert_eq!(outcome.value, 0);
    }
}
