use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Engine configuration passed explicitly at construction. Two scraper
/// instances with different configs never interfere; nothing here is
/// process-global.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScraperConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Pool the per-request User-Agent is drawn from; must be non-empty
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Upper bound of the randomized pre-request delay; 0 disables pacing
    #[serde(default = "default_request_jitter_ms")]
    pub request_jitter_ms: u64,
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,
}

fn default_base_url() -> String {
    "https://www.avito.ru".to_string()
}

fn default_user_agents() -> Vec<String> {
    vec![
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.107 Safari/537.36".to_string(),
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Safari/605.1.15".to_string(),
    ]
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_request_jitter_ms() -> u64 {
    1000
}

fn default_top_limit() -> usize {
    5
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agents: default_user_agents(),
            timeout_secs: default_timeout_secs(),
            request_jitter_ms: default_request_jitter_ms(),
            top_limit: default_top_limit(),
        }
    }
}

impl ScraperConfig {
    /// Loads defaults and applies environment overrides where present.
    /// The host application owns process configuration; this only covers
    /// the engine's own knobs.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = env::var("AVITO_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(agents) = env::var("AVITO_USER_AGENTS") {
            // Comma-separated list
            config.user_agents = agents
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(timeout) = env::var("AVITO_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .parse()
                .context("Failed to parse AVITO_TIMEOUT_SECS environment variable")?;
        }

        if let Ok(jitter) = env::var("AVITO_REQUEST_JITTER_MS") {
            config.request_jitter_ms = jitter
                .parse()
                .context("Failed to parse AVITO_REQUEST_JITTER_MS environment variable")?;
        }

        if let Ok(limit) = env::var("AVITO_TOP_LIMIT") {
            config.top_limit = limit
                .parse()
                .context("Failed to parse AVITO_TOP_LIMIT environment variable")?;
        }

        if config.user_agents.is_empty() {
            anyhow::bail!("At least one user agent is required (AVITO_USER_AGENTS was empty)");
        }

        Ok(config)
    }
}
