use anyhow::Result;
use rand::seq::SliceRandom;

/// Pool of browser User-Agent strings, one picked uniformly at random per
/// outbound request. A single-element pool makes header choice deterministic
/// for tests.
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    pub fn new(agents: Vec<String>) -> Result<Self> {
        if agents.is_empty() {
            anyhow::bail!("User-Agent pool must contain at least one entry");
        }
        Ok(Self { agents })
    }

    pub fn pick(&self) -> &str {
        // Pool is non-empty by construction
        self.agents
            .choose(&mut rand::thread_rng())
            .map(|s| s.as_str())
            .unwrap_or_default()
    }
}
