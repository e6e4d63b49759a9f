use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Client configuration loaded from environment variables (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the persisted session. In-memory storage when unset.
    pub storage_dir: Option<PathBuf>,
    pub mock_latency_ms: u64,
    pub demo_email: String,
    pub demo_password: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            storage_dir: lookup("STORAGE_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            mock_latency_ms: lookup("MOCK_LATENCY_MS")
                .unwrap_or_else(|| "1000".to_string())
                .parse::<u64>()
                .context("MOCK_LATENCY_MS must be a whole number of milliseconds")?,
            demo_email: lookup("DEMO_EMAIL").unwrap_or_else(|| "demo@example.com".to_string()),
            demo_password: lookup("DEMO_PASSWORD").unwrap_or_else(|| "password".to_string()),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}
