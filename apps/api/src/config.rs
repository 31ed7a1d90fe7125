use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every knob has a default so the service starts with no .env at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Timeout for profile-page GETs (CodeChef, HackerRank).
    pub html_timeout_secs: u64,
    /// Timeout for GraphQL POSTs (LeetCode).
    pub graphql_timeout_secs: u64,
    /// Timeout budget for each browser navigation / capture step.
    pub browser_timeout_secs: u64,
    /// Explicit Chrome/Chromium binary for the profile-analysis session.
    /// When unset the launch ladder probes the known install locations.
    pub chrome_bin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "5001")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            html_timeout_secs: env_or("HTML_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("HTML_TIMEOUT_SECS must be a number of seconds")?,
            graphql_timeout_secs: env_or("GRAPHQL_TIMEOUT_SECS", "15")
                .parse::<u64>()
                .context("GRAPHQL_TIMEOUT_SECS must be a number of seconds")?,
            browser_timeout_secs: env_or("BROWSER_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("BROWSER_TIMEOUT_SECS must be a number of seconds")?,
            chrome_bin: std::env::var("CHROME_BIN").ok(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
