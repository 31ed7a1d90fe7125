//! One headless-browser session per profile-analysis request.
//!
//! Launch walks an ordered ladder of browser configurations until one
//! starts; if every rung fails the caller falls back to the minimal
//! profile. Whatever happens after launch, the session is closed exactly
//! once on every exit path.

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";

/// Chrome/Chromium install locations probed after a direct launch fails,
/// newest-preferred.
const KNOWN_EXECUTABLES: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
];

const SETTLE_WAIT: Duration = Duration::from_secs(3);
const SCROLL_WAIT: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("All browser launch strategies failed. Last error: {0}")]
    Init(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Browser operation timed out")]
    Timeout,

    #[error("Page capture failed: {0}")]
    Capture(String),
}

/// DOM snapshots taken as the page is scrolled through its lazy-loaded
/// sections. Extraction runs over these, not over the live page.
#[derive(Debug, Clone, Default)]
pub struct PageCapture {
    pub header: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
}

pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

fn base_builder() -> chromiumoxide::browser::BrowserConfigBuilder {
    BrowserConfig::builder()
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--disable-gpu")
        .window_size(1920, 1080)
        .arg(format!("--user-agent={BROWSER_USER_AGENT}"))
}

/// The launch ladder, in priority order. Each rung is a named configuration
/// factory; the first one whose browser actually starts wins.
fn launch_ladder(config: &Config) -> Vec<(String, Result<BrowserConfig, String>)> {
    let mut ladder = vec![("direct".to_string(), base_builder().build())];

    for path in KNOWN_EXECUTABLES {
        ladder.push((
            format!("pinned:{path}"),
            base_builder().chrome_executable(path).build(),
        ));
    }

    if let Some(path) = &config.chrome_bin {
        ladder.push((
            format!("configured:{path}"),
            base_builder().chrome_executable(path).build(),
        ));
    }

    // Bare-bones last resort: default discovery, no tuning flags.
    ladder.push(("fallback".to_string(), BrowserConfig::builder().build()));

    ladder
}

impl BrowserSession {
    /// Walks the launch ladder until a browser starts. An `Err` here means
    /// every strategy failed and the caller must use the minimal profile.
    pub async fn launch(config: &Config) -> Result<Self, SessionError> {
        let mut last_error = String::from("no launch strategy attempted");

        for (name, browser_config) in launch_ladder(config) {
            let browser_config = match browser_config {
                Ok(c) => c,
                Err(e) => {
                    debug!(strategy = %name, error = %e, "Browser config rejected");
                    last_error = e;
                    continue;
                }
            };

            match Browser::launch(browser_config).await {
                Ok((browser, mut handler)) => {
                    info!(strategy = %name, "Browser session started");
                    let handler = tokio::spawn(async move {
                        while handler.next().await.is_some() {}
                    });
                    return Ok(Self { browser, handler });
                }
                Err(e) => {
                    warn!(strategy = %name, error = %e, "Browser launch strategy failed");
                    last_error = e.to_string();
                }
            }
        }

        Err(SessionError::Init(last_error))
    }

    /// Opens the profile URL and captures the page section by section,
    /// scrolling between snapshots so lazy content has a chance to load.
    pub async fn capture_profile(
        &self,
        url: &str,
        config: &Config,
    ) -> Result<PageCapture, SessionError> {
        let timeout = Duration::from_secs(config.browser_timeout_secs);

        let page = tokio::time::timeout(timeout, self.browser.new_page(url))
            .await
            .map_err(|_| SessionError::Timeout)?
            .map_err(|e| SessionError::Navigation(e.to_string()))?;

        // Navigation completion is best-effort; some profiles never fire it.
        let _ = tokio::time::timeout(Duration::from_secs(10), page.wait_for_navigation()).await;
        tokio::time::sleep(SETTLE_WAIT).await;

        let mut capture = PageCapture {
            header: snapshot(&page, timeout).await?,
            ..Default::default()
        };

        capture.experience = scroll_and_snapshot(&page, 500, timeout).await?;
        capture.education = scroll_and_snapshot(&page, 300, timeout).await?;
        capture.skills = scroll_and_snapshot(&page, 300, timeout).await?;

        if let Err(e) = page.close().await {
            debug!(url, error = %e, "Page close error");
        }

        Ok(capture)
    }

    /// Tears the session down. Idempotence is by construction: `close`
    /// consumes the session, so a second close cannot be expressed.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "Browser close error");
        }
        self.handler.abort();
    }
}

async fn snapshot(page: &Page, timeout: Duration) -> Result<String, SessionError> {
    tokio::time::timeout(timeout, page.content())
        .await
        .map_err(|_| SessionError::Timeout)?
        .map_err(|e| SessionError::Capture(e.to_string()))
}

async fn scroll_and_snapshot(
    page: &Page,
    pixels: i64,
    timeout: Duration,
) -> Result<String, SessionError> {
    let _ = page
        .evaluate(format!("window.scrollBy(0, {pixels})"))
        .await;
    tokio::time::sleep(SCROLL_WAIT).await;
    snapshot(page, timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(chrome_bin: Option<&str>) -> Config {
        Config {
            port: 0,
            rust_log: "info".to_string(),
            html_timeout_secs: 30,
            graphql_timeout_secs: 15,
            browser_timeout_secs: 30,
            chrome_bin: chrome_bin.map(str::to_string),
        }
    }

    #[test]
    fn test_ladder_order_and_rungs() {
        let ladder = launch_ladder(&test_config(None));
        let names: Vec<_> = ladder.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names.first(), Some(&"direct"));
        assert_eq!(names.last(), Some(&"fallback"));
        assert_eq!(names.len(), 2 + KNOWN_EXECUTABLES.len());
        assert!(names[1].starts_with("pinned:"));
    }

    #[test]
    fn test_ladder_includes_configured_executable() {
        let ladder = launch_ladder(&test_config(Some("/opt/chrome/chrome")));
        assert!(ladder
            .iter()
            .any(|(n, _)| n == "configured:/opt/chrome/chrome"));
    }
}
