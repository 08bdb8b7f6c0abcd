//! Rendered-DOM fetching: a scoped headless-browser session per source.
//!
//! Some stores assemble their result grids with page scripts, so a plain GET
//! returns an empty shell. For those the fetcher drives a WebDriver session,
//! waits for the source's ready selector, and hands the matched container
//! markup back as plain HTML — which keeps the extractors pure functions
//! that can be tested against fixture pages.

use std::time::Duration;

use thirtyfour::prelude::*;

use crate::error::ScrapeError;

/// Re-poll interval while waiting for a rendered page to settle.
const POLL_INTERVAL_MS: u64 = 250;

/// How much of a failing URL to keep in progress messages.
const URL_LOG_LEN: usize = 45;

/// Whether a rendered source needs the first matching container or every
/// matching container (some stores split one results page across several
/// DOM grids).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    First,
    All,
}

/// One exclusive headless-browser session, scoped to a single source run.
///
/// The orchestrator owns the lifecycle: start before the source's fetch,
/// [`RenderSession::close`] on every exit path afterwards — including
/// extraction failure. A leaked session is a correctness bug.
pub struct RenderSession {
    driver: WebDriver,
}

impl RenderSession {
    /// Start a headless Chrome session against `webdriver_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::WebDriver`] when the session cannot be created
    /// (endpoint down, browser missing).
    pub async fn start(webdriver_url: &str) -> Result<Self, ScrapeError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.set_headless()?;
        caps.add_arg("--window-size=1920,1080")?;
        let driver = WebDriver::new(webdriver_url, caps).await?;
        Ok(Self { driver })
    }

    /// Navigate to `url`, wait (bounded by `wait_ms`) for `ready_selector`
    /// to appear, and return the outer HTML of the matched container(s).
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::RenderWait`] — the selector never appeared in time;
    ///   the URL carried in the error is truncated for log brevity.
    /// - [`ScrapeError::WebDriver`] — navigation or DOM access failed.
    pub async fn fetch_fragments(
        &self,
        url: &str,
        ready_selector: &str,
        matches: MatchMode,
        wait_ms: u64,
    ) -> Result<Vec<String>, ScrapeError> {
        self.driver.goto(url).await?;

        let deadline = tokio::time::Instant::now() + Duration::from_millis(wait_ms);
        let elements = loop {
            let found = self.driver.find_all(By::Css(ready_selector)).await?;
            if !found.is_empty() {
                break found;
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(ScrapeError::RenderWait {
                    selector: ready_selector.to_string(),
                    url: truncate_url(url),
                });
            }
            tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        };

        let take = match matches {
            MatchMode::First => 1,
            MatchMode::All => elements.len(),
        };
        let mut fragments = Vec::with_capacity(take);
        for element in elements.iter().take(take) {
            fragments.push(element.outer_html().await?);
        }
        Ok(fragments)
    }

    /// Tear the browser session down.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::WebDriver`] when the quit command fails; the
    /// orchestrator logs and swallows this so a teardown failure can never
    /// mask the source outcome.
    pub async fn close(self) -> Result<(), ScrapeError> {
        self.driver.quit().await?;
        Ok(())
    }
}

fn truncate_url(url: &str) -> String {
    match url.char_indices().nth(URL_LOG_LEN) {
        Some((idx, _)) => format!("{}...", &url[..idx]),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_urls_pass_through_untruncated() {
        assert_eq!(truncate_url("https://www.rde.lt/"), "https://www.rde.lt/");
    }

    #[test]
    fn long_urls_are_truncated_with_ellipsis() {
        let url = format!("https://www.senukai.lt/paieska/?q={}", "x".repeat(100));
        let truncated = truncate_url(&url);
        assert_eq!(truncated.len(), URL_LOG_LEN + 3);
        assert!(truncated.ends_with("..."));
        assert!(url.starts_with(truncated.trim_end_matches("...")));
    }
}
