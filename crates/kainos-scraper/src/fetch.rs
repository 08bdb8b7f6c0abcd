//! Static-strategy fetching: one HTTP GET, no script execution.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScrapeError;

/// Build the HTTP client shared by all static-strategy fetches in one
/// pipeline run: bounded timeout, realistic browser `User-Agent`.
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client` cannot
/// be constructed (e.g., invalid TLS config).
pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ScrapeError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Fetch the HTML body of `url` with a single GET.
///
/// # Errors
///
/// - [`ScrapeError::UnexpectedStatus`] — reachable server, non-2xx response.
/// - [`ScrapeError::Http`] — timeout, DNS failure, or other transport error.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.text().await?)
}
