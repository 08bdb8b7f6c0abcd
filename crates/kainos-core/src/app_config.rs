/// Runtime configuration for the scraping pipeline.
///
/// Every field comes from a `KAINOS_*` environment variable with a default;
/// see [`crate::config::load_app_config`]. The brand/noise token lists and
/// the price band are deliberately data rather than logic so deployments can
/// retune them without a rebuild.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Timeout for a single static-strategy HTTP GET.
    pub http_timeout_secs: u64,
    /// User-Agent header sent with static fetches.
    pub user_agent: String,
    /// WebDriver endpoint used by the rendered-DOM strategy
    /// (a locally running chromedriver by default).
    pub webdriver_url: String,
    /// Upper bound on waiting for a rendered page's ready selector.
    pub render_wait_ms: u64,
    /// Inclusive lower edge of the optional price band filter, in euros.
    pub price_band_min: f64,
    /// Inclusive upper edge of the optional price band filter, in euros.
    pub price_band_max: f64,
    /// Known brand tokens, scanned in order against the query; the first one
    /// found becomes the brand filter.
    pub brand_tokens: Vec<String>,
    /// Substrings that mark systematic false positives from the stores'
    /// search engines (wrong GPU tier, wrong RAM size, bare-OS configs).
    pub noise_tokens: Vec<String>,
    pub log_level: String,
}
