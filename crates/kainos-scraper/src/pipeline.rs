//! End-to-end search pipeline: visit the nine sources sequentially, contain
//! every failure at the source boundary, then consolidate, filter, and rank.

use kainos_core::{AppConfig, ProductRecord, SearchRequest};

use crate::aggregate;
use crate::error::ScrapeError;
use crate::fetch;
use crate::progress::ProgressSender;
use crate::render::RenderSession;
use crate::sources::{all_sources, FetchStrategy, SourceDescriptor};

/// Run one search across all nine sources and return the ranked list.
///
/// Sources are visited one at a time: the rendered-DOM strategy holds an
/// exclusive browser session per source, so there is no intra-request
/// parallelism. A failing source contributes zero records and the run
/// continues — the only empty final result is a genuinely empty or fully
/// filtered-out one, which is a valid outcome, not an error.
///
/// Exactly one search is expected to run at a time; the caller enforces
/// this by not submitting another request while one is in flight.
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] only when the shared HTTP client cannot be
/// constructed, before any source is visited. Per-source failures never
/// propagate.
pub async fn run_search(
    config: &AppConfig,
    request: &SearchRequest,
    progress: &ProgressSender,
) -> Result<Vec<ProductRecord>, ScrapeError> {
    let client = fetch::build_client(config.http_timeout_secs, &config.user_agent)?;

    let mut collected: Vec<ProductRecord> = Vec::new();
    for source in all_sources() {
        progress.emit(format!("Scraping {}...", source.name));
        let records = match scrape_source(&client, config, source, &request.query).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(source = source.name, error = %e, "source scrape failed");
                progress.emit(format!("{}: {e}", source.name));
                Vec::new()
            }
        };
        progress.emit(format!("    Items found: {}", records.len()));
        collected.extend(records);
    }

    progress.emit("Scraping finished. Creating list of products found...");
    Ok(consolidate(config, request, collected, progress))
}

/// Fetch one source's results page per its strategy and run its extractor.
///
/// A rendered-DOM session is scoped to this call: started here, closed on
/// every exit path before the fetch outcome is inspected. Teardown failures
/// are logged and swallowed so they can never mask the source outcome.
async fn scrape_source(
    client: &reqwest::Client,
    config: &AppConfig,
    source: &SourceDescriptor,
    query: &str,
) -> Result<Vec<ProductRecord>, ScrapeError> {
    let url = (source.search_url)(query);
    let html = match source.strategy {
        FetchStrategy::Static => fetch::fetch_html(client, &url).await?,
        FetchStrategy::Rendered {
            ready_selector,
            matches,
        } => {
            let session = RenderSession::start(&config.webdriver_url).await?;
            let outcome = session
                .fetch_fragments(&url, ready_selector, matches, config.render_wait_ms)
                .await;
            if let Err(e) = session.close().await {
                tracing::warn!(source = source.name, error = %e, "session teardown failed");
            }
            outcome?.join("\n")
        }
    };
    Ok((source.extract)(&html))
}

/// Concatenated per-source results → brand filter → noise filter → price
/// sort → optional range restriction, with a progress message per stage.
///
/// The brand and noise filters are applied only to a non-empty harvest,
/// matching the presentation the stores' users expect: an all-sources-failed
/// run reports its zero count without the filter stages.
fn consolidate(
    config: &AppConfig,
    request: &SearchRequest,
    collected: Vec<ProductRecord>,
    progress: &ProgressSender,
) -> Vec<ProductRecord> {
    progress.emit(format!("Total items found: {}", collected.len()));

    let filtered = if collected.is_empty() {
        collected
    } else {
        let token = aggregate::brand_token(&request.query, &config.brand_tokens);
        let after_brand = aggregate::filter_by_brand(collected, token);
        progress.emit(format!("Items after brand filter: {}", after_brand.len()));

        let after_noise = aggregate::drop_noise(after_brand, &config.noise_tokens);
        progress.emit(format!(
            "Items after known mistakes filter: {}",
            after_noise.len()
        ));
        after_noise
    };

    let mut ranked = aggregate::sort_by_price(filtered);

    if request.apply_range_filter {
        ranked = aggregate::restrict_range(ranked, config.price_band_min, config.price_band_max);
        progress.emit(format!("Items after price filter: {}", ranked.len()));
    }

    if ranked.is_empty() {
        progress.emit("No results matching the search and filters.");
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::progress_channel;

    fn test_config() -> AppConfig {
        AppConfig {
            http_timeout_secs: 5,
            user_agent: "kainos-test/0.1".to_string(),
            webdriver_url: "http://localhost:9515".to_string(),
            render_wait_ms: 100,
            price_band_min: 1800.0,
            price_band_max: 2400.0,
            brand_tokens: ["hp", "lenovo", "dell", "acer", "asus", "gigabyte", "msi", "razer"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            noise_tokens: ["rtx3050", "rtx3060", "16gb", "512 gb", "512ssd", "dos"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            log_level: "info".to_string(),
        }
    }

    fn record(description: &str, price: f64) -> ProductRecord {
        ProductRecord {
            description: description.to_string(),
            price,
            link: "https://example.com/p".to_string(),
        }
    }

    #[test]
    fn all_sources_empty_filters_down_to_no_results() {
        let config = test_config();
        let request = SearchRequest::free_text("dell 32 gb rtx 3070 ti", true).unwrap();
        let placeholders: Vec<ProductRecord> = all_sources()
            .iter()
            .map(|s| ProductRecord::not_found(s.name, s.homepage))
            .collect();

        let (tx, mut rx) = progress_channel();
        let result = consolidate(&config, &request, placeholders, &tx);

        assert!(result.is_empty());
        let messages = rx.drain();
        assert!(messages.iter().any(|m| m == "Total items found: 9"));
        assert!(messages.iter().any(|m| m.contains("No results")));
    }

    #[test]
    fn full_stage_chain_filters_sorts_and_restricts() {
        let config = test_config();
        let request = SearchRequest::free_text("hp i7 32 gb rtx 3070 ti", true).unwrap();
        let collected = vec![
            record("HP Omen 16 i7 RTX 3070 Ti 32GB", 2399.0),
            record("Lenovo Legion 5 Pro RTX 3070 Ti", 2000.0),
            record("HP Victus 16 RTX3060", 1900.0),
            record("HP Omen 16 i7 RTX 3070 Ti 1TB", 1999.0),
            record("HP Pavilion 15 RTX 3070 Ti", 2990.0),
        ];

        let (tx, mut rx) = progress_channel();
        let result = consolidate(&config, &request, collected, &tx);

        // Lenovo fails the brand filter, the RTX3060 unit is noise, the
        // 2990 € one falls outside the band; the rest come back sorted.
        let prices: Vec<f64> = result.iter().map(|r| r.price).collect();
        assert_eq!(prices, [1999.0, 2399.0]);

        let messages = rx.drain();
        assert!(messages.iter().any(|m| m == "Total items found: 5"));
        assert!(messages.iter().any(|m| m == "Items after brand filter: 4"));
        assert!(messages
            .iter()
            .any(|m| m == "Items after known mistakes filter: 3"));
        assert!(messages.iter().any(|m| m == "Items after price filter: 2"));
    }

    #[test]
    fn range_filter_off_keeps_placeholders_first() {
        let config = test_config();
        let request = SearchRequest::free_text("32 gb rtx 3070 ti", false).unwrap();
        let collected = vec![
            record("HP Omen 16 RTX 3070 Ti 32GB", 2399.0),
            ProductRecord::not_found("Skytech", "https://www.skytech.lt/"),
        ];

        let (tx, mut rx) = progress_channel();
        let result = consolidate(&config, &request, collected, &tx);

        assert_eq!(result.len(), 2);
        assert!(result[0].is_placeholder());
        // No price filter stage, no "no results" line.
        let messages = rx.drain();
        assert!(!messages.iter().any(|m| m.contains("price filter")));
        assert!(!messages.iter().any(|m| m.contains("No results")));
    }
}
