//! Consolidation of per-source results: brand filter, noise filter, price
//! sort, and the optional price band restriction.
//!
//! These are pure functions; the pipeline chains them and reports the count
//! after each stage on the progress channel.

use kainos_core::ProductRecord;

/// Pick the brand filter token for a query: the first configured brand that
/// appears in the query (case-insensitive), else the empty string, which
/// matches everything.
#[must_use]
pub fn brand_token<'a>(query: &str, brand_tokens: &'a [String]) -> &'a str {
    let query = query.to_lowercase();
    brand_tokens
        .iter()
        .find(|token| query.contains(token.as_str()))
        .map_or("", String::as_str)
}

/// Keep records whose description contains `token` (case-insensitive).
/// An empty token keeps everything.
#[must_use]
pub fn filter_by_brand(records: Vec<ProductRecord>, token: &str) -> Vec<ProductRecord> {
    if token.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| record.description.to_lowercase().contains(token))
        .collect()
}

/// Drop records whose description contains any noise token
/// (case-insensitive). The tokens mark systematic false positives from the
/// stores' search engines — wrong GPU tier, wrong RAM size, bare-OS
/// configurations. Placeholder records get no special treatment.
#[must_use]
pub fn drop_noise(records: Vec<ProductRecord>, noise_tokens: &[String]) -> Vec<ProductRecord> {
    records
        .into_iter()
        .filter(|record| {
            let description = record.description.to_lowercase();
            !noise_tokens
                .iter()
                .any(|token| description.contains(token.as_str()))
        })
        .collect()
}

/// Sort ascending by price. The sort is stable, so ties keep their
/// insertion order and "not found" placeholders (price 0) come first.
#[must_use]
pub fn sort_by_price(mut records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    records.sort_by(|a, b| a.price.total_cmp(&b.price));
    records
}

/// Restrict a sorted list to the `[min, max]` price band, both edges
/// inclusive: a record is kept unless its price is below `min` or above
/// `max`. Ordering is preserved.
#[must_use]
pub fn restrict_range(records: Vec<ProductRecord>, min: f64, max: f64) -> Vec<ProductRecord> {
    records
        .into_iter()
        .filter(|record| !(record.price < min || record.price > max))
        .collect()
}
