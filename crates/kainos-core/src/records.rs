use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The six canned searches offered by the presentation layer, in display order.
pub const PRESET_QUERIES: [&str; 6] = [
    "hp 32 gb rtx 3070 ti",
    "lenovo 32 gb rtx 3070 ti",
    "hp i7 32 gb rtx 3070 ti",
    "legion i7 32 gb rtx 3070 ti",
    "dell 32 gb rtx 3070 ti",
    "32 gb rtx 3070 ti",
];

/// Minimum character count for free-text queries. Presets bypass this check.
pub const MIN_QUERY_LEN: usize = 5;

/// A single product listing harvested from one store, normalized so results
/// from all sources can be merged, filtered, and ranked together.
///
/// Records are value objects: built once inside an extractor, never mutated
/// afterwards. Two visually identical products from two stores stay two
/// records — there is no cross-source dedup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Listing title as shown by the store, trimmed of markup noise.
    pub description: String,
    /// Price in euros. `0.0` marks a "not found" placeholder.
    pub price: f64,
    /// Absolute, browser-openable URL to the listing, or the store homepage
    /// for placeholders.
    pub link: String,
}

impl ProductRecord {
    /// Placeholder emitted when a store's results page is reachable but has
    /// no matches. The link points at the store homepage so the user can
    /// search manually.
    #[must_use]
    pub fn not_found(store: &str, homepage: &str) -> Self {
        Self {
            description: format!(
                "{store}: the products you were looking for were not found in this store"
            ),
            price: 0.0,
            link: homepage.to_string(),
        }
    }

    /// Returns `true` for "not found" placeholder records.
    #[must_use]
    #[allow(clippy::float_cmp)] // placeholders carry an exact 0.0
    pub fn is_placeholder(&self) -> bool {
        self.price == 0.0
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("query \"{0}\" is shorter than {n} characters", n = MIN_QUERY_LEN)]
    QueryTooShort(String),
    #[error("preset index {0} out of range (1..={n})", n = PRESET_QUERIES.len())]
    UnknownPreset(usize),
}

/// One search submitted by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// When set, the final sorted list is restricted to the configured
    /// price band.
    pub apply_range_filter: bool,
}

impl SearchRequest {
    /// Build a request from user-entered free text.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::QueryTooShort`] for queries under
    /// [`MIN_QUERY_LEN`] characters — the pipeline is never invoked for those.
    pub fn free_text(
        query: impl Into<String>,
        apply_range_filter: bool,
    ) -> Result<Self, RequestError> {
        let query = query.into();
        if query.chars().count() < MIN_QUERY_LEN {
            return Err(RequestError::QueryTooShort(query));
        }
        Ok(Self {
            query,
            apply_range_filter,
        })
    }

    /// Build a request from one of the [`PRESET_QUERIES`] (1-based index,
    /// matching the order they are listed in). Presets skip the length check.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::UnknownPreset`] when `index` is not in
    /// `1..=6`.
    pub fn preset(index: usize, apply_range_filter: bool) -> Result<Self, RequestError> {
        let query = index
            .checked_sub(1)
            .and_then(|i| PRESET_QUERIES.get(i))
            .ok_or(RequestError::UnknownPreset(index))?;
        Ok(Self {
            query: (*query).to_string(),
            apply_range_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_accepts_five_characters() {
        let req = SearchRequest::free_text("hp i7", true).unwrap();
        assert_eq!(req.query, "hp i7");
        assert!(req.apply_range_filter);
    }

    #[test]
    fn free_text_rejects_four_characters() {
        let err = SearchRequest::free_text("hp i", true).unwrap_err();
        assert!(matches!(err, RequestError::QueryTooShort(q) if q == "hp i"));
    }

    #[test]
    fn free_text_counts_characters_not_bytes() {
        // Five characters, more than five bytes.
        assert!(SearchRequest::free_text("kaukė", false).is_ok());
    }

    #[test]
    fn preset_bypasses_length_check() {
        for index in 1..=PRESET_QUERIES.len() {
            let req = SearchRequest::preset(index, false).unwrap();
            assert_eq!(req.query, PRESET_QUERIES[index - 1]);
        }
    }

    #[test]
    fn preset_zero_is_rejected() {
        assert!(matches!(
            SearchRequest::preset(0, true),
            Err(RequestError::UnknownPreset(0))
        ));
    }

    #[test]
    fn preset_seven_is_rejected() {
        assert!(matches!(
            SearchRequest::preset(7, true),
            Err(RequestError::UnknownPreset(7))
        ));
    }

    #[test]
    fn not_found_placeholder_shape() {
        let record = ProductRecord::not_found("HP Store", "https://www.hpstore.lt/");
        assert!(record.is_placeholder());
        assert!(record.description.starts_with("HP Store:"));
        assert_eq!(record.link, "https://www.hpstore.lt/");
    }

    #[test]
    fn priced_record_is_not_placeholder() {
        let record = ProductRecord {
            description: "HP Omen 16".to_string(),
            price: 1999.0,
            link: "https://example.com/omen".to_string(),
        };
        assert!(!record.is_placeholder());
    }

    #[test]
    fn record_serializes_round_trip() {
        let record = ProductRecord {
            description: "Lenovo Legion 5 Pro".to_string(),
            price: 2149.99,
            link: "https://example.com/legion".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ProductRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
