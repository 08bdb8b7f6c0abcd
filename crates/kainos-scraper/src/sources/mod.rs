//! The nine store sources.
//!
//! Each submodule owns one store's peculiarities: its search URL and query
//! escaping rule, fetch strategy, "no results" signal, and item extraction
//! rules. They share the [`SourceDescriptor`] contract but no
//! implementation — the stores' markups have nothing in common.

mod hpstore;
mod kilobaitas;
mod nesiojami;
mod one_a;
mod pigu;
mod rde;
mod senukai;
mod skytech;
mod varle;

use kainos_core::ProductRecord;

use crate::render::MatchMode;

/// How a source's search results page is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// One HTTP GET, no script execution.
    Static,
    /// Headless-browser session: wait for `ready_selector`, then hand the
    /// matched container markup to the extractor.
    Rendered {
        ready_selector: &'static str,
        matches: MatchMode,
    },
}

/// Static description of one store: where to search, how to fetch, and how
/// to extract.
///
/// `extract` is a pure function over page markup, so every source is
/// independently testable against fixture pages. Its contract: at least one
/// record for a successfully fetched page — real hits, or exactly one
/// "not found" placeholder when the source-specific no-results signal fires.
pub struct SourceDescriptor {
    pub name: &'static str,
    pub homepage: &'static str,
    pub strategy: FetchStrategy,
    pub search_url: fn(&str) -> String,
    pub extract: fn(&str) -> Vec<ProductRecord>,
}

/// All sources, in visit order.
#[must_use]
pub fn all_sources() -> [&'static SourceDescriptor; 9] {
    [
        &hpstore::SOURCE,
        &nesiojami::SOURCE,
        &kilobaitas::SOURCE,
        &skytech::SOURCE,
        &senukai::SOURCE,
        &one_a::SOURCE,
        &varle::SOURCE,
        &rde::SOURCE,
        &pigu::SOURCE,
    ]
}

/// Escape a query for sources that join search terms with `+`.
pub(crate) fn plus_escape(query: &str) -> String {
    query.replace(' ', "+")
}

/// Escape a query for sources that expect percent-escaped spaces.
pub(crate) fn percent_escape(query: &str) -> String {
    percent_encoding::utf8_percent_encode(query, percent_encoding::NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_order_is_fixed() {
        let names: Vec<&str> = all_sources().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            [
                "HP Store",
                "Nesiojami",
                "Kilobaitas",
                "Skytech",
                "Senukai",
                "1a",
                "Varle",
                "RDE",
                "Pigu"
            ]
        );
    }

    #[test]
    fn every_source_has_an_absolute_homepage() {
        for source in all_sources() {
            assert!(source.homepage.starts_with("https://"), "{}", source.name);
        }
    }

    #[test]
    fn plus_escape_joins_terms() {
        assert_eq!(plus_escape("hp i7 32 gb"), "hp+i7+32+gb");
    }

    #[test]
    fn percent_escape_encodes_spaces() {
        assert_eq!(percent_escape("dell 32 gb"), "dell%2032%20gb");
    }
}
