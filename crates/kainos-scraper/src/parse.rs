//! Price-text and link normalization helpers shared by the source extractors.
//!
//! The nine stores disagree on everything: comma vs. dot decimals, prices in
//! hundredths, embedded currency symbols and non-breaking spaces, relative
//! vs. absolute links. Each helper handles one convention and returns
//! `None` on unparseable input so a single malformed listing can be skipped
//! without aborting its source.

use url::Url;

/// Fixed surcharge Varle shows outside the listed base price.
pub(crate) const VARLE_SURCHARGE: f64 = 0.99;

/// Strip currency symbols, non-breaking spaces (both the character and a
/// literal `&nbsp;` entity surviving in raw markup), and plain spaces.
pub(crate) fn clean_price_text(raw: &str) -> String {
    raw.trim()
        .replace("&nbsp;", "")
        .replace(['\u{a0}', '€', ' '], "")
}

/// Parse a dot-decimal price that may carry comma thousands separators,
/// e.g. `"1,549.00 €"` → `1549.0`.
pub(crate) fn parse_price_dot(raw: &str) -> Option<f64> {
    clean_price_text(raw).replace(',', "").parse().ok()
}

/// Parse a comma-decimal price, treating dots as thousands separators,
/// e.g. `"1.234,56 €"` → `1234.56`.
pub(crate) fn parse_price_comma(raw: &str) -> Option<f64> {
    clean_price_text(raw)
        .replace('.', "")
        .replace(',', ".")
        .parse()
        .ok()
}

/// Parse a price rendered in hundredths of a euro, e.g. `"164999"` →
/// `1649.99`.
pub(crate) fn parse_price_cents(raw: &str) -> Option<f64> {
    clean_price_text(raw)
        .parse::<f64>()
        .ok()
        .map(|cents| cents / 100.0)
}

/// Resolve a possibly-relative `href` against a source's base URL.
/// Already-absolute links pass through unchanged; unresolvable ones yield
/// `None` so the item can be skipped.
pub(crate) fn absolutize(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(|url| url.to_string())
}

/// Collapse runs of whitespace (including newlines inside multi-line
/// titles) into single spaces.
pub(crate) fn squash_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn comma_decimal_with_dot_thousands() {
        assert!(close(parse_price_comma("1.234,56 €").unwrap(), 1234.56));
    }

    #[test]
    fn comma_decimal_plain() {
        assert!(close(parse_price_comma("1599,00").unwrap(), 1599.0));
    }

    #[test]
    fn comma_decimal_with_nbsp_thousands() {
        assert!(close(parse_price_comma("1\u{a0}699,00\u{a0}€").unwrap(), 1699.0));
    }

    #[test]
    fn comma_decimal_with_entity_nbsp() {
        assert!(close(parse_price_comma("1&nbsp;699,00€").unwrap(), 1699.0));
    }

    #[test]
    fn dot_decimal_no_separators() {
        assert!(close(parse_price_dot("1234.56€").unwrap(), 1234.56));
    }

    #[test]
    fn dot_decimal_with_comma_thousands() {
        assert!(close(parse_price_dot("1,549.00 €").unwrap(), 1549.0));
    }

    #[test]
    fn cents_divide_by_one_hundred() {
        assert!(close(parse_price_cents("164999").unwrap(), 1649.99));
    }

    #[test]
    fn garbage_price_is_none() {
        assert!(parse_price_dot("Kaina sutartinė").is_none());
        assert!(parse_price_comma("").is_none());
        assert!(parse_price_cents("€€").is_none());
    }

    #[test]
    fn varle_surcharge_lands_on_the_display_price() {
        let price = parse_price_dot("1579").unwrap() + VARLE_SURCHARGE;
        assert!(close(price, 1579.99));
    }

    #[test]
    fn absolutize_prefixes_relative_paths() {
        assert_eq!(
            absolutize("https://www.kilobaitas.lt/", "/kompiuteriai/item_123").unwrap(),
            "https://www.kilobaitas.lt/kompiuteriai/item_123"
        );
    }

    #[test]
    fn absolutize_keeps_absolute_links() {
        assert_eq!(
            absolutize("https://www.skytech.lt/", "https://www.skytech.lt/p/123").unwrap(),
            "https://www.skytech.lt/p/123"
        );
    }

    #[test]
    fn squash_whitespace_flattens_multiline_titles() {
        assert_eq!(
            squash_whitespace("Dell G15\n 5520\t RTX 3070 Ti "),
            "Dell G15 5520 RTX 3070 Ti"
        );
    }
}
