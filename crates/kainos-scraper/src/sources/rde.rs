//! RDE (rde.lt) — rendered-DOM strategy, multi-container.
//!
//! The laptops category page splits its results across several
//! `.product-list` containers, so the fetcher collects every match and the
//! extractor sees them joined. Like 1a, the URL is a fixed pre-filtered
//! category page with no query substitution.

use kainos_core::ProductRecord;
use scraper::{ElementRef, Html, Selector};

use crate::parse;
use crate::render::MatchMode;
use crate::sources::{FetchStrategy, SourceDescriptor};

const NAME: &str = "RDE";
const HOMEPAGE: &str = "https://www.rde.lt/";

pub(crate) static SOURCE: SourceDescriptor = SourceDescriptor {
    name: NAME,
    homepage: HOMEPAGE,
    strategy: FetchStrategy::Rendered {
        ready_selector: ".product-list",
        matches: MatchMode::All,
    },
    search_url,
    extract,
};

fn search_url(_query: &str) -> String {
    "https://www.rde.lt/categories/lt/150/sort/5/filter/0_0_219.142.191_1006757.1007229.1007307/page/1/Ne%C5%A1iojami-kompiuteriai.html"
        .to_string()
}

fn extract(html: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let item_sel = Selector::parse(".product__info").expect("valid selector");

    let items: Vec<ElementRef<'_>> = document.select(&item_sel).collect();
    if items.is_empty() {
        return vec![ProductRecord::not_found(NAME, HOMEPAGE)];
    }

    items
        .iter()
        .filter_map(|item| {
            let record = extract_item(item);
            if record.is_none() {
                tracing::debug!(source = NAME, "skipping listing with malformed markup");
            }
            record
        })
        .collect()
}

fn extract_item(item: &ElementRef<'_>) -> Option<ProductRecord> {
    let title_sel = Selector::parse(".product__title").expect("valid selector");
    let anchor_sel = Selector::parse("a").expect("valid selector");
    let price_sel = Selector::parse(".price").expect("valid selector");

    let title = item.select(&title_sel).next()?;
    // Titles wrap across lines in the card markup.
    let description = parse::squash_whitespace(&title.text().collect::<String>());
    if description.is_empty() {
        return None;
    }
    let link = parse::absolutize(HOMEPAGE, title.select(&anchor_sel).next()?.value().attr("href")?)?;

    let price_text = item.select(&price_sel).next()?.text().collect::<String>();
    let price = parse::parse_price_dot(&price_text)?;

    Some(ProductRecord {
        description,
        price,
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two containers, as the fetcher joins them for multi-grid pages.
    const RESULTS: &str = r#"
        <div class="product-list">
          <div class="product__info">
            <div class="product__title "><a href="/products/lt/123/hp-omen.html">HP Omen 16
            32GB RTX 3070 Ti</a></div>
            <span class="price">2299.00 €</span>
          </div>
        </div>
        <div class="product-list">
          <div class="product__info">
            <div class="product__title "><a href="/products/lt/456/lenovo-legion.html">Lenovo Legion 5 Pro</a></div>
            <span class="price">2149.00 €</span>
          </div>
        </div>"#;

    #[test]
    fn collects_items_across_containers() {
        let records = extract(RESULTS);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "HP Omen 16 32GB RTX 3070 Ti");
        assert!((records[0].price - 2299.0).abs() < 0.01);
        assert_eq!(
            records[0].link,
            "https://www.rde.lt/products/lt/123/hp-omen.html"
        );
        assert_eq!(records[1].description, "Lenovo Legion 5 Pro");
    }

    #[test]
    fn zero_items_yield_one_placeholder() {
        let records = extract(r#"<div class="product-list"></div>"#);
        assert_eq!(records.len(), 1);
        assert!(records[0].is_placeholder());
    }
}
