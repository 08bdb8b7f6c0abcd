//! 1a (1a.lt) — rendered-DOM strategy.
//!
//! The catalog URL is a pre-filtered laptops category page, not a search
//! endpoint, so the query string is not substituted; the downstream brand
//! filter does the narrowing.

use kainos_core::ProductRecord;
use scraper::{ElementRef, Html, Selector};

use crate::parse;
use crate::render::MatchMode;
use crate::sources::{FetchStrategy, SourceDescriptor};

const NAME: &str = "1a";
const HOMEPAGE: &str = "https://www.1a.lt/";

pub(crate) static SOURCE: SourceDescriptor = SourceDescriptor {
    name: NAME,
    homepage: HOMEPAGE,
    strategy: FetchStrategy::Rendered {
        ready_selector: ".catalog-taxons-products-container__grid-row",
        matches: MatchMode::First,
    },
    search_url,
    extract,
};

fn search_url(_query: &str) -> String {
    "https://www.1a.lt/c/kompiuterine-technika-biuro-prekes/nesiojami-kompiuteriai-ir-priedai/nesiojami-kompiuteriai/371?f=u1Z3yjZbjam"
        .to_string()
}

fn extract(html: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let item_sel = Selector::parse(".catalog-taxons-product__hover").expect("valid selector");

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
    let name_sel = Selector::parse(".catalog-taxons-product__name").expect("valid selector");
    let price_sel =
        Selector::parse(".catalog-taxons-product-price__item-price span").expect("valid selector");

    let name = item.select(&name_sel).next()?;
    let description = name.text().collect::<String>().trim().to_string();
    if description.is_empty() {
        return None;
    }
    let link = parse::absolutize(HOMEPAGE, name.value().attr("href")?)?;
    let price_text = item.select(&price_sel).next()?.text().collect::<String>();
    let price = parse::parse_price_comma(&price_text)?;

    Some(ProductRecord {
        description,
        price,
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = r#"
        <div class="catalog-taxons-products-container__grid-row">
          <div class="catalog-taxons-product__hover">
            <a class="catalog-taxons-product__name" href="/kompiuteriai/dell-g15">
              Dell G15 5520 32GB RTX 3070 Ti
            </a>
            <div class="catalog-taxons-product-price__item-price"><span>2099,00</span></div>
          </div>
        </div>"#;

    #[test]
    fn extracts_items_with_comma_decimal_prices() {
        let records = extract(RESULTS);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "Dell G15 5520 32GB RTX 3070 Ti");
        assert!((records[0].price - 2099.0).abs() < 0.01);
        assert_eq!(records[0].link, "https://www.1a.lt/kompiuteriai/dell-g15");
    }

    #[test]
    fn zero_items_yield_one_placeholder() {
        let records = extract("<div></div>");
        assert_eq!(records.len(), 1);
        assert!(records[0].is_placeholder());
    }

    #[test]
    fn search_url_ignores_the_query() {
        assert_eq!(search_url("hp i7"), search_url("dell 32 gb"));
    }
}
