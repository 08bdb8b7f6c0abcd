//! Nesiojami (nesiojami.lt) — static strategy.
//!
//! WooCommerce storefront: a `.products.columns-4` list, `<h2>` titles,
//! `<bdi>` prices in dot-decimal with comma thousands separators.

use kainos_core::ProductRecord;
use scraper::{ElementRef, Html, Selector};

use crate::parse;
use crate::sources::{plus_escape, FetchStrategy, SourceDescriptor};

const NAME: &str = "Nesiojami";
const HOMEPAGE: &str = "https://nesiojami.lt/";

pub(crate) static SOURCE: SourceDescriptor = SourceDescriptor {
    name: NAME,
    homepage: HOMEPAGE,
    strategy: FetchStrategy::Static,
    search_url,
    extract,
};

fn search_url(query: &str) -> String {
    format!(
        "https://nesiojami.lt/nesiojami-kompiuteriai-asus-acer-msi-lenovo-gigabyte/?orderby=price&s={}",
        plus_escape(query)
    )
}

fn extract(html: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let list_sel = Selector::parse(".products.columns-4").expect("valid selector");
    let item_sel = Selector::parse("li").expect("valid selector");

    let Some(list) = document.select(&list_sel).next() else {
        return vec![ProductRecord::not_found(NAME, HOMEPAGE)];
    };

    let items: Vec<ElementRef<'_>> = list.select(&item_sel).collect();
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
    let title_sel = Selector::parse("h2.woocommerce-loop-product__title").expect("valid selector");
    let anchor_sel = Selector::parse("a").expect("valid selector");
    let price_sel = Selector::parse("bdi").expect("valid selector");

    let description = item
        .select(&title_sel)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if description.is_empty() {
        return None;
    }
    let link = parse::absolutize(HOMEPAGE, item.select(&anchor_sel).next()?.value().attr("href")?)?;
    let price_text = item.select(&price_sel).next()?.text().collect::<String>();
    let price = parse::parse_price_dot(&price_text)?;

    Some(ProductRecord {
        description,
        price,
        link,
    })
}
