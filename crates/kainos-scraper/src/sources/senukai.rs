//! Senukai (senukai.lt) — rendered-DOM strategy.
//!
//! The results grid is script-assembled; the fetcher waits for
//! `.ks-product-grid-row` and hands its markup over. Prices appear in two
//! places: a generic `.ks-item-price` value on every card and a more
//! specific `.ks-new-product-price__price-number` on discounted cards. The
//! specific one overrides the generic one only when it is present and
//! parses; otherwise the generic value is silently kept.

use kainos_core::ProductRecord;
use scraper::{ElementRef, Html, Selector};

use crate::parse;
use crate::render::MatchMode;
use crate::sources::{plus_escape, FetchStrategy, SourceDescriptor};

const NAME: &str = "Senukai";
const HOMEPAGE: &str = "https://www.senukai.lt/";

pub(crate) static SOURCE: SourceDescriptor = SourceDescriptor {
    name: NAME,
    homepage: HOMEPAGE,
    strategy: FetchStrategy::Rendered {
        ready_selector: ".ks-product-grid-row",
        matches: MatchMode::First,
    },
    search_url,
    extract,
};

fn search_url(query: &str) -> String {
    format!(
        "https://www.senukai.lt/paieska/?c3=Kompiuterin%C4%97+technika%2C+biuro+prek%C4%97s%2F%2FNe%C5%A1iojami+kompiuteriai+ir+priedai%2F%2FNe%C5%A1iojami+kompiuteriai&q={}",
        plus_escape(query)
    )
}

fn extract(html: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let item_sel = Selector::parse(".sn-product-inner.sn-product-inner--hover.ks-gtm-categories")
        .expect("valid selector");

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
    let name_sel = Selector::parse(".ks-new-product-name").expect("valid selector");
    let base_price_sel = Selector::parse(".ks-item-price span").expect("valid selector");
    let better_price_sel =
        Selector::parse(".ks-new-product-price__price-number").expect("valid selector");

    let name = item.select(&name_sel).next()?;
    let description = name.text().collect::<String>().trim().to_string();
    if description.is_empty() {
        return None;
    }
    let link = parse::absolutize(HOMEPAGE, name.value().attr("href")?)?;

    let base_text = item.select(&base_price_sel).next()?.text().collect::<String>();
    let mut price = parse::parse_price_comma(&base_text)?;
    // Discounted cards carry a more specific price element; keep the generic
    // value when it is absent or does not parse.
    if let Some(better) = item
        .select(&better_price_sel)
        .next()
        .and_then(|el| parse::parse_price_comma(&el.text().collect::<String>()))
    {
        price = better;
    }

    Some(ProductRecord {
        description,
        price,
        link,
    })
}
