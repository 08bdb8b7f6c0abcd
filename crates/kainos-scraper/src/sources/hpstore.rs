//! HP Store (hpstore.lt) — static strategy.
//!
//! Results live in an `.infogrid.products` grid, one `<li>` per listing.
//! The grid is absent entirely when the search has no matches. Prices are
//! comma-decimal with the currency trailing the amount.

use kainos_core::ProductRecord;
use scraper::{ElementRef, Html, Selector};

use crate::parse;
use crate::sources::{plus_escape, FetchStrategy, SourceDescriptor};

const NAME: &str = "HP Store";
const HOMEPAGE: &str = "https://www.hpstore.lt/";

pub(crate) static SOURCE: SourceDescriptor = SourceDescriptor {
    name: NAME,
    homepage: HOMEPAGE,
    strategy: FetchStrategy::Static,
    search_url,
    extract,
};

fn search_url(query: &str) -> String {
    format!(
        "https://www.hpstore.lt/index.php?stoken=E6364813&force_sid=&lang=2&cl=search&searchparam={}&button=",
        plus_escape(query)
    )
}

fn extract(html: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let grid_sel = Selector::parse(".infogrid.products").expect("valid selector");
    let item_sel = Selector::parse("li").expect("valid selector");

    let Some(grid) = document.select(&grid_sel).next() else {
        return vec![ProductRecord::not_found(NAME, HOMEPAGE)];
    };

    let items: Vec<ElementRef<'_>> = grid.select(&item_sel).collect();
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
    let anchor_sel = Selector::parse("a").expect("valid selector");
    let price_sel = Selector::parse("big2").expect("valid selector");

    let anchor = item.select(&anchor_sel).next()?;
    let description = anchor.value().attr("title")?.trim().to_string();
    if description.is_empty() {
        return None;
    }
    let link = parse::absolutize(HOMEPAGE, anchor.value().attr("href")?)?;

    // Price text looks like "2149,00 € su PVM" — the amount is the first token.
    let price_text = item.select(&price_sel).next()?.text().collect::<String>();
    let amount = price_text.split_whitespace().next()?;
    let price = parse::parse_price_comma(amount)?;

    Some(ProductRecord {
        description,
        price,
        link,
    })
}
