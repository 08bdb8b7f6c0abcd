//! Pigu (pigu.lt) — rendered-DOM strategy.
//!
//! The raw `.price` field is rendered in hundredths of a euro and must be
//! divided by 100. Cards without a price element (pre-order teasers) are
//! skipped item by item, exactly like any other malformed listing.

use kainos_core::ProductRecord;
use scraper::{ElementRef, Html, Selector};

use crate::parse;
use crate::render::MatchMode;
use crate::sources::{percent_escape, FetchStrategy, SourceDescriptor};

const NAME: &str = "Pigu";
const HOMEPAGE: &str = "https://www.pigu.lt/";

pub(crate) static SOURCE: SourceDescriptor = SourceDescriptor {
    name: NAME,
    homepage: HOMEPAGE,
    strategy: FetchStrategy::Rendered {
        ready_selector: ".product-list.all-products-visible",
        matches: MatchMode::First,
    },
    search_url,
    extract,
};

fn search_url(query: &str) -> String {
    format!(
        "https://pigu.lt/lt/search?q={}&c[50]=50&filter[attr_UHJla8SXcyDFvmVua2xhcw][2]=RGVsbA&filter[attr_UHJla8SXcyDFvmVua2xhcw][4]=TGVub3Zv&filter[attr_UHJla8SXcyDFvmVua2xhcw][5]=SFA",
        percent_escape(query)
    )
}

fn extract(html: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let item_sel = Selector::parse(".product-item-inner-hover").expect("valid selector");

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
    let anchor_sel = Selector::parse("p.product-name > a").expect("valid selector");
    let price_sel = Selector::parse(".price").expect("valid selector");

    let anchor = item.select(&anchor_sel).next()?;
    let description = anchor.value().attr("title")?.trim().to_string();
    if description.is_empty() {
        return None;
    }
    let link = parse::absolutize(HOMEPAGE, anchor.value().attr("href")?)?;

    let price_text = item.select(&price_sel).next()?.text().collect::<String>();
    let price = parse::parse_price_cents(&price_text)?;

    Some(ProductRecord {
        description,
        price,
        link,
    })
}
