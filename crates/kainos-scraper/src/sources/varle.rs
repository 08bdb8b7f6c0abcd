//! Varle (varle.lt) — rendered-DOM strategy.
//!
//! Cards sit in a `.grid.three-in-row` container. The listed price excludes
//! a fixed 0.99 € surcharge shown elsewhere on the site, so it is added back
//! here. Titles sometimes carry a decorative `| ` marker that is stripped.

use kainos_core::ProductRecord;
use scraper::{ElementRef, Html, Selector};

use crate::parse;
use crate::render::MatchMode;
use crate::sources::{percent_escape, FetchStrategy, SourceDescriptor};

const NAME: &str = "Varle";
const HOMEPAGE: &str = "https://www.varle.lt/";

pub(crate) static SOURCE: SourceDescriptor = SourceDescriptor {
    name: NAME,
    homepage: HOMEPAGE,
    strategy: FetchStrategy::Rendered {
        ready_selector: ".grid.three-in-row",
        matches: MatchMode::First,
    },
    search_url,
    extract,
};

fn search_url(query: &str) -> String {
    format!(
        "https://www.varle.lt/nesiojami-kompiuteriai/nesiojami-kompiuteriai/?cq={}&f.s-gamintojas=HP&f.s-gamintojas=Lenovo&f.s-gamintojas=Dell",
        percent_escape(query)
    )
}

fn extract(html: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let item_sel = Selector::parse(".GRID_ITEM").expect("valid selector");

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
    let title_sel = Selector::parse(".product-title").expect("valid selector");
    let anchor_sel = Selector::parse("a").expect("valid selector");
    let price_sel = Selector::parse(".price-value span").expect("valid selector");

    let title = item.select(&title_sel).next()?;
    let description = title
        .text()
        .collect::<String>()
        .replace("| ", "")
        .trim()
        .to_string();
    if description.is_empty() {
        return None;
    }
    let link = parse::absolutize(HOMEPAGE, title.select(&anchor_sel).next()?.value().attr("href")?)?;

    let price_text = item.select(&price_sel).next()?.text().collect::<String>();
    let price = parse::parse_price_dot(price_text.trim())? + parse::VARLE_SURCHARGE;

    Some(ProductRecord {
        description,
        price,
        link,
    })
}
