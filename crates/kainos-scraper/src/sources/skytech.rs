//! Skytech (skytech.lt) — static strategy.
//!
//! Results are rows of a `table.productListing`. The "no results" signal is
//! unusual: the page still renders the table, but with a "N prekių,
//! atitinkančių" message instead of rows. Links are relative; the price is
//! a `<strong>` two cells to the right of the name cell.

use kainos_core::ProductRecord;
use scraper::{ElementRef, Html, Selector};

use crate::parse;
use crate::sources::{plus_escape, FetchStrategy, SourceDescriptor};

const NAME: &str = "Skytech";
const HOMEPAGE: &str = "https://www.skytech.lt/";

/// Fragment of the "0 products matching your search" banner.
const NO_MATCH_MARKER: &str = "prekių, atitinkančių";

pub(crate) static SOURCE: SourceDescriptor = SourceDescriptor {
    name: NAME,
    homepage: HOMEPAGE,
    strategy: FetchStrategy::Static,
    search_url,
    extract,
};

fn search_url(query: &str) -> String {
    format!(
        "https://www.skytech.lt/search.php?keywords={}&x=14&y=14&search_in_description=0&pagesize=100&f=86_165",
        plus_escape(query)
    )
}

fn extract(html: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table.productListing").expect("valid selector");
    let row_sel =
        Selector::parse("tr.productListing.odd, tr.productListing.even").expect("valid selector");

    let Some(table) = document.select(&table_sel).next() else {
        return vec![ProductRecord::not_found(NAME, HOMEPAGE)];
    };
    if table.text().collect::<String>().contains(NO_MATCH_MARKER) {
        return vec![ProductRecord::not_found(NAME, HOMEPAGE)];
    }

    let rows: Vec<ElementRef<'_>> = table.select(&row_sel).collect();
    if rows.is_empty() {
        return vec![ProductRecord::not_found(NAME, HOMEPAGE)];
    }

    rows.iter()
        .filter_map(|row| {
            let record = extract_row(row);
            if record.is_none() {
                tracing::debug!(source = NAME, "skipping listing with malformed markup");
            }
            record
        })
        .collect()
}

fn extract_row(row: &ElementRef<'_>) -> Option<ProductRecord> {
    let name_cell_sel = Selector::parse("td.name").expect("valid selector");
    let sibling_sel = Selector::parse("td.name ~ td").expect("valid selector");
    let anchor_sel = Selector::parse("a").expect("valid selector");
    let strong_sel = Selector::parse("strong").expect("valid selector");

    let name_cell = row.select(&name_cell_sel).next()?;
    let anchor = name_cell.select(&anchor_sel).next()?;
    let description = anchor.text().collect::<String>().trim().to_string();
    if description.is_empty() {
        return None;
    }
    let link = parse::absolutize(HOMEPAGE, anchor.value().attr("href")?)?;

    // The price column is the second cell after the name cell.
    let price_cell = row.select(&sibling_sel).nth(1)?;
    let price_text = price_cell
        .select(&strong_sel)
        .next()?
        .text()
        .collect::<String>();
    let price = parse::parse_price_dot(&price_text)?;

    Some(ProductRecord {
        description,
        price,
        link,
    })
}
