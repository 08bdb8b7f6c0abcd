//! Kilobaitas (kilobaitas.lt) — static strategy.
//!
//! Results sit in a `.products-grid.row` grid of `.item-inner` cards. The
//! card links are relative and need the base-URL prefix; the price is the
//! second `<meta>` tag under `.item-price` (the first carries the currency).

use kainos_core::ProductRecord;
use scraper::{ElementRef, Html, Selector};

use crate::parse;
use crate::sources::{percent_escape, FetchStrategy, SourceDescriptor};

const NAME: &str = "Kilobaitas";
const HOMEPAGE: &str = "https://www.kilobaitas.lt/";

pub(crate) static SOURCE: SourceDescriptor = SourceDescriptor {
    name: NAME,
    homepage: HOMEPAGE,
    strategy: FetchStrategy::Static,
    search_url,
    extract,
};

fn search_url(query: &str) -> String {
    format!(
        "https://www.kilobaitas.lt/paieskos_rezultatai/searchresult.aspx?groupfilterid=34&q={}",
        percent_escape(query)
    )
}

fn extract(html: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let grid_sel = Selector::parse(".products-grid.row").expect("valid selector");
    let item_sel = Selector::parse("div.item-inner").expect("valid selector");

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
    let title_sel = Selector::parse("div.item-title.line-clamp").expect("valid selector");
    let text_sel = Selector::parse("p").expect("valid selector");
    let anchor_sel = Selector::parse("a").expect("valid selector");
    let meta_sel = Selector::parse("div.item-price meta").expect("valid selector");

    let title_block = item.select(&title_sel).next()?;
    let description = title_block
        .select(&text_sel)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if description.is_empty() {
        return None;
    }
    let link = parse::absolutize(
        HOMEPAGE,
        title_block.select(&anchor_sel).next()?.value().attr("href")?,
    )?;

    // meta[0] is the currency, meta[1] the machine-readable amount.
    let price_meta = item.select(&meta_sel).nth(1)?;
    let price = parse::parse_price_dot(price_meta.value().attr("content")?)?;

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
        <html><body>
        <div class="products-grid row">
          <div class="item-inner">
            <div class="item-title line-clamp">
              <a href="/kompiuteriai/dell-g15-5520/item_551234"><p>Dell G15 5520 i7 32GB RTX 3070 Ti</p></a>
            </div>
            <div class="item-price">
              <meta itemprop="priceCurrency" content="EUR">
              <meta itemprop="price" content="2099.00">
            </div>
          </div>
          <div class="item-inner">
            <div class="item-title line-clamp">
              <a href="/kompiuteriai/msi-katana/item_551299"><p>MSI Katana GF76</p></a>
            </div>
            <div class="item-price">
              <meta itemprop="priceCurrency" content="EUR">
            </div>
          </div>
        </div>
        </body></html>"#;

    const NO_RESULTS: &str = r"
        <html><body><div class='no-results'>Prekiu nerasta</div></body></html>";

    #[test]
    fn extracts_items_and_prefixes_relative_links() {
        let records = extract(RESULTS);
        // The second card has no machine-readable price meta and is skipped.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "Dell G15 5520 i7 32GB RTX 3070 Ti");
        assert!((records[0].price - 2099.0).abs() < 0.01);
        assert_eq!(
            records[0].link,
            "https://www.kilobaitas.lt/kompiuteriai/dell-g15-5520/item_551234"
        );
    }

    #[test]
    fn missing_grid_yields_one_placeholder() {
        let records = extract(NO_RESULTS);
        assert_eq!(records.len(), 1);
        assert!(records[0].is_placeholder());
    }

    #[test]
    fn search_url_uses_percent_escaping() {
        let url = search_url("dell 32 gb");
        assert!(url.contains("q=dell%2032%20gb"));
    }
}
