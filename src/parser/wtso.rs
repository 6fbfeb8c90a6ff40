// WTSO runs one flash deal at a time, with a handful of recent offers
// further down the page.
use super::{collect_deals, DealExtractor, SiteSelectors};
use crate::model::{Deal, ParserError, Source};

const PAGE_URL: &str = "https://www.wtso.com/";
const BASE_URL: &str = "https://www.wtso.com";

const LAYOUT: SiteSelectors = SiteSelectors {
    listing: ".wine-item, .deal-item, [class*='product']",
    name: "[class*='name'], [class*='title'], h2, h3",
    sale_price: "[class*='sale'], [class*='price-sale'], [class*='current']",
    original_price: "[class*='original'], [class*='retail'], [class*='was'], s",
    link: "a[href]",
    annotation: "[class*='rating'], [class*='score'], [class*='review'], [class*='critic']",
    max_listings: 10,
};

pub struct WtsoExtractor;

impl WtsoExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DealExtractor for WtsoExtractor {
    fn source(&self) -> Source {
        Source::Wtso
    }

    fn page_url(&self) -> &str {
        PAGE_URL
    }

    fn extract(&self, html: &str) -> Result<Vec<Deal>, ParserError> {
        collect_deals(html, &LAYOUT, Source::Wtso, BASE_URL, PAGE_URL)
    }
}
