// Last Bottle sells a single offer until it runs out, so the front page
// carries at most a few listing nodes.
use super::{collect_deals, DealExtractor, SiteSelectors};
use crate::model::{Deal, ParserError, Source};

const PAGE_URL: &str = "https://lastbottlewines.com/";
const BASE_URL: &str = "https://lastbottlewines.com";

const LAYOUT: SiteSelectors = SiteSelectors {
    listing: ".offer, .wine-offer, [class*='offer']",
    name: "[class*='name'], h1, h2, h3",
    sale_price: "[class*='price'], [class*='sale']",
    original_price: "[class*='retail'], [class*='original'], s, strike",
    link: "a[href]",
    annotation: "[class*='rating'], [class*='score'], [class*='badge'], [class*='press']",
    max_listings: 5,
};

pub struct LastBottleExtractor;

impl LastBottleExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DealExtractor for LastBottleExtractor {
    fn source(&self) -> Source {
        Source::LastBottle
    }

    fn page_url(&self) -> &str {
        PAGE_URL
    }

    fn extract(&self, html: &str) -> Result<Vec<Deal>, ParserError> {
        collect_deals(html, &LAYOUT, Source::LastBottle, BASE_URL, PAGE_URL)
    }
}
