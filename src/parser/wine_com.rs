// Wine.com has a real catalog; the sale listing is pre-filtered server
// side through the query string, sorted by savings.
use super::{collect_deals, DealExtractor, SiteSelectors};
use crate::model::{Deal, ParserError, Source};

const PAGE_URL: &str =
    "https://www.wine.com/list/wine/7155?sortBy=savings&pricemax=60&pricemin=20&pct_off=25";
const BASE_URL: &str = "https://www.wine.com";

const LAYOUT: SiteSelectors = SiteSelectors {
    listing: ".prodItem, [class*='productCard'], [class*='product-item']",
    name: "[class*='name'], [class*='title']",
    sale_price: "[class*='salePrice'], [class*='sale-price']",
    original_price: "[class*='regPrice'], [class*='reg-price'], s",
    link: "a[href]",
    annotation: "[class*='rating'], [class*='score'], [class*='review']",
    max_listings: 15,
};

pub struct WineComExtractor;

impl WineComExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DealExtractor for WineComExtractor {
    fn source(&self) -> Source {
        Source::WineCom
    }

    fn page_url(&self) -> &str {
        PAGE_URL
    }

    fn extract(&self, html: &str) -> Result<Vec<Deal>, ParserError> {
        collect_deals(html, &LAYOUT, Source::WineCom, BASE_URL, BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <li class="prodItem">
            <span class="prodItemInfo_name">Cabernet Sauvignon Napa 2019</span>
            <span class="salePrice">$34.99</span>
            <span class="regPrice">$55.00</span>
            <a href="/product/cab-napa-2019/123">View</a>
            <span class="wineRatings_rating">JS 93</span>
        </li>
        <li class="prodItem">
            <span class="prodItemInfo_name">Syrah Walla Walla 2020</span>
            <span class="salePrice">Call for price</span>
        </li>"#;

    #[test]
    fn extracts_catalog_listings() {
        let deals = WineComExtractor::new().extract(PAGE).unwrap();
        assert_eq!(deals.len(), 2);

        let cab = &deals[0];
        assert_eq!(cab.name, "Cabernet Sauvignon Napa 2019");
        assert_eq!(cab.price, 34.99);
        assert_eq!(cab.original_price, 55.0);
        assert_eq!(cab.discount_pct, 36);
        assert_eq!(cab.url, "https://www.wine.com/product/cab-napa-2019/123");
        assert_eq!(cab.critic_scores[0].publication, "James Suckling");
    }

    #[test]
    fn unparseable_price_text_reads_as_zero() {
        let deals = WineComExtractor::new().extract(PAGE).unwrap();
        let syrah = &deals[1];
        assert_eq!(syrah.price, 0.0);
        assert_eq!(syrah.original_price, 0.0);
        assert_eq!(syrah.url, BASE_URL);
    }
}
