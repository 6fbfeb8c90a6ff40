// Site-specific HTML extraction. Each retail site gets one extractor
// variant holding its own CSS heuristics; the listing walk is shared.
pub mod last_bottle;
pub mod wine_com;
pub mod wtso;

pub use last_bottle::LastBottleExtractor;
pub use wine_com::WineComExtractor;
pub use wtso::WtsoExtractor;

use crate::model::{CriticScore, Deal, ParserError, Source};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// CSS heuristics for one site's deal markup. Selectors are comma-grouped
/// guesses because these pages change class names freely.
pub(crate) struct SiteSelectors {
    pub listing: &'static str,
    pub name: &'static str,
    pub sale_price: &'static str,
    pub original_price: &'static str,
    pub link: &'static str,
    pub annotation: &'static str,
    pub max_listings: usize,
}

pub trait DealExtractor: Send + Sync {
    fn source(&self) -> Source;
    /// Page the fetcher should GET for this site.
    fn page_url(&self) -> &str;
    fn extract(&self, html: &str) -> Result<Vec<Deal>, ParserError>;
}

/// Walks the listing nodes of a fetched page. A listing without a name or
/// a sale price is skipped outright; every other missing field degrades to
/// its "unknown" value so one broken listing never sinks the rest.
pub(crate) fn collect_deals(
    html: &str,
    layout: &SiteSelectors,
    source: Source,
    base_url: &str,
    root_url: &str,
) -> Result<Vec<Deal>, ParserError> {
    let document = Html::parse_document(html);
    let listing_sel = compile(layout.listing)?;
    let name_sel = compile(layout.name)?;
    let price_sel = compile(layout.sale_price)?;
    let original_sel = compile(layout.original_price)?;
    let link_sel = compile(layout.link)?;
    let annotation_sel = compile(layout.annotation)?;

    let mut deals = Vec::new();
    for item in document.select(&listing_sel).take(layout.max_listings) {
        let Some(name) = first_text(&item, &name_sel) else {
            continue;
        };
        let Some(price_text) = first_text(&item, &price_sel) else {
            continue;
        };
        let price = clean_price(&price_text);
        let original_price = first_text(&item, &original_sel)
            .map(|text| clean_price(&text))
            .unwrap_or(0.0);
        let href = item
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"));
        let url = resolve_link(href, base_url, root_url);
        let scores = critic_scores(item.select(&annotation_sel).map(|el| element_text(&el)));
        deals.push(Deal::new(name, price, original_price, url, source, scores));
    }
    Ok(deals)
}

fn compile(selector: &str) -> Result<Selector, ParserError> {
    Selector::parse(selector).map_err(|e| ParserError::HtmlParseError(e.to_string()))
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first_text(item: &ElementRef, selector: &Selector) -> Option<String> {
    item.select(selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
}

/// Strips everything but digits and the decimal point, then parses.
/// "$1,234.56" reads as 1234.56; "Sold Out" reads as 0.
pub(crate) fn clean_price(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

pub(crate) fn resolve_link(href: Option<&str>, base_url: &str, root_url: &str) -> String {
    match href {
        Some(h) if h.starts_with("http") => h.to_string(),
        Some(h) => format!("{base_url}{h}"),
        None => root_url.to_string(),
    }
}

/// Scans annotation fragments ("RP 95", "92-94 pts Wine Spectator") for
/// critic scores. A range counts as its upper bound, only 80-100 is
/// plausible, and the first score per resolved publication wins.
pub(crate) fn critic_scores<I>(fragments: I) -> Vec<CriticScore>
where
    I: IntoIterator<Item = String>,
{
    let pattern = Regex::new(r"\b(\d{2,3})(?:\s*-\s*(\d{2,3}))?\s*(?:pts|points)?\b").unwrap();
    let mut scores: Vec<CriticScore> = Vec::new();
    for fragment in fragments {
        let mut found = None;
        for caps in pattern.captures_iter(&fragment) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(1))
                .and_then(|m| m.as_str().parse::<u8>().ok());
            if let Some(value) = value
                && (80..=100).contains(&value)
            {
                found = Some(value);
                break;
            }
        }
        let Some(score) = found else {
            continue;
        };
        let publication = resolve_publication(&fragment);
        if scores.iter().any(|s| s.publication == publication) {
            continue;
        }
        scores.push(CriticScore { score, publication });
    }
    scores
}

/// Maps known critic abbreviations and names to a canonical publication.
pub(crate) fn resolve_publication(fragment: &str) -> String {
    let lower = fragment.to_lowercase();
    let has_token = |token: &str| {
        lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| word == token)
    };
    if lower.contains("spectator") || has_token("ws") {
        "Wine Spectator"
    } else if lower.contains("advocate") || lower.contains("parker") || has_token("rp") {
        "Wine Advocate"
    } else if lower.contains("suckling") || has_token("js") {
        "James Suckling"
    } else if lower.contains("enthusiast") || has_token("we") {
        "Wine Enthusiast"
    } else if lower.contains("vinous") {
        "Vinous"
    } else {
        "unknown"
    }
    .to_string()
}
