mod config;
mod matcher;
mod model;
mod notifier;
mod parser;
mod ranker;
mod report;
mod scraper;
mod storage;

use config::{load_config, PreferenceProfile};
use model::{Deal, Source};
use notifier::{Notifier, SmsGateway};
use parser::{DealExtractor, LastBottleExtractor, WineComExtractor, WtsoExtractor};
use report::RunReport;
use scraper::{Fetcher, HttpFetcher};
use storage::DedupStore;

use chrono::Local;
use futures::future::join_all;
use std::path::Path;
use tracing::{error, info, warn};

// SMS bodies are short; only the best few deals go out per run.
const MAX_SMS_DEALS: usize = 3;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {e}");
            return;
        }
    };

    let fetcher = HttpFetcher::new();
    let extractors: Vec<Box<dyn DealExtractor>> = vec![
        Box::new(WtsoExtractor::new()),
        Box::new(LastBottleExtractor::new()),
        Box::new(WineComExtractor::new()),
    ];

    let mut report = RunReport::new();

    info!("Scanning {} sites...", extractors.len());
    let scans = extractors
        .iter()
        .map(|extractor| scan_site(&fetcher, extractor.as_ref(), &config.profile));

    let mut all_deals = Vec::new();
    for (source, outcome) in join_all(scans).await {
        match outcome {
            Ok(deals) => {
                info!("{source}: {} matching deal(s)", deals.len());
                report.record_matches(source, deals.len());
                all_deals.extend(deals);
            }
            Err(message) => {
                warn!("{source} scan error: {message}");
                report.record_site_error(source, message);
            }
        }
    }

    ranker::rank_by_discount(&mut all_deals);

    let today = Local::now().date_naive();
    let store = DedupStore::new(&config.dedup_path);
    let known = store.load(today);
    let fresh = storage::dedup::filter_new(all_deals, &known);

    if fresh.is_empty() {
        info!("😴 No new deals matching the profile this run.");
    } else {
        info!("🎉 Found {} new deal(s)!", fresh.len());
        let gateway = SmsGateway::new(config.gateway.clone());
        let picked = ranker::top(&fresh, MAX_SMS_DEALS);
        let results = gateway.deliver(picked).await;
        for (deal, result) in picked.iter().zip(&results) {
            report.record_delivery(deal, result);
        }

        let mut keys = known;
        keys.extend(fresh.iter().map(|deal| deal.dedup_key()));
        if let Err(e) = store.persist(today, &keys) {
            warn!("Dedup persist failed: {e}");
        }
    }

    match report.write_to(Path::new(&config.log_dir)) {
        Ok(path) => info!("Run log written: {}", path.display()),
        Err(e) => warn!("Run log write failed: {e}"),
    }
}

/// One site's scan: fetch, extract, filter through the taste profile.
/// Any failure stays inside this boundary so the other sites still run.
async fn scan_site(
    fetcher: &dyn Fetcher,
    extractor: &dyn DealExtractor,
    profile: &PreferenceProfile,
) -> (Source, Result<Vec<Deal>, String>) {
    let source = extractor.source();

    let html = match fetcher.fetch(extractor.page_url()).await {
        Ok(html) => html,
        Err(e) => return (source, Err(e.to_string())),
    };

    let candidates = match extractor.extract(&html) {
        Ok(candidates) => candidates,
        Err(e) => return (source, Err(e.to_string())),
    };

    let deals = candidates
        .into_iter()
        .filter(|deal| matcher::matches(deal, profile))
        .collect();
    (source, Ok(deals))
}
