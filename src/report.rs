// Human-readable run summary, written to a per-run file under the log
// directory.
use crate::model::{Deal, Source};
use crate::notifier::DeliveryResult;

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

pub struct RunReport {
    started_at: DateTime<Local>,
    sites: Vec<SiteOutcome>,
    deliveries: Vec<DeliveryLine>,
}

struct SiteOutcome {
    source: Source,
    result: Result<usize, String>,
}

struct DeliveryLine {
    source: Source,
    name: String,
    price: f64,
    original_price: f64,
    discount_pct: u8,
    outcome: String,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            sites: Vec::new(),
            deliveries: Vec::new(),
        }
    }

    pub fn record_matches(&mut self, source: Source, count: usize) {
        self.sites.push(SiteOutcome { source, result: Ok(count) });
    }

    pub fn record_site_error(&mut self, source: Source, error: String) {
        self.sites.push(SiteOutcome { source, result: Err(error) });
    }

    pub fn record_delivery(&mut self, deal: &Deal, result: &DeliveryResult) {
        let outcome = match &result.detail {
            Some(detail) => format!("{} ({detail})", result.outcome),
            None => result.outcome.to_string(),
        };
        self.deliveries.push(DeliveryLine {
            source: deal.source,
            name: deal.name.clone(),
            price: deal.price,
            original_price: deal.original_price,
            discount_pct: deal.discount_pct,
            outcome,
        });
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "🍷 Wine Deal Scanner — {}\n",
            self.started_at.format("%Y-%m-%d %H:%M")
        ));
        out.push_str(&"=".repeat(50));
        out.push('\n');

        for site in &self.sites {
            match &site.result {
                Ok(count) => {
                    out.push_str(&format!("{}: {} matching deal(s)\n", site.source, count))
                }
                Err(error) => out.push_str(&format!("{}: error: {}\n", site.source, error)),
            }
        }

        if self.deliveries.is_empty() {
            out.push_str("\n😴 No new deals matching your preferences this run.\n");
            return out;
        }

        out.push_str("\nNotified:\n");
        for line in &self.deliveries {
            out.push_str(&format!("  [{}] {}\n", line.source, line.name));
            if line.original_price > 0.0 {
                out.push_str(&format!(
                    "    ${:.2} (was ${:.2}, {}% off)\n",
                    line.price, line.original_price, line.discount_pct
                ));
            } else {
                out.push_str(&format!("    ${:.2}\n", line.price));
            }
            out.push_str(&format!("    {}\n", line.outcome));
        }
        out
    }

    /// Writes the rendered summary to `<dir>/run-<timestamp>.log`.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("run-{}.log", self.started_at.format("%Y%m%d-%H%M%S")));
        fs::write(&path, self.render())?;
        Ok(path)
    }
}
