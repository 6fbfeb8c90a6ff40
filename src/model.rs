// Core structs: Deal, CriticScore, Source
use thiserror::Error;

/// Retail site a deal was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Wtso,
    LastBottle,
    WineCom,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Source::Wtso => "WTSO",
            Source::LastBottle => "Last Bottle",
            Source::WineCom => "Wine.com",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A critic rating attached to a listing. Scores outside 80-100 are
/// discarded during extraction and never reach this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticScore {
    pub score: u8,
    pub publication: String,
}

/// One scraped offer, normalized. Built once by its site extractor and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct Deal {
    pub name: String,
    pub price: f64,
    /// Reference/retail price; 0 means unknown.
    pub original_price: f64,
    /// Derived from price and original_price, never set independently.
    pub discount_pct: u8,
    pub url: String,
    pub source: Source,
    pub critic_scores: Vec<CriticScore>,
}

impl Deal {
    pub fn new(
        name: String,
        price: f64,
        original_price: f64,
        url: String,
        source: Source,
        critic_scores: Vec<CriticScore>,
    ) -> Self {
        let discount_pct = if original_price > 0.0 {
            ((1.0 - price / original_price) * 100.0).round().clamp(0.0, 100.0) as u8
        } else {
            0
        };
        Self {
            name,
            price,
            original_price,
            discount_pct,
            url,
            source,
            critic_scores,
        }
    }

    /// Case-insensitive `name|source` identity used to suppress repeat
    /// notifications within a day.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}|{}",
            self.name.trim().to_lowercase(),
            self.source.label().to_lowercase()
        )
    }
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("http error: {0}")]
    HttpError(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status code {0}")]
    InvalidResponse(u16),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector: {0}")]
    HtmlParseError(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("dedup state io: {0}")]
    Io(#[from] std::io::Error),
    #[error("dedup state encode: {0}")]
    Encode(#[from] serde_json::Error),
}
