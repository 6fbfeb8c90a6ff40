pub mod sms;

pub use sms::SmsGateway;

use crate::model::Deal;
use std::fmt;

/// Per-deal delivery outcome. The notifier never raises; every attempt
/// resolves to one of these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Rejected,
    RecipientRefused,
    AuthFailed,
    TransportError,
    SkippedNoCredentials,
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            DeliveryOutcome::Delivered => "DELIVERED",
            DeliveryOutcome::Rejected => "REJECTED",
            DeliveryOutcome::RecipientRefused => "RECIPIENT_REFUSED",
            DeliveryOutcome::AuthFailed => "AUTH_FAILED",
            DeliveryOutcome::TransportError => "TRANSPORT_ERROR",
            DeliveryOutcome::SkippedNoCredentials => "SKIPPED_NO_CREDENTIALS",
        };
        f.write_str(tag)
    }
}

#[derive(Debug)]
pub struct DeliveryResult {
    pub outcome: DeliveryOutcome,
    pub detail: Option<String>,
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Attempts delivery of one message per deal, in order. One deal's
    /// failure never blocks the attempts for the rest.
    async fn deliver(&self, deals: &[Deal]) -> Vec<DeliveryResult>;
}

/// The fixed message block for one deal. SMS bodies should stay short, so
/// this is the whole story: name, price line, known scores, link.
pub fn format_message(deal: &Deal) -> String {
    let mut lines = vec![
        "🍷 WINE DEAL".to_string(),
        deal.name.clone(),
        format!("${:.2} ({}% off)", deal.price, deal.discount_pct),
    ];
    let scores: Vec<String> = deal
        .critic_scores
        .iter()
        .filter(|s| s.publication != "unknown")
        .map(|s| format!("{} {}", s.score, s.publication))
        .collect();
    if !scores.is_empty() {
        lines.push(scores.join(", "));
    }
    lines.push(deal.url.clone());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CriticScore, Source};

    fn deal(scores: Vec<CriticScore>) -> Deal {
        Deal::new(
            "Guidalberto 2019".to_string(),
            40.0,
            80.0,
            "https://www.wtso.com/wine/guidalberto".to_string(),
            Source::Wtso,
            scores,
        )
    }

    #[test]
    fn message_block_carries_name_price_and_link() {
        let text = format_message(&deal(Vec::new()));
        assert_eq!(
            text,
            "🍷 WINE DEAL\nGuidalberto 2019\n$40.00 (50% off)\nhttps://www.wtso.com/wine/guidalberto"
        );
    }

    #[test]
    fn known_scores_get_their_own_line() {
        let text = format_message(&deal(vec![
            CriticScore { score: 95, publication: "Wine Advocate".into() },
            CriticScore { score: 93, publication: "Wine Spectator".into() },
        ]));
        assert!(text.contains("95 Wine Advocate, 93 Wine Spectator"));
    }

    #[test]
    fn unknown_publications_never_reach_the_message() {
        let text = format_message(&deal(vec![CriticScore { score: 95, publication: "unknown".into() }]));
        assert!(!text.contains("95"));
    }
}
