// Email-to-SMS delivery. Carrier gateways (3125551234@vtext.com and
// friends) turn a short mail into a text message, so each deal goes out
// as one mail with an empty subject.
use crate::config::GatewayConfig;
use crate::model::Deal;
use crate::notifier::{format_message, DeliveryOutcome, DeliveryResult, Notifier};

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

pub struct SmsGateway {
    config: Option<GatewayConfig>,
}

impl SmsGateway {
    pub fn new(config: Option<GatewayConfig>) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl Notifier for SmsGateway {
    async fn deliver(&self, deals: &[Deal]) -> Vec<DeliveryResult> {
        let Some(cfg) = &self.config else {
            warn!("⚠️ SMS credentials not set, printing deals only");
            for deal in deals {
                info!(
                    "🍷 {} | ${:.2} ({}% off) | {}",
                    deal.name, deal.price, deal.discount_pct, deal.url
                );
            }
            return skipped(deals.len());
        };

        let sender: Mailbox = match cfg.sender.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                return uniform(
                    deals.len(),
                    DeliveryOutcome::Rejected,
                    format!("invalid sender address: {e}"),
                );
            }
        };
        let recipient: Mailbox = match cfg.recipient.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                return uniform(
                    deals.len(),
                    DeliveryOutcome::RecipientRefused,
                    format!("invalid recipient address: {e}"),
                );
            }
        };
        let mailer = match AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.smtp_host) {
            Ok(builder) => builder
                .credentials(Credentials::new(cfg.sender.clone(), cfg.password.clone()))
                .build(),
            Err(e) => {
                return uniform(
                    deals.len(),
                    DeliveryOutcome::TransportError,
                    format!("smtp relay setup failed: {e}"),
                );
            }
        };

        let mut results = Vec::with_capacity(deals.len());
        for deal in deals {
            results.push(send_one(&mailer, &sender, &recipient, deal).await);
        }
        results
    }
}

async fn send_one(
    mailer: &AsyncSmtpTransport<Tokio1Executor>,
    sender: &Mailbox,
    recipient: &Mailbox,
    deal: &Deal,
) -> DeliveryResult {
    let message = match Message::builder()
        .from(sender.clone())
        .to(recipient.clone())
        .subject("")
        .body(format_message(deal))
    {
        Ok(message) => message,
        Err(e) => {
            return DeliveryResult {
                outcome: DeliveryOutcome::Rejected,
                detail: Some(format!("message build failed: {e}")),
            };
        }
    };

    match timeout(Duration::from_secs(10), mailer.send(message)).await {
        Ok(Ok(response)) if response.is_positive() => {
            info!("✅ SMS sent: {}", deal.name);
            DeliveryResult { outcome: DeliveryOutcome::Delivered, detail: None }
        }
        Ok(Ok(response)) => {
            warn!("❌ SMS rejected for {}: {}", deal.name, response.code());
            DeliveryResult {
                outcome: DeliveryOutcome::Rejected,
                detail: Some(format!("smtp response {}", response.code())),
            }
        }
        Ok(Err(e)) => {
            warn!("❌ SMS failed for {}: {}", deal.name, e);
            classify_send_error(&e)
        }
        Err(_) => {
            warn!("⏳ SMS send timed out: {}", deal.name);
            DeliveryResult {
                outcome: DeliveryOutcome::TransportError,
                detail: Some("send timed out".to_string()),
            }
        }
    }
}

/// SMTP reply codes 53x are the auth family, 550/551/553 mean the mailbox
/// itself was refused. Everything else permanent is a plain rejection and
/// the transient rest is the transport's problem.
fn classify_send_error(e: &lettre::transport::smtp::Error) -> DeliveryResult {
    let code = e.status().map(|c| c.to_string()).unwrap_or_default();
    let outcome = match code.as_str() {
        "530" | "534" | "535" | "538" => DeliveryOutcome::AuthFailed,
        "550" | "551" | "553" => DeliveryOutcome::RecipientRefused,
        _ if e.is_permanent() => DeliveryOutcome::Rejected,
        _ => DeliveryOutcome::TransportError,
    };
    DeliveryResult { outcome, detail: Some(e.to_string()) }
}

fn skipped(count: usize) -> Vec<DeliveryResult> {
    (0..count)
        .map(|_| DeliveryResult { outcome: DeliveryOutcome::SkippedNoCredentials, detail: None })
        .collect()
}

fn uniform(count: usize, outcome: DeliveryOutcome, detail: String) -> Vec<DeliveryResult> {
    (0..count)
        .map(|_| DeliveryResult { outcome, detail: Some(detail.clone()) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;

    fn deal(name: &str) -> Deal {
        Deal::new(name.to_string(), 40.0, 80.0, String::new(), Source::Wtso, Vec::new())
    }

    #[tokio::test]
    async fn missing_credentials_skip_every_deal() {
        let gateway = SmsGateway::new(None);
        let results = gateway.deliver(&[deal("a"), deal("b")]).await;
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|r| r.outcome == DeliveryOutcome::SkippedNoCredentials));
    }

    #[tokio::test]
    async fn unparseable_recipient_refuses_without_sending() {
        let gateway = SmsGateway::new(Some(GatewayConfig {
            smtp_host: "smtp.gmail.com".to_string(),
            sender: "me@gmail.com".to_string(),
            password: "app-password".to_string(),
            recipient: "not an address".to_string(),
        }));
        let results = gateway.deliver(&[deal("a")]).await;
        assert_eq!(results[0].outcome, DeliveryOutcome::RecipientRefused);
    }
}
