use serde::Deserialize;
use std::env;
use std::fs;

/// The user's taste/price/quality profile. Read-only after load.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceProfile {
    /// Lowercase substrings; a wine name must contain at least one.
    pub keywords: Vec<String>,
    pub max_price: f64,
    pub min_discount_pct: u8,
    pub min_score: u8,
    /// Lowercase substrings matched against critic publication names.
    #[serde(default)]
    pub trusted_sources: Vec<String>,
}

/// Email-to-SMS gateway credentials. The recipient is a carrier gateway
/// address such as 3125551234@vtext.com.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    pub sender: String,
    pub password: String,
    pub recipient: String,
}

impl GatewayConfig {
    /// Credentials from the environment (GMAIL_USER, GMAIL_PASS, PHONE_SMS),
    /// for deployments that keep secrets out of the config file.
    pub fn from_env() -> Option<Self> {
        let sender = env::var("GMAIL_USER").ok().filter(|v| !v.is_empty())?;
        let password = env::var("GMAIL_PASS").ok().filter(|v| !v.is_empty())?;
        let recipient = env::var("PHONE_SMS").ok().filter(|v| !v.is_empty())?;
        Some(Self {
            smtp_host: default_smtp_host(),
            sender,
            password,
            recipient,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub profile: PreferenceProfile,
    /// Absent gateway means deals are logged instead of texted.
    #[serde(default)]
    pub gateway: Option<GatewayConfig>,
    #[serde(default = "default_dedup_path")]
    pub dedup_path: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_dedup_path() -> String {
    "notified_deals.json".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let mut config: AppConfig = serde_json::from_str(&content)?;
    if config.gateway.is_none() {
        config.gateway = GatewayConfig::from_env();
    }
    Ok(config)
}
