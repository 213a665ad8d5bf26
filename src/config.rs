use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_error_retry_secs")]
    pub error_retry_secs: u64,
    #[serde(default = "default_lookback_secs")]
    pub lookback_secs: i64,
}

fn default_interval_secs() -> u64 { 600 }
fn default_error_retry_secs() -> u64 { 60 }
fn default_lookback_secs() -> i64 { 600 }

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://practicum.yandex.ru/api/user_api".to_string()
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_path")]
    pub path: String,
}

fn default_log_path() -> String {
    "homework-watch.log".to_string()
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            error_retry_secs: default_error_retry_secs(),
            lookback_secs: default_lookback_secs(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { path: default_log_path() }
    }
}

impl Config {
    /// Load config.toml from the working directory. The file is optional;
    /// every field has a default matching the original deployment values.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        match std::fs::read_to_string("config.toml") {
            Ok(content) => {
                let config: Config = toml::from_str(&content)
                    .context("Failed to parse config.toml")?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e).context("Failed to read config.toml"),
        }
    }
}

/// The three secrets the bot cannot run without.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub review_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    /// Read all credentials from the environment (or .env). Missing variables
    /// are fatal at startup; every absent name is reported at once.
    pub fn from_env() -> Result<Self> {
        let mut missing = Vec::new();
        let review_token = require_var("PRACTICUM_TOKEN", &mut missing);
        let telegram_token = require_var("TELEGRAM_BOT_TOKEN", &mut missing);
        let telegram_chat_id = require_var("TELEGRAM_CHAT_ID", &mut missing);
        match (review_token, telegram_token, telegram_chat_id) {
            (Some(review_token), Some(telegram_token), Some(telegram_chat_id)) => Ok(Self {
                review_token,
                telegram_token,
                telegram_chat_id,
            }),
            _ => bail!(
                "Missing required environment variables: {}",
                missing.join(", ")
            ),
        }
    }
}

fn require_var(name: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => Some(v),
        _ => {
            missing.push(name);
            None
        }
    }
}
