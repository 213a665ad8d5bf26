mod config;
mod error;
mod review;
mod status;
mod telegram;
mod watcher;

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::{Config, Credentials};
use review::client::ReviewClient;
use telegram::Notifier;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("Failed to load config")?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log.path)
        .with_context(|| format!("Failed to open log file {}", config.log.path))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homework_watch=info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    let credentials = Credentials::from_env().context("Failed to load credentials")?;
    let client = ReviewClient::new(credentials.review_token, config.api.base_url.clone())?;
    let notifier = Notifier::new(credentials.telegram_token, credentials.telegram_chat_id);

    // Graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
        r.store(false, Ordering::SeqCst);
    });

    info!(
        interval_secs = config.poll.interval_secs,
        error_retry_secs = config.poll.error_retry_secs,
        lookback_secs = config.poll.lookback_secs,
        base_url = %config.api.base_url,
        "Starting homework watcher"
    );

    if let Err(e) = notifier.send("Searching for updates...").await {
        warn!(error = %e, "Failed to deliver startup notice");
    }

    watcher::run(&client, &notifier, &config.poll, &running).await;

    info!("Shut down cleanly");
    Ok(())
}
