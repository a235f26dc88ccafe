//! Fortnite News Bot — Binary Entrypoint
//! Wires config, the Telegram transport, the state store, and the polling
//! loop. In capture mode it only listens for incoming chat ids.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use fortnite_news_bot::config::AppConfig;
use fortnite_news_bot::detect::EventDetector;
use fortnite_news_bot::news::fortnite::FortniteNewsProvider;
use fortnite_news_bot::notify::telegram::TelegramNotifier;
use fortnite_news_bot::pipeline::NotificationPipeline;
use fortnite_news_bot::scheduler;
use fortnite_news_bot::state::FileStateStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when the variables come from the host.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = AppConfig::from_env()?;
    let notifier = TelegramNotifier::new(config.bot_token.clone());

    if config.capture_chat_ids {
        return notifier.run_chat_id_capture().await;
    }

    tracing::info!(
        language = %config.language,
        interval_secs = config.interval_secs,
        tz = %config.schedule_tz,
        keywords = config.keywords.len(),
        "starting fortnite news bot"
    );

    let chat_id = config
        .chat_id
        .clone()
        .context("TELEGRAM_CHAT_ID missing")?;
    let pipeline = NotificationPipeline::new(
        FortniteNewsProvider::new(),
        notifier,
        FileStateStore::default(),
        EventDetector::new(config.keywords.clone()),
        chat_id,
        config.language.clone(),
    );

    scheduler::run(&pipeline, config.interval_secs).await;
    Ok(())
}
