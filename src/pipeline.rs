// src/pipeline.rs
use tracing::{info, warn};

use crate::detect::EventDetector;
use crate::fingerprint::fingerprint;
use crate::message;
use crate::news::NewsFetcher;
use crate::notify::ChatTransport;
use crate::state::{LastSentStore, MessageClass};

/// Orchestrates one fetch-format-dedupe-deliver cycle for both message
/// classes. Holds no mutable state of its own; everything durable lives in
/// the store.
pub struct NotificationPipeline<F, T, S> {
    fetcher: F,
    transport: T,
    store: S,
    detector: EventDetector,
    chat_id: String,
    language: String,
}

impl<F, T, S> NotificationPipeline<F, T, S>
where
    F: NewsFetcher,
    T: ChatTransport,
    S: LastSentStore,
{
    pub fn new(
        fetcher: F,
        transport: T,
        store: S,
        detector: EventDetector,
        chat_id: String,
        language: String,
    ) -> Self {
        Self {
            fetcher,
            transport,
            store,
            detector,
            chat_id,
            language,
        }
    }

    /// One cycle. An empty feed ends it before any formatting or state I/O;
    /// otherwise the news flow runs first and the alert flow runs regardless
    /// of how the news flow went.
    pub async fn run_cycle(&self) {
        let feed = self.fetcher.fetch(&self.language).await;
        if feed.items.is_empty() {
            info!("no news items available, skipping cycle");
            return;
        }

        let digest = message::digest(&feed.items, feed.date.as_deref());
        self.send_if_changed(MessageClass::News, &digest, feed.items.len())
            .await;

        let matches = self.detector.matches(&feed.items);
        if matches.is_empty() {
            return;
        }
        let alert = message::alert(&matches);
        self.send_if_changed(MessageClass::EventAlert, &alert, matches.len())
            .await;
    }

    /// Dedupe gate shared by both flows. A failed delivery skips the state
    /// write, so the same content is retried on the next cycle.
    async fn send_if_changed(&self, class: MessageClass, text: &str, item_count: usize) {
        let hash = fingerprint(text);
        if let Some(last) = self.store.read(class).await {
            if last.hash == hash {
                info!(?class, "content unchanged, skipping delivery");
                return;
            }
        }

        match self.transport.deliver(&self.chat_id, text).await {
            Ok(()) => {
                info!(?class, items = item_count, "message delivered");
                self.store.write(class, text, &hash).await;
            }
            Err(e) => {
                warn!(?class, error = ?e, "delivery failed, will retry next cycle");
            }
        }
    }
}
