//! Demo that runs two pipeline cycles against a canned feed (stdout transport):
//! the first delivers a digest and an alert, the second is deduplicated away.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

use fortnite_news_bot::config::parse_keywords;
use fortnite_news_bot::detect::EventDetector;
use fortnite_news_bot::pipeline::NotificationPipeline;
use fortnite_news_bot::{
    ChatTransport, FeedResult, LastSentRecord, LastSentStore, MessageClass, NewsFetcher, NewsItem,
};

struct CannedFeed;

#[async_trait::async_trait]
impl NewsFetcher for CannedFeed {
    async fn fetch(&self, _language: &str) -> FeedResult {
        FeedResult {
            items: vec![
                NewsItem {
                    title: Some("Patch Notes".into()),
                    body: Some("v28.0 ya está disponible".into()),
                    ..Default::default()
                },
                NewsItem {
                    title: Some("Gran final".into()),
                    body: Some("El evento en vivo llega el sábado".into()),
                    ..Default::default()
                },
            ],
            date: Some("2024-01-01".into()),
        }
    }
}

struct ConsoleTransport;

#[async_trait::async_trait]
impl ChatTransport for ConsoleTransport {
    async fn deliver(&self, chat_id: &str, text: &str) -> Result<()> {
        println!("--> to {chat_id}:\n{text}\n");
        Ok(())
    }
}

#[derive(Default)]
struct MemoryStore(Mutex<HashMap<MessageClass, LastSentRecord>>);

#[async_trait::async_trait]
impl LastSentStore for MemoryStore {
    async fn read(&self, class: MessageClass) -> Option<LastSentRecord> {
        self.0.lock().unwrap().get(&class).cloned()
    }

    async fn write(&self, class: MessageClass, content: &str, hash: &str) {
        self.0.lock().unwrap().insert(
            class,
            LastSentRecord {
                class,
                hash: hash.to_string(),
                content: content.to_string(),
                sent_at: chrono::Utc::now(),
            },
        );
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let pipeline = NotificationPipeline::new(
        CannedFeed,
        ConsoleTransport,
        MemoryStore::default(),
        EventDetector::new(parse_keywords("evento en vivo,big bang")),
        "demo-chat".to_string(),
        "es".to_string(),
    );

    pipeline.run_cycle().await;
    println!("-- second cycle (same feed, should skip) --");
    pipeline.run_cycle().await;

    println!("notify-demo done");
}
