// tests/pipeline_e2e.rs
// Full cycles against the real file-backed store, with the transport and
// fetcher stubbed at the pipeline seams.

use anyhow::Result;
use std::sync::{Arc, Mutex};

use fortnite_news_bot::config::parse_keywords;
use fortnite_news_bot::detect::EventDetector;
use fortnite_news_bot::fingerprint::fingerprint;
use fortnite_news_bot::pipeline::NotificationPipeline;
use fortnite_news_bot::{
    ChatTransport, FeedResult, FileStateStore, LastSentStore, MessageClass, NewsFetcher, NewsItem,
};

#[derive(Clone)]
struct ScriptedFetcher {
    feed: Arc<Mutex<FeedResult>>,
}

impl ScriptedFetcher {
    fn new(feed: FeedResult) -> Self {
        Self {
            feed: Arc::new(Mutex::new(feed)),
        }
    }

    fn set(&self, feed: FeedResult) {
        *self.feed.lock().unwrap() = feed;
    }
}

#[async_trait::async_trait]
impl NewsFetcher for ScriptedFetcher {
    async fn fetch(&self, _language: &str) -> FeedResult {
        self.feed.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
struct RecordingTransport {
    sent: Arc<Mutex<Vec<String>>>,
}

impl RecordingTransport {
    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ChatTransport for RecordingTransport {
    async fn deliver(&self, _chat_id: &str, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn item(title: &str, body: &str) -> NewsItem {
    NewsItem {
        title: Some(title.to_string()),
        body: Some(body.to_string()),
        ..Default::default()
    }
}

fn feed_with(items: Vec<NewsItem>, date: Option<&str>) -> FeedResult {
    FeedResult {
        items,
        date: date.map(str::to_string),
    }
}

#[tokio::test]
async fn repeated_cycles_deliver_once_until_the_feed_changes() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStateStore::new(dir.path().join("last_sent.json"));
    let fetcher = ScriptedFetcher::new(feed_with(
        vec![item("Patch Notes", "v1.0")],
        Some("2024-01-01"),
    ));
    let transport = RecordingTransport::default();

    let pipeline = NotificationPipeline::new(
        fetcher.clone(),
        transport.clone(),
        store,
        EventDetector::new(parse_keywords("evento en vivo")),
        "chat".into(),
        "es".into(),
    );

    pipeline.run_cycle().await;
    pipeline.run_cycle().await;
    assert_eq!(transport.sent().len(), 1, "identical feed must not resend");

    fetcher.set(feed_with(
        vec![item("Patch Notes", "v2.0")],
        Some("2024-01-02"),
    ));
    pipeline.run_cycle().await;
    assert_eq!(transport.sent().len(), 2);
}

#[tokio::test]
async fn delivered_digest_matches_the_persisted_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStateStore::new(dir.path().join("last_sent.json"));
    let transport = RecordingTransport::default();

    let pipeline = NotificationPipeline::new(
        ScriptedFetcher::new(feed_with(
            vec![item("Patch Notes", "v1.0")],
            Some("2024-01-01"),
        )),
        transport.clone(),
        store,
        EventDetector::new(Vec::new()),
        "chat".into(),
        "es".into(),
    );
    pipeline.run_cycle().await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0]
        .starts_with("📰 Noticias de Fortnite\nFecha: 2024-01-01\n\n- Patch Notes\nv1.0\n\n"));
    assert!(sent[0].ends_with("Más info: https://dash.fortnite-api.com/endpoints/news"));

    // The store slot holds the delivered bytes and their fingerprint.
    let reread = FileStateStore::new(dir.path().join("last_sent.json"));
    let rec = reread.read(MessageClass::News).await.expect("record");
    assert_eq!(rec.content, sent[0]);
    assert_eq!(rec.hash, fingerprint(&sent[0]));
}

#[tokio::test]
async fn alert_goes_out_after_the_digest_and_dedupes_independently() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStateStore::new(dir.path().join("last_sent.json"));
    let fetcher = ScriptedFetcher::new(feed_with(
        vec![
            item("Tienda", "atuendos nuevos"),
            item("Gran final", "El evento en vivo llega el sábado"),
        ],
        None,
    ));
    let transport = RecordingTransport::default();

    let pipeline = NotificationPipeline::new(
        fetcher.clone(),
        transport.clone(),
        store,
        EventDetector::new(parse_keywords("evento en vivo")),
        "chat".into(),
        "es".into(),
    );

    pipeline.run_cycle().await;
    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].starts_with("📰"));
    assert!(sent[1].starts_with("⚠️ Posible evento especial detectado"));
    assert!(sent[1].contains("- Gran final\nEl evento en vivo llega el sábado"));

    // New digest content, same matched items: only the digest goes out again.
    fetcher.set(feed_with(
        vec![
            item("Tienda", "rotación del jueves"),
            item("Gran final", "El evento en vivo llega el sábado"),
        ],
        None,
    ));
    pipeline.run_cycle().await;
    let sent = transport.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent[2].starts_with("📰"));
}

#[tokio::test]
async fn empty_feed_leaves_no_trace() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("last_sent.json");
    let transport = RecordingTransport::default();

    let pipeline = NotificationPipeline::new(
        ScriptedFetcher::new(FeedResult::default()),
        transport.clone(),
        FileStateStore::new(&state_path),
        EventDetector::new(parse_keywords("evento en vivo")),
        "chat".into(),
        "es".into(),
    );
    pipeline.run_cycle().await;

    assert!(transport.sent().is_empty());
    assert!(!state_path.exists(), "no state may be written on empty feeds");
}
