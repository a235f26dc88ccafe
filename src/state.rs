// src/state.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

const STATE_PATH: &str = "state/last_sent.json";

/// Which last-sent slot a formatted message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageClass {
    News,
    EventAlert,
}

/// The most recently delivered message for one class. At most one record
/// per class survives; a new delivery overwrites the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastSentRecord {
    pub class: MessageClass,
    pub hash: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// Durable slot per message class. Read failures mean "absent" and write
/// failures are logged, so the pipeline never aborts on state I/O.
#[async_trait::async_trait]
pub trait LastSentStore: Send + Sync {
    async fn read(&self, class: MessageClass) -> Option<LastSentRecord>;
    async fn write(&self, class: MessageClass, content: &str, hash: &str);
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    news: Option<LastSentRecord>,
    event_alert: Option<LastSentRecord>,
}

impl PersistedState {
    fn slot_mut(&mut self, class: MessageClass) -> &mut Option<LastSentRecord> {
        match class {
            MessageClass::News => &mut self.news,
            MessageClass::EventAlert => &mut self.event_alert,
        }
    }

    fn into_slot(self, class: MessageClass) -> Option<LastSentRecord> {
        match class {
            MessageClass::News => self.news,
            MessageClass::EventAlert => self.event_alert,
        }
    }
}

/// Single JSON file holding both slots. Missing or corrupt files fall back
/// to the empty state.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> PersistedState {
        match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
            Err(_) => PersistedState::default(),
        }
    }
}

impl Default for FileStateStore {
    fn default() -> Self {
        Self::new(STATE_PATH)
    }
}

#[async_trait::async_trait]
impl LastSentStore for FileStateStore {
    async fn read(&self, class: MessageClass) -> Option<LastSentRecord> {
        self.load().await.into_slot(class)
    }

    async fn write(&self, class: MessageClass, content: &str, hash: &str) {
        let mut state = self.load().await;
        *state.slot_mut(class) = Some(LastSentRecord {
            class,
            hash: hash.to_string(),
            content: content.to_string(),
            sent_at: Utc::now(),
        });

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(dir).await {
                tracing::warn!("state dir: {e:#}");
            }
        }
        let bytes = serde_json::to_vec_pretty(&state).unwrap_or_default();
        if let Err(e) = fs::write(&self.path, bytes).await {
            tracing::warn!("write state: {e:#}");
        }
    }
}
