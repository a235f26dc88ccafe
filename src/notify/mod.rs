// src/notify/mod.rs
pub mod telegram;

use anyhow::Result;

/// Outbound chat channel. Failures come back as errors, never panics; the
/// pipeline decides what a failed delivery means for its state.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    async fn deliver(&self, chat_id: &str, text: &str) -> Result<()>;
}
