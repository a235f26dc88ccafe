// src/notify/telegram.rs
use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ChatTransport;

const API_BASE: &str = "https://api.telegram.org";
const POLL_TIMEOUT_SECS: u64 = 50;

/// `/id`, optionally suffixed with the bot name (`/id@NewsBot`).
static ID_COMMAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/id(@\w+)?$").unwrap());

/// Telegram Bot API client: `sendMessage` for deliveries plus a
/// `getUpdates` long-poll loop for the chat-id capture mode.
pub struct TelegramNotifier {
    api_base: String,
    token: String,
    client: Client,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(token: String) -> Self {
        Self::with_api_base(API_BASE.to_string(), token)
    }

    pub fn with_api_base(api_base: String, token: String) -> Self {
        Self {
            api_base,
            token,
            client: Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        let rsp = self
            .client
            .get(self.method_url("getUpdates"))
            .query(&[("offset", offset), ("timeout", POLL_TIMEOUT_SECS as i64)])
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .send()
            .await
            .context("telegram getUpdates request")?;

        let reply: UpdatesReply = rsp.json().await.context("telegram getUpdates reply")?;
        if !reply.ok {
            return Err(anyhow!("telegram getUpdates rejected"));
        }
        Ok(reply.result)
    }

    /// Diagnostic mode: log the chat id of every incoming message and answer
    /// the `/id` command, so the operator can discover a destination id.
    /// Runs until the process is stopped; normal delivery stays disabled.
    pub async fn run_chat_id_capture(&self) -> Result<()> {
        tracing::info!("capture mode: send any message to the bot to log its chat id");
        let mut offset: i64 = 0;
        loop {
            let updates = match self.get_updates(offset).await {
                Ok(u) => u,
                Err(e) => {
                    tracing::warn!(error = ?e, "getUpdates failed, retrying");
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                let Some(msg) = update.message else { continue };

                let label = msg.chat.label();
                if label.is_empty() {
                    tracing::info!("[telegram] chat.id: {}", msg.chat.id);
                } else {
                    tracing::info!("[telegram] chat.id: {} | {}", msg.chat.id, label);
                }

                let is_id_command = msg
                    .text
                    .as_deref()
                    .is_some_and(|t| ID_COMMAND.is_match(t.trim()));
                if is_id_command {
                    let mut reply = format!("chat.id: {}", msg.chat.id);
                    if !label.is_empty() {
                        reply.push('\n');
                        reply.push_str(&label);
                    }
                    if let Err(e) = self.deliver(&msg.chat.id.to_string(), &reply).await {
                        tracing::debug!(error = ?e, "could not answer /id");
                    }
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl ChatTransport for TelegramNotifier {
    async fn deliver(&self, chat_id: &str, text: &str) -> Result<()> {
        let rsp = self
            .client
            .post(self.method_url("sendMessage"))
            .timeout(self.timeout)
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            .context("telegram sendMessage request")?;

        let status = rsp.status();
        let reply: ApiReply = rsp.json().await.context("telegram sendMessage reply")?;
        if !status.is_success() || !reply.ok {
            return Err(anyhow!(
                "telegram sendMessage rejected ({status}): {}",
                reply.description.unwrap_or_default()
            ));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdatesReply {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
struct IncomingMessage {
    chat: Chat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
    title: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl Chat {
    /// Group title, or the sender's first/last name for private chats.
    fn label(&self) -> String {
        if let Some(t) = self.title.as_deref().filter(|s| !s.is_empty()) {
            return t.to_string();
        }
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
