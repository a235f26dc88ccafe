// src/news/fortnite.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{FeedResult, NewsFetcher, NewsItem};

const NEWS_URL: &str = "https://fortnite-api.com/v2/news";

/// Battle-royale news from fortnite-api.com. Honors the `NewsFetcher`
/// contract: every failure path degrades to an empty feed.
pub struct FortniteNewsProvider {
    url: String,
    client: Client,
    timeout: Duration,
}

// Tolerant mirror of the observed payload shapes: the section lives under
// `br` or `battleRoyale`, items under `motds` or `messages`, and the feed
// date either on the section or on the envelope.

#[derive(Debug, Deserialize, Default)]
struct NewsResponse {
    data: Option<NewsData>,
}

#[derive(Debug, Deserialize, Default)]
struct NewsData {
    br: Option<NewsSection>,
    #[serde(rename = "battleRoyale")]
    battle_royale: Option<NewsSection>,
    date: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct NewsSection {
    date: Option<String>,
    motds: Option<Vec<NewsItem>>,
    messages: Option<Vec<NewsItem>>,
}

impl FortniteNewsProvider {
    pub fn new() -> Self {
        Self::from_url(NEWS_URL.to_string())
    }

    pub fn from_url(url: String) -> Self {
        Self {
            url,
            client: Client::new(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    fn parse_feed(body: &str) -> Result<FeedResult> {
        let rsp: NewsResponse = serde_json::from_str(body).context("parsing news payload")?;
        let data = rsp.data.unwrap_or_default();
        let section = data.br.or(data.battle_royale).unwrap_or_default();

        let items = match section.motds {
            Some(motds) if !motds.is_empty() => motds,
            _ => section.messages.unwrap_or_default(),
        };
        let date = section.date.or(data.date);

        Ok(FeedResult { items, date })
    }
}

impl Default for FortniteNewsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NewsFetcher for FortniteNewsProvider {
    async fn fetch(&self, language: &str) -> FeedResult {
        let rsp = self
            .client
            .get(&self.url)
            .query(&[("language", language)])
            .timeout(self.timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        let body = match rsp {
            Ok(r) => match r.text().await {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(error = ?e, "reading news response failed");
                    return FeedResult::default();
                }
            },
            Err(e) => {
                tracing::warn!(error = ?e, "news fetch failed");
                return FeedResult::default();
            }
        };

        match Self::parse_feed(&body) {
            Ok(feed) => feed,
            Err(e) => {
                tracing::warn!(error = ?e, "news payload parse failed");
                FeedResult::default()
            }
        }
    }
}
