// src/news/mod.rs
pub mod fortnite;

use serde::Deserialize;

/// One raw entry from the in-game news feed. The upstream API moves fields
/// around between seasons, so everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: Option<String>,
    pub tab_title: Option<String>,
    pub header: Option<String>,
    pub body: Option<String>,
    pub message: Option<String>,
    pub paragraph: Option<String>,
}

impl NewsItem {
    /// First non-empty of title, tabTitle, header.
    pub fn headline(&self) -> Option<&str> {
        first_filled([&self.title, &self.tab_title, &self.header])
    }

    /// First non-empty of body, message, paragraph.
    pub fn body_text(&self) -> Option<&str> {
        first_filled([&self.body, &self.message, &self.paragraph])
    }
}

fn first_filled<const N: usize>(fields: [&Option<String>; N]) -> Option<&str> {
    fields
        .into_iter()
        .filter_map(|f| f.as_deref())
        .find(|s| !s.is_empty())
}

/// What one fetch cycle yields. Produced fresh every cycle, never retained.
#[derive(Debug, Clone, Default)]
pub struct FeedResult {
    pub items: Vec<NewsItem>,
    pub date: Option<String>,
}

/// Source of the news feed. Implementations must not fail: any transport or
/// parse problem is logged and surfaces as an empty feed, which the pipeline
/// treats as a no-op cycle.
#[async_trait::async_trait]
pub trait NewsFetcher: Send + Sync {
    async fn fetch(&self, language: &str) -> FeedResult;
}
