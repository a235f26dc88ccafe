// src/detect.rs
use crate::news::NewsItem;

/// Scans feed items for configured season-event keywords.
///
/// The keyword set is fixed at startup; config parsing already trimmed,
/// lowercased, and dropped empty entries.
#[derive(Debug, Clone)]
pub struct EventDetector {
    keywords: Vec<String>,
}

impl EventDetector {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    /// Items whose text contains any keyword, in feed order. Matches are
    /// not deduplicated.
    pub fn matches(&self, items: &[NewsItem]) -> Vec<NewsItem> {
        items
            .iter()
            .filter(|item| self.is_match(item))
            .cloned()
            .collect()
    }

    fn is_match(&self, item: &NewsItem) -> bool {
        let haystack = [
            item.title.as_deref(),
            item.tab_title.as_deref(),
            item.header.as_deref(),
            item.body.as_deref(),
            item.message.as_deref(),
            item.paragraph.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" \n ")
        .to_lowercase();

        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}
