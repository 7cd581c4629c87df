//! Content collection loading and persistence layer.

pub mod export;
pub mod loader;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform a content item was collected from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum Source {
    Reddit,
    HackerNews,
    Rss,
    GoogleSearch,
    YouTube,
    NewsApi,
    Other(String),
}

impl Source {
    /// Parse a stored source label. Unknown platforms are preserved verbatim
    /// rather than rejected, since new scrapers appear upstream.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "reddit" => Self::Reddit,
            "hacker news" | "hackernews" => Self::HackerNews,
            "rss" => Self::Rss,
            "google search" | "google" => Self::GoogleSearch,
            "youtube" => Self::YouTube,
            "newsapi" | "news api" => Self::NewsApi,
            _ => Self::Other(label.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Reddit => "Reddit",
            Self::HackerNews => "Hacker News",
            Self::Rss => "RSS",
            Self::GoogleSearch => "Google Search",
            Self::YouTube => "YouTube",
            Self::NewsApi => "NewsAPI",
            Self::Other(label) => label,
        }
    }
}

/// One collected content record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Item {
    pub title: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub source: Source,
}
