//! Data models for loosely structured article records.
//!
//! This module defines the typed shape of article records as they arrive
//! from an API or other non-CSV feed:
//! - [`ArticleRecord`]: an explicit optional-field record with documented
//!   defaults, validated at the ingestion boundary
//! - [`PublishedAt`]: a publication time that may be either a raw Unix epoch
//!   or a pre-formatted string
//!
//! Every field that a feed may omit is either an `Option` or carries a serde
//! default, so a sparse record deserializes cleanly instead of being
//! rejected field-by-field downstream.

use serde::Deserialize;

/// A publication timestamp as it appears in feed data.
///
/// Feeds are inconsistent about this field: some send a numeric Unix epoch,
/// others a pre-formatted date string. Both are accepted and carried through
/// to the table as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PublishedAt {
    /// Unix epoch, seconds. Fractional values are kept as sent.
    Epoch(f64),
    /// A pre-formatted date/time string, passed through verbatim.
    Text(String),
}

impl PublishedAt {
    /// Render the timestamp as a table cell.
    pub fn to_cell(&self) -> String {
        match self {
            PublishedAt::Epoch(secs) => {
                // Keep integral epochs free of a trailing ".0".
                if secs.fract() == 0.0 {
                    format!("{}", *secs as i64)
                } else {
                    format!("{secs}")
                }
            }
            PublishedAt::Text(s) => s.clone(),
        }
    }
}

/// One article record from a loosely typed feed.
///
/// Absent text fields default to the empty string; an absent `links` field
/// defaults to an empty sequence. `article_id`, `published_at`, and
/// `mentions` stay `None` when absent so that downstream consumers can tell
/// "missing" from "empty".
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleRecord {
    #[serde(default)]
    pub article_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    /// The publishing outlet. Grouping key for every per-source statistic.
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub published_at: Option<PublishedAt>,
    #[serde(default)]
    pub category: String,
    /// URLs referenced by the article.
    #[serde(default)]
    pub links: Vec<String>,
    /// Comma-separated mention handles, when the feed provides them.
    #[serde(default)]
    pub mentions: Option<String>,
}

impl ArticleRecord {
    /// Number of links at normalization time. Zero when `links` is absent.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
