//! News data IO and domain queries.
//!
//! [`NewsDataLoader`] owns the article table for one dataset directory. The
//! table is loaded eagerly from `<dir>/data.csv` at construction and treated
//! as immutable afterwards; every query method is a read-only derivation.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::error::NewsDataError;
use crate::table::Table;

/// Loads and queries the news articles of one dataset directory.
///
/// Construction reads the whole of `<dir>/data.csv` into memory; the loaded
/// table lives as long as the loader and is never mutated. The traffic
/// cross-reference file is read on every call instead, since it is external
/// reference data the caller may swap between calls.
#[derive(Debug)]
pub struct NewsDataLoader {
    path: PathBuf,
    articles: Table,
}

impl NewsDataLoader {
    /// Open a dataset directory and load its `data.csv`.
    ///
    /// # Errors
    ///
    /// [`NewsDataError::NotFound`] when `<dir>/data.csv` does not exist.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, NewsDataError> {
        let path = path.as_ref().to_path_buf();
        let articles = Table::from_csv_path(path.join("data.csv"))?;
        info!(rows = articles.len(), "Loaded article table");
        Ok(Self { path, articles })
    }

    /// The dataset directory this loader was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full article table.
    pub fn articles(&self) -> &Table {
        &self.articles
    }

    /// Articles whose `category` column matches exactly.
    pub fn articles_by_category(&self, category: &str) -> Result<Table, NewsDataError> {
        self.articles.filter_equals("category", category)
    }

    /// Articles whose `title_sentiment` column matches exactly.
    pub fn articles_by_sentiment(&self, sentiment: &str) -> Result<Table, NewsDataError> {
        self.articles.filter_equals("title_sentiment", sentiment)
    }

    /// Top `n` sources by number of articles, most prolific first.
    ///
    /// Ties keep first-encountered order; rows with a null `source_name` are
    /// not counted.
    pub fn top_sources_by_article_count(
        &self,
        n: usize,
    ) -> Result<Vec<(String, usize)>, NewsDataError> {
        self.articles.value_counts("source_name", n)
    }

    /// Top `n` sources by global traffic rank (lower rank = more traffic).
    ///
    /// Loads the traffic CSV (columns `Domain`, `GlobalRank`) from
    /// `traffic_path` on every call, left-joins the article table to it on
    /// `source_name` = `Domain`, drops rows without a usable rank, and
    /// stable-sorts ascending by rank. A source appears once per article row
    /// that survived the join, matching the row-wise join semantics.
    ///
    /// # Errors
    ///
    /// [`NewsDataError::NotFound`] when the traffic file does not exist.
    #[instrument(level = "info", skip_all, fields(traffic_path = %traffic_path.as_ref().display()))]
    pub fn highest_traffic_sources(
        &self,
        traffic_path: impl AsRef<Path>,
        n: usize,
    ) -> Result<Vec<(String, u64)>, NewsDataError> {
        let traffic = Table::from_csv_path(traffic_path.as_ref())?;
        let merged = self.articles.left_join(&traffic, "source_name", "Domain")?;

        let source_idx = merged.column_index("source_name")?;
        let rank_idx = merged.column_index("GlobalRank")?;

        let mut ranked: Vec<(String, u64)> = merged
            .rows()
            .iter()
            .filter_map(|row| {
                let source = row[source_idx].as_deref()?;
                let rank = row[rank_idx].as_deref().and_then(parse_rank)?;
                Some((source.to_string(), rank))
            })
            .collect();

        // Stable sort keeps join order among equal ranks.
        ranked.sort_by_key(|(_, rank)| *rank);
        ranked.truncate(n);
        Ok(ranked)
    }
}

/// Parse a traffic rank cell. Accepts plain integers and float renderings
/// ("12" or "12.0"); anything else is treated as a null rank.
fn parse_rank(s: &str) -> Option<u64> {
    let trimmed = s.trim();
    trimmed
        .parse::<u64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
}
