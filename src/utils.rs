//! Utility functions for per-source statistics and timestamp conversion.
//!
//! This module provides the summary helpers used on top of a loaded table:
//! - Per-source article, mention, and link counts
//! - Unix-epoch to human-readable timestamp conversion

use std::collections::HashMap;

use chrono::{Local, TimeZone};
use tracing::{instrument, warn};

use crate::error::NewsDataError;
use crate::table::{parse_number, Table};

/// Per-source statistics over an article table.
///
/// All three maps are keyed by `source_name`; rows with a null source are
/// excluded from every map rather than bucketed under a sentinel key.
#[derive(Debug, Default, PartialEq)]
pub struct SourceSummary {
    /// Number of article rows per source.
    pub articles_by_source: HashMap<String, usize>,
    /// Total comma-separated mention tokens per source. Absent mentions
    /// contribute zero.
    pub mentions_by_source: HashMap<String, usize>,
    /// Sum of `link_count` per source.
    pub links_by_source: HashMap<String, f64>,
}

/// Compute per-source article, mention, and link counts.
///
/// Requires the `source_name`, `mentions`, and `link_count` columns; a table
/// missing any of them is a contract violation and fails with
/// [`NewsDataError::MissingColumn`].
#[instrument(level = "debug", skip_all, fields(rows = table.len()))]
pub fn summarize(table: &Table) -> Result<SourceSummary, NewsDataError> {
    let source_idx = table.column_index("source_name")?;
    let mentions_idx = table.column_index("mentions")?;

    let mut articles_by_source: HashMap<String, usize> = HashMap::new();
    let mut mentions_by_source: HashMap<String, usize> = HashMap::new();
    for row in table.rows() {
        let Some(source) = row[source_idx].as_deref() else {
            continue;
        };
        *articles_by_source.entry(source.to_string()).or_insert(0) += 1;
        let tokens = row[mentions_idx].as_deref().map_or(0, mention_tokens);
        *mentions_by_source.entry(source.to_string()).or_insert(0) += tokens;
    }

    Ok(SourceSummary {
        articles_by_source,
        mentions_by_source,
        links_by_source: table.group_sum("source_name", "link_count")?,
    })
}

/// Count the comma-separated tokens in a mentions cell, ignoring empties.
fn mention_tokens(cell: &str) -> usize {
    cell.split(',').filter(|t| !t.trim().is_empty()).count()
}

/// Convert a Unix-epoch column to readable local timestamps.
///
/// Produces one entry per row: `None` when the cell is null, unparseable, or
/// exactly zero (both mean "unknown", not the epoch date), otherwise the
/// `%Y-%m-%d %H:%M:%S` rendering of the value as local time.
///
/// A column absent from the table is a non-fatal error here: it is logged as
/// a warning and an empty sequence is returned instead of failing the
/// caller.
pub fn to_readable_timestamps(column: &str, table: &Table) -> Vec<Option<String>> {
    let cells = match table.column(column) {
        Ok(cells) => cells,
        Err(_) => {
            warn!(column, "Column not in data; returning no timestamps");
            return Vec::new();
        }
    };

    cells
        .into_iter()
        .map(|cell| {
            let secs = cell.and_then(parse_number)?;
            if secs == 0.0 {
                return None;
            }
            Local
                .timestamp_opt(secs.trunc() as i64, 0)
                .single()
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        })
        .collect()
}
