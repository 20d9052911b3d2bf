//! Conversion of loose feed records into the columnar table shape.
//!
//! Feeds deliver articles as JSON objects with optional fields. This module
//! validates each record against [`ArticleRecord`] and emits one table row
//! per record, substituting documented defaults for absent fields. A record
//! that fails validation is logged and skipped; one malformed record never
//! prevents ingestion of the rest of the batch.

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::models::ArticleRecord;
use crate::table::{Row, Table};

/// Column schema of a normalized article table, in output order.
pub const ARTICLE_COLUMNS: [&str; 10] = [
    "article_id",
    "title",
    "description",
    "content",
    "source_name",
    "published_at",
    "category",
    "links",
    "link_count",
    "mentions",
];

/// Normalize a batch of loose feed records into a [`Table`].
///
/// Each record is deserialized into [`ArticleRecord`]; defaults fill absent
/// fields (empty string for text, empty sequence for `links`) and
/// `link_count` is computed as the number of links at this point. Records
/// that do not deserialize are skipped with a warning.
#[instrument(level = "debug", skip_all, fields(records = records.len()))]
pub fn articles_to_table(records: &[Value]) -> Table {
    let mut rows: Vec<Row> = Vec::with_capacity(records.len());

    for (index, raw) in records.iter().enumerate() {
        match serde_json::from_value::<ArticleRecord>(raw.clone()) {
            Ok(record) => rows.push(record_to_row(&record)),
            Err(e) => {
                warn!(index, error = %e, "Skipping article record that failed normalization");
            }
        }
    }

    info!(
        total = records.len(),
        kept = rows.len(),
        skipped = records.len() - rows.len(),
        "Normalized article batch"
    );

    Table::new(
        ARTICLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    )
}

fn record_to_row(record: &ArticleRecord) -> Row {
    vec![
        record.article_id.clone(),
        Some(record.title.clone()),
        Some(record.description.clone()),
        Some(record.content.clone()),
        Some(record.source_name.clone()),
        record.published_at.as_ref().map(|p| p.to_cell()),
        Some(record.category.clone()),
        Some(record.links.join(",")),
        Some(record.link_count().to_string()),
        record.mentions.clone(),
    ]
}
