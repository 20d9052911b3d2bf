//! Error types for data loading, table queries, and chart rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the loader, the tabular store, and the chart renderer.
///
/// `NotFound` and `MissingColumn` are the two contract-level failures: a
/// backing CSV that does not exist, and a query naming a column the loaded
/// table does not have. Neither is retried.
#[derive(Error, Debug)]
pub enum NewsDataError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Column {0:?} not in table")]
    MissingColumn(String),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render chart: {0}")]
    Chart(String),
}
