//! Analysis helpers for news-article datasets stored as CSV files.
//!
//! The crate is organized around a small columnar [`table::Table`]:
//!
//! - [`loader::NewsDataLoader`] loads `<dir>/data.csv` once and answers
//!   domain queries (by category, by sentiment, top sources, traffic
//!   cross-reference)
//! - [`normalize::articles_to_table`] is the alternate ingestion path,
//!   turning loosely typed feed records into the same table shape
//! - [`utils`] computes per-source summaries and readable timestamps
//! - [`chart`] renders top-source bar charts behind an injectable
//!   [`chart::ChartRenderer`]
//!
//! Everything is synchronous and whole-file: datasets are assumed to fit in
//! memory and tables are immutable once loaded.

pub mod chart;
pub mod error;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod table;
pub mod utils;

pub use error::NewsDataError;
pub use loader::NewsDataLoader;
pub use table::Table;
