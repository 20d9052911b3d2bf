//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the news analysis tool.
///
/// # Examples
///
/// ```sh
/// # Analyze a dataset against a traffic-ranking file
/// news_insights -d ./data -t ./traffic.csv
///
/// # Wider listings plus an SVG chart of the top sources
/// news_insights -d ./data -t ./traffic.csv --top 20 --chart-output sources.svg
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the directory containing news data files
    #[arg(short, long)]
    pub data_path: String,

    /// Path to the global website traffic data file
    #[arg(short, long)]
    pub traffic_data_path: String,

    /// Number of entries in the top-N listings
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Optional output path for an SVG bar chart of top sources
    #[arg(long)]
    pub chart_output: Option<String>,
}
