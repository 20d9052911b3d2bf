//! # News Insights
//!
//! A small analysis tool for news-article datasets stored as CSV files. It
//! loads `<data-path>/data.csv` into an in-memory table and reports:
//!
//! - Top sources by article count
//! - Top sources by global web-traffic rank (cross-referenced against a
//!   traffic-ranking CSV)
//! - A sample of positive-sentiment articles
//! - Per-source summary statistics, when the dataset carries the needed
//!   columns
//!
//! Optionally it renders the top sources as a horizontal SVG bar chart.
//!
//! ## Usage
//!
//! ```sh
//! news_insights -d ./data -t ./traffic.csv
//! ```

use std::error::Error;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;

use cli::Cli;
use news_insights::chart::{plot_top_sources, SvgBarChart};
use news_insights::utils::summarize;
use news_insights::{NewsDataLoader, Table};

fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_insights starting up");

    let args = Cli::parse();
    debug!(?args.data_path, ?args.traffic_data_path, top = args.top, "Parsed CLI arguments");

    let loader = NewsDataLoader::open(&args.data_path)?;

    println!("Top sources by article count:");
    for (source, count) in loader.top_sources_by_article_count(args.top)? {
        println!("  {source}: {count}");
    }

    println!("\nSources with highest traffic:");
    for (source, rank) in loader.highest_traffic_sources(&args.traffic_data_path, args.top)? {
        println!("  {source}: rank {rank}");
    }

    println!("\nExample articles with positive sentiment:");
    print_head(&loader.articles_by_sentiment("positive")?, 5);

    // Summary statistics need the mentions and link_count columns, which
    // minimal datasets may not carry.
    let articles = loader.articles();
    if articles.has_column("mentions") && articles.has_column("link_count") {
        let summary = summarize(articles)?;
        let mut per_source: Vec<_> = summary.articles_by_source.iter().collect();
        per_source.sort_by(|(sa, ca), (sb, cb)| cb.cmp(ca).then(sa.cmp(sb)));

        println!("\nPer-source summary (articles / mentions / links):");
        for (source, count) in per_source {
            let mentions = summary.mentions_by_source.get(source).copied().unwrap_or(0);
            let links = summary.links_by_source.get(source).copied().unwrap_or(0.0);
            println!("  {source}: {count} / {mentions} / {links}");
        }
    }

    if let Some(ref chart_path) = args.chart_output {
        let renderer = SvgBarChart::new(chart_path);
        plot_top_sources(articles, args.top, &renderer)?;
        println!("\nWrote top-sources chart to {chart_path}");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Print the first `n` rows of a table, header first, null cells blank.
fn print_head(table: &Table, n: usize) {
    println!("  {}", table.columns().join(" | "));
    for row in table.rows().iter().take(n) {
        let rendered: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("")).collect();
        println!("  {}", rendered.join(" | "));
    }
}
