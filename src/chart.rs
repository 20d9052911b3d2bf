//! Bar-chart rendering behind an injectable renderer.
//!
//! The analytical side only computes `(label, count)` series; anything that
//! draws is hidden behind [`ChartRenderer`] so the core stays pure and
//! testable without a drawing backend.

use std::path::PathBuf;

use plotters::prelude::*;
use tracing::info;

use crate::error::NewsDataError;
use crate::table::Table;

/// Renders a labeled count series. Implementations own where and how the
/// chart materializes.
pub trait ChartRenderer {
    fn render(&self, series: &[(String, usize)]) -> Result<(), NewsDataError>;
}

/// Compute the top `n` sources by article count and hand them to a renderer.
pub fn plot_top_sources(
    table: &Table,
    n: usize,
    renderer: &dyn ChartRenderer,
) -> Result<(), NewsDataError> {
    let series = table.value_counts("source_name", n)?;
    renderer.render(&series)
}

/// Horizontal bar chart written as an SVG file via plotters.
pub struct SvgBarChart {
    output_path: PathBuf,
}

impl SvgBarChart {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }
}

impl ChartRenderer for SvgBarChart {
    fn render(&self, series: &[(String, usize)]) -> Result<(), NewsDataError> {
        let n = series.len();
        let title = format!("Top {n} News Sources by Number of Articles");
        let max_count = series.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1) as f64;
        let labels: Vec<String> = series.iter().map(|(name, _)| name.clone()).collect();

        let chart_err = |e: &dyn std::fmt::Display| NewsDataError::Chart(e.to_string());

        let root = SVGBackend::new(&self.output_path, (1200, 800)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| chart_err(&e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(180)
            .build_cartesian_2d(0f64..max_count * 1.05, 0f64..n.max(1) as f64)
            .map_err(|e| chart_err(&e))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Number of Articles")
            .y_desc("Source Name")
            .y_labels(n.max(1))
            .y_label_formatter(&|y| {
                let slot = y.floor() as usize;
                if *y >= 0.0 && slot < labels.len() {
                    labels[labels.len() - 1 - slot].clone()
                } else {
                    String::new()
                }
            })
            .draw()
            .map_err(|e| chart_err(&e))?;

        // First series entry gets the topmost bar.
        chart
            .draw_series(series.iter().enumerate().map(|(i, (_, count))| {
                let y = (n - 1 - i) as f64;
                Rectangle::new([(0.0, y + 0.15), (*count as f64, y + 0.85)], BLUE.filled())
            }))
            .map_err(|e| chart_err(&e))?;

        root.present().map_err(|e| chart_err(&e))?;
        info!(path = %self.output_path.display(), "Wrote bar chart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Captures whatever series it is asked to render.
    struct CapturingRenderer {
        seen: RefCell<Vec<(String, usize)>>,
    }

    impl ChartRenderer for CapturingRenderer {
        fn render(&self, series: &[(String, usize)]) -> Result<(), NewsDataError> {
            self.seen.borrow_mut().extend_from_slice(series);
            Ok(())
        }
    }

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_plot_top_sources_passes_value_counts_to_renderer() {
        let table = Table::new(
            vec!["source_name".to_string()],
            vec![
                vec![cell("cnn")],
                vec![cell("bbc")],
                vec![cell("cnn")],
            ],
        );
        let renderer = CapturingRenderer {
            seen: RefCell::new(Vec::new()),
        };

        plot_top_sources(&table, 2, &renderer).unwrap();
        assert_eq!(
            renderer.seen.into_inner(),
            vec![("cnn".to_string(), 2), ("bbc".to_string(), 1)]
        );
    }

    #[test]
    fn test_plot_top_sources_missing_column_is_fatal() {
        let table = Table::new(vec!["category".to_string()], vec![vec![cell("tech")]]);
        let renderer = CapturingRenderer {
            seen: RefCell::new(Vec::new()),
        };
        let err = plot_top_sources(&table, 5, &renderer).unwrap_err();
        assert!(matches!(err, NewsDataError::MissingColumn(_)));
    }

    #[test]
    fn test_svg_bar_chart_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sources.svg");
        let renderer = SvgBarChart::new(&path);

        renderer
            .render(&[("cnn".to_string(), 3), ("bbc".to_string(), 1)])
            .unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Top 2 News Sources by Number of Articles"));
    }
}
